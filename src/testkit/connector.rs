//! Scripted [`Connector`] for testing connector policy.

use std::sync::atomic::{AtomicU32, Ordering};

use alloy_primitives::Address;
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{ChainId, Connection};
use crate::error::ConnectError;
use crate::port::Connector;

/// Account every scripted wallet connects with.
pub const WALLET_ACCOUNT: Address = Address::repeat_byte(0xaa);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behavior {
    /// Connects with an account.
    Wallet,
    /// Connects without an account.
    ReadOnly,
    /// Nothing to restore eagerly; activation is unavailable.
    NoSession,
    /// The user refuses every request.
    Rejecting,
}

/// A connector with a fixed answer.
///
/// Call counters let tests assert which connect path ran.
pub struct ScriptedConnector {
    name: String,
    behavior: Behavior,
    chain_id: Mutex<ChainId>,
    activations: AtomicU32,
    eager_attempts: AtomicU32,
}

impl ScriptedConnector {
    fn new(name: &str, behavior: Behavior, chain_id: u64) -> Self {
        Self {
            name: name.to_string(),
            behavior,
            chain_id: Mutex::new(ChainId::new(chain_id)),
            activations: AtomicU32::new(0),
            eager_attempts: AtomicU32::new(0),
        }
    }

    /// Connects with [`WALLET_ACCOUNT`] on `chain_id`.
    pub fn wallet(name: &str, chain_id: u64) -> Self {
        Self::new(name, Behavior::Wallet, chain_id)
    }

    /// Connects read-only on `chain_id`.
    pub fn read_only(name: &str, chain_id: u64) -> Self {
        Self::new(name, Behavior::ReadOnly, chain_id)
    }

    /// No wallet installed or authorized.
    pub fn no_session(name: &str) -> Self {
        Self::new(name, Behavior::NoSession, 1)
    }

    /// User rejects every request.
    pub fn rejecting(name: &str) -> Self {
        Self::new(name, Behavior::Rejecting, 1)
    }

    pub fn activations(&self) -> u32 {
        self.activations.load(Ordering::SeqCst)
    }

    pub fn eager_attempts(&self) -> u32 {
        self.eager_attempts.load(Ordering::SeqCst)
    }

    fn connection(&self) -> Result<Connection, ConnectError> {
        let chain_id = *self.chain_id.lock();
        match self.behavior {
            Behavior::Wallet => Ok(Connection::with_account(chain_id, WALLET_ACCOUNT)),
            Behavior::ReadOnly => Ok(Connection::read_only(chain_id)),
            Behavior::NoSession => Err(ConnectError::Unavailable(format!(
                "{} is not installed",
                self.name
            ))),
            Behavior::Rejecting => Err(ConnectError::Rejected),
        }
    }
}

#[async_trait]
impl Connector for ScriptedConnector {
    fn name(&self) -> &str {
        &self.name
    }

    async fn activate(&self) -> Result<Connection, ConnectError> {
        self.activations.fetch_add(1, Ordering::SeqCst);
        self.connection()
    }

    async fn connect_eagerly(&self) -> Result<Connection, ConnectError> {
        self.eager_attempts.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::NoSession => Err(ConnectError::NoSession),
            _ => self.connection(),
        }
    }

    async fn switch_chain(&self, chain_id: ChainId) -> Result<Connection, ConnectError> {
        if self.behavior == Behavior::Rejecting {
            return Err(ConnectError::Rejected);
        }
        *self.chain_id.lock() = chain_id;
        self.connection()
    }
}
