//! Settable [`AllowanceReader`] for testing.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{Currency, CurrencyAmount, PermitSupport};
use crate::error::ApprovalError;
use crate::port::AllowanceReader;

/// Token name reported for every token.
pub const TOKEN_NAME: &str = "Test Token";

#[derive(Debug, Clone)]
struct Reads {
    balance: U256,
    allowance: U256,
    permit: PermitSupport,
    nonce: U256,
}

/// Answers every token read from shared settable values.
///
/// Balances are reported in the queried currency, so one reader serves any
/// input token.
pub struct StaticReader {
    reads: Mutex<Reads>,
    failing: bool,
}

impl StaticReader {
    pub fn new() -> Self {
        Self {
            reads: Mutex::new(Reads {
                balance: U256::ZERO,
                allowance: U256::ZERO,
                permit: PermitSupport::Unsupported,
                nonce: U256::ZERO,
            }),
            failing: false,
        }
    }

    /// Every read fails.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    pub fn with_balance(self, raw: U256) -> Self {
        self.set_balance(raw);
        self
    }

    pub fn with_allowance(self, raw: U256) -> Self {
        self.set_allowance(raw);
        self
    }

    pub fn with_permit(self, permit: PermitSupport) -> Self {
        self.reads.lock().permit = permit;
        self
    }

    pub fn set_balance(&self, raw: U256) {
        self.reads.lock().balance = raw;
    }

    pub fn set_allowance(&self, raw: U256) {
        self.reads.lock().allowance = raw;
    }

    fn read<T>(&self, f: impl FnOnce(&Reads) -> T) -> Result<T, ApprovalError> {
        if self.failing {
            return Err(ApprovalError::Read("rpc unavailable".to_string()));
        }
        Ok(f(&self.reads.lock()))
    }
}

impl Default for StaticReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AllowanceReader for StaticReader {
    async fn allowance(
        &self,
        _token: Address,
        _owner: Address,
        _spender: Address,
    ) -> Result<U256, ApprovalError> {
        self.read(|reads| reads.allowance)
    }

    async fn balance(
        &self,
        currency: &Currency,
        _owner: Address,
    ) -> Result<CurrencyAmount, ApprovalError> {
        self.read(|reads| CurrencyAmount::from_raw(currency.clone(), reads.balance))
    }

    async fn permit_support(&self, _token: Address) -> PermitSupport {
        self.reads.lock().permit
    }

    async fn nonce(&self, _token: Address, _owner: Address) -> Result<U256, ApprovalError> {
        self.read(|reads| reads.nonce)
    }

    async fn name(&self, _token: Address) -> Result<String, ApprovalError> {
        self.read(|_| TOKEN_NAME.to_string())
    }
}
