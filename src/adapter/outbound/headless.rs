//! Connectors for hosts without a browser.
//!
//! Injected and remote wallets only exist inside a web page; a headless host
//! fills their slots with connectors that never connect. Without the
//! `onchain` feature the read-only slot is served by a connector that trusts
//! the configured chain instead of probing an endpoint.

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{ChainId, Connection};
use crate::error::ConnectError;
use crate::port::Connector;

/// A wallet backend that is not present.
pub struct UnavailableConnector {
    name: String,
}

impl UnavailableConnector {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Connector for UnavailableConnector {
    fn name(&self) -> &str {
        &self.name
    }

    async fn activate(&self) -> Result<Connection, ConnectError> {
        Err(ConnectError::Unavailable(format!(
            "{} requires a browser host",
            self.name
        )))
    }

    async fn connect_eagerly(&self) -> Result<Connection, ConnectError> {
        Err(ConnectError::NoSession)
    }
}

/// Read-only chain context without an endpoint.
pub struct StaticNetworkConnector {
    chains: HashSet<ChainId>,
    chain_id: Mutex<ChainId>,
}

impl StaticNetworkConnector {
    #[must_use]
    pub fn new(chains: impl IntoIterator<Item = ChainId>, default_chain: ChainId) -> Self {
        Self {
            chains: chains.into_iter().collect(),
            chain_id: Mutex::new(default_chain),
        }
    }
}

#[async_trait]
impl Connector for StaticNetworkConnector {
    fn name(&self) -> &str {
        "network"
    }

    async fn activate(&self) -> Result<Connection, ConnectError> {
        Ok(Connection::read_only(*self.chain_id.lock()))
    }

    async fn switch_chain(&self, chain_id: ChainId) -> Result<Connection, ConnectError> {
        if !self.chains.contains(&chain_id) {
            return Err(ConnectError::UnsupportedChain(chain_id));
        }
        *self.chain_id.lock() = chain_id;
        Ok(Connection::read_only(chain_id))
    }
}
