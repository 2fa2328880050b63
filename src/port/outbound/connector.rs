//! Wallet connector port.
//!
//! A connector wraps one wallet backend (a host-supplied provider, an
//! injected browser provider, a remote wallet, or a read-only JSON-RPC
//! endpoint). The registry owns every connector and tracks its live
//! [`ConnectionState`](crate::domain::ConnectionState); connectors themselves
//! are stateless from the registry's point of view.

use async_trait::async_trait;

use crate::domain::{ChainId, Connection};
use crate::error::ConnectError;

/// Port for a wallet backend.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait Connector: Send + Sync {
    /// Connector name for logging and display.
    fn name(&self) -> &str;

    /// Request a connection, prompting the user when the backend needs to.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError`] if the user rejects the request or the
    /// backend is unreachable.
    async fn activate(&self) -> Result<Connection, ConnectError>;

    /// Restore a previously authorized session without prompting.
    ///
    /// Defaults to [`Connector::activate`] for backends that never prompt.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::NoSession`] when nothing can be restored.
    async fn connect_eagerly(&self) -> Result<Connection, ConnectError> {
        self.activate().await
    }

    /// Ask the backend to move to another chain.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::UnsupportedChain`] by default.
    async fn switch_chain(&self, chain_id: ChainId) -> Result<Connection, ConnectError> {
        Err(ConnectError::UnsupportedChain(chain_id))
    }
}
