//! Eager-connect policy and active connection selection.
//!
//! On initialization a host-supplied connector is activated on its own.
//! Without one, the injected and remote-popup connectors try to restore a
//! session while the read-only network connector is activated, all polled
//! concurrently. Failures never propagate: they are recorded in the slot
//! state and the slot drops out of selection.

use futures_util::future::join_all;
use tracing::{debug, info};

use super::registry::{ConnectorRegistry, RegistryFingerprint};
use crate::domain::{ActiveConnection, ConnectorKind, EAGER_CONNECTORS};

/// Runs the connect policy once per distinct set of connectors.
#[derive(Debug, Default)]
pub struct ConnectorPrioritizer {
    fingerprint: Option<RegistryFingerprint>,
    key: u64,
}

impl ConnectorPrioritizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the connect policy has run.
    #[must_use]
    pub fn key(&self) -> u64 {
        self.key
    }

    /// Run the connect policy if the registry's connector set changed.
    ///
    /// Returns `true` if it ran.
    pub async fn initialize(&mut self, registry: &ConnectorRegistry) -> bool {
        let fingerprint = registry.fingerprint();
        if self.fingerprint.as_ref() == Some(&fingerprint) {
            debug!(key = self.key, "Connector set unchanged, skipping initialization");
            return false;
        }
        self.fingerprint = Some(fingerprint);
        self.key += 1;

        info!(key = self.key, connectors = registry.len(), "Initializing connectors");

        if let Some(user) = registry.get(ConnectorKind::UserSupplied) {
            // Failure is recorded in the slot state.
            let _ = user.activate().await;
            return true;
        }

        let eager = EAGER_CONNECTORS
            .iter()
            .filter_map(|kind| registry.get(*kind))
            .map(|slot| slot.connect_eagerly());
        let network = async {
            if let Some(slot) = registry.get(ConnectorKind::ReadOnlyNetwork) {
                let _ = slot.activate().await;
            }
        };
        let _ = tokio::join!(join_all(eager), network);

        true
    }

    /// The active connection for the current slot states.
    ///
    /// The highest-priority slot with a usable account wins; otherwise the
    /// read-only network connector provides the chain.
    #[must_use]
    pub fn active(&self, registry: &ConnectorRegistry) -> ActiveConnection {
        for slot in registry.prioritized() {
            let state = slot.state();
            if !state.has_account() {
                continue;
            }
            if let (Some(chain_id), Some(account)) = (state.chain_id, state.account) {
                return ActiveConnection::Wallet {
                    kind: slot.kind(),
                    chain_id,
                    account,
                };
            }
        }

        registry
            .get(ConnectorKind::ReadOnlyNetwork)
            .map(|slot| slot.state())
            .filter(|state| state.has_chain())
            .and_then(|state| state.chain_id)
            .map_or(ActiveConnection::Disconnected, |chain_id| {
                ActiveConnection::ReadOnly { chain_id }
            })
    }
}
