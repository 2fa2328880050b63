//! Connector registry: one slot per wallet backend, in priority order.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::domain::{
    ChainId, Connection, ConnectionState, ConnectorKind, SlotId, CONNECTOR_PRIORITY,
};
use crate::error::ConnectError;
use crate::port::Connector;

static NEXT_SLOT: AtomicU64 = AtomicU64::new(1);

/// A connector together with its live connection state.
///
/// The state lock is never held across an await point.
pub struct ConnectorSlot {
    id: SlotId,
    kind: ConnectorKind,
    connector: Arc<dyn Connector>,
    state: RwLock<ConnectionState>,
}

impl ConnectorSlot {
    #[must_use]
    pub fn new(kind: ConnectorKind, connector: Arc<dyn Connector>) -> Self {
        Self {
            id: SlotId::new(NEXT_SLOT.fetch_add(1, Ordering::Relaxed)),
            kind,
            connector,
            state: RwLock::new(ConnectionState::default()),
        }
    }

    #[must_use]
    pub fn id(&self) -> SlotId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ConnectorKind {
        self.kind
    }

    #[must_use]
    pub fn connector(&self) -> &Arc<dyn Connector> {
        &self.connector
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state.read().clone()
    }

    /// Activate the connector, recording the outcome in the slot state.
    ///
    /// # Errors
    ///
    /// Returns the connector's error; it is also stored in the state.
    pub async fn activate(&self) -> Result<Connection, ConnectError> {
        self.begin();
        let result = self.connector.activate().await;
        self.finish(&result);
        result
    }

    /// Restore a previous session, recording the outcome in the slot state.
    ///
    /// # Errors
    ///
    /// Returns the connector's error; it is also stored in the state.
    pub async fn connect_eagerly(&self) -> Result<Connection, ConnectError> {
        self.begin();
        let result = self.connector.connect_eagerly().await;
        self.finish(&result);
        result
    }

    /// Switch the connector to another chain.
    ///
    /// A refused switch leaves the previous connection in place.
    ///
    /// # Errors
    ///
    /// Returns the connector's error.
    pub async fn switch_chain(&self, chain_id: ChainId) -> Result<Connection, ConnectError> {
        let previous = self.state();
        self.begin();
        let result = self.connector.switch_chain(chain_id).await;
        match &result {
            Ok(_) => self.finish(&result),
            Err(error) => {
                warn!(kind = %self.kind, chain_id = %chain_id, error = %error, "Chain switch refused");
                *self.state.write() = previous;
            }
        }
        result
    }

    fn begin(&self) {
        let mut state = self.state.write();
        state.is_activating = true;
        state.error = None;
    }

    fn finish(&self, result: &Result<Connection, ConnectError>) {
        let mut state = self.state.write();
        state.is_activating = false;
        match result {
            Ok(connection) => {
                debug!(
                    slot = %self.id,
                    kind = %self.kind,
                    chain_id = %connection.chain_id,
                    "Connector connected"
                );
                state.chain_id = Some(connection.chain_id);
                state.account = connection.account;
                state.error = None;
            }
            Err(error) => {
                warn!(slot = %self.id, kind = %self.kind, error = %error, "Connector failed");
                state.account = None;
                state.error = Some(error.clone());
            }
        }
    }
}

impl fmt::Debug for ConnectorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorSlot")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("connector", &self.connector.name())
            .field("state", &*self.state.read())
            .finish()
    }
}

/// The backends handed to the registry at the composition root.
///
/// Only the user-supplied connector is optional.
#[derive(Clone)]
pub struct Connectors {
    pub user: Option<Arc<dyn Connector>>,
    pub injected: Arc<dyn Connector>,
    pub remote_popup: Arc<dyn Connector>,
    pub remote_qr: Arc<dyn Connector>,
    pub network: Arc<dyn Connector>,
}

impl Connectors {
    fn get(&self, kind: ConnectorKind) -> Option<&Arc<dyn Connector>> {
        match kind {
            ConnectorKind::UserSupplied => self.user.as_ref(),
            ConnectorKind::InjectedProvider => Some(&self.injected),
            ConnectorKind::RemotePopup => Some(&self.remote_popup),
            ConnectorKind::RemoteQr => Some(&self.remote_qr),
            ConnectorKind::ReadOnlyNetwork => Some(&self.network),
        }
    }
}

/// Identity of the set of connector instances in a registry.
///
/// Two registries holding the same instances in the same slots compare
/// equal even if the registry itself was rebuilt.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistryFingerprint(Vec<(ConnectorKind, usize)>);

fn instance_id(connector: &Arc<dyn Connector>) -> usize {
    Arc::as_ptr(connector).cast::<()>() as usize
}

/// Owns every connector slot, ordered by [`CONNECTOR_PRIORITY`].
#[derive(Clone)]
pub struct ConnectorRegistry {
    connectors: Connectors,
    slots: Vec<Arc<ConnectorSlot>>,
}

impl ConnectorRegistry {
    /// Build the registry, dropping absent optional connectors.
    #[must_use]
    pub fn new(connectors: Connectors) -> Self {
        Self::build(connectors, &[])
    }

    /// Rebuild with a different user-supplied connector.
    ///
    /// Slots whose connector instance is unchanged are carried over with
    /// their state.
    #[must_use]
    pub fn with_user(&self, user: Option<Arc<dyn Connector>>) -> Self {
        let connectors = Connectors {
            user,
            ..self.connectors.clone()
        };
        Self::build(connectors, &self.slots)
    }

    fn build(connectors: Connectors, previous: &[Arc<ConnectorSlot>]) -> Self {
        let slots = CONNECTOR_PRIORITY
            .iter()
            .filter_map(|kind| {
                let connector = connectors.get(*kind)?;
                let reused = previous.iter().find(|slot| {
                    slot.kind == *kind && instance_id(&slot.connector) == instance_id(connector)
                });
                Some(match reused {
                    Some(slot) => Arc::clone(slot),
                    None => Arc::new(ConnectorSlot::new(*kind, Arc::clone(connector))),
                })
            })
            .collect();
        Self { connectors, slots }
    }

    /// Slots in priority order, highest first.
    pub fn prioritized(&self) -> impl Iterator<Item = &Arc<ConnectorSlot>> {
        self.slots.iter()
    }

    #[must_use]
    pub fn get(&self, kind: ConnectorKind) -> Option<&Arc<ConnectorSlot>> {
        self.slots.iter().find(|slot| slot.kind == kind)
    }

    #[must_use]
    pub fn fingerprint(&self) -> RegistryFingerprint {
        RegistryFingerprint(
            self.slots
                .iter()
                .map(|slot| (slot.kind, instance_id(&slot.connector)))
                .collect(),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl fmt::Debug for ConnectorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.slots.iter()).finish()
    }
}
