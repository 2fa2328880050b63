use std::sync::Arc;

use swapwidget::application::{ConnectorRegistry, Connectors};
use swapwidget::port::Connector;
use swapwidget::testkit::connector::ScriptedConnector;

/// Scripted backends for every connector slot, kept so tests can inspect
/// call counters after the registry has used them.
pub struct Backends {
    pub user: Option<Arc<ScriptedConnector>>,
    pub injected: Arc<ScriptedConnector>,
    pub remote_popup: Arc<ScriptedConnector>,
    pub remote_qr: Arc<ScriptedConnector>,
    pub network: Arc<ScriptedConnector>,
}

impl Backends {
    /// No wallet anywhere; the network connector serves mainnet read-only.
    pub fn headless() -> Self {
        Self {
            user: None,
            injected: Arc::new(ScriptedConnector::no_session("injected")),
            remote_popup: Arc::new(ScriptedConnector::no_session("remote-popup")),
            remote_qr: Arc::new(ScriptedConnector::no_session("remote-qr")),
            network: Arc::new(ScriptedConnector::read_only("network", 1)),
        }
    }

    /// An injected wallet with a previously authorized session on `chain_id`.
    pub fn injected_wallet(chain_id: u64) -> Self {
        Self {
            injected: Arc::new(ScriptedConnector::wallet("injected", chain_id)),
            ..Self::headless()
        }
    }

    pub fn with_user(mut self, user: ScriptedConnector) -> Self {
        self.user = Some(Arc::new(user));
        self
    }

    pub fn with_network(mut self, network: ScriptedConnector) -> Self {
        self.network = Arc::new(network);
        self
    }

    pub fn with_remote_popup(mut self, popup: ScriptedConnector) -> Self {
        self.remote_popup = Arc::new(popup);
        self
    }

    pub fn user_connector(&self) -> Option<Arc<dyn Connector>> {
        self.user
            .clone()
            .map(|user| user as Arc<dyn Connector>)
    }

    pub fn connectors(&self) -> Connectors {
        Connectors {
            user: self.user_connector(),
            injected: self.injected.clone(),
            remote_popup: self.remote_popup.clone(),
            remote_qr: self.remote_qr.clone(),
            network: self.network.clone(),
        }
    }

    pub fn registry(&self) -> ConnectorRegistry {
        ConnectorRegistry::new(self.connectors())
    }
}
