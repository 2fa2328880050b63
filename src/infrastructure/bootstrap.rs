//! Composition root: builds connectors and host handlers from configuration.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::headless::{StaticNetworkConnector, UnavailableConnector};
use crate::adapter::outbound::log::LogEventHandler;
use crate::application::{ConnectorRegistry, Connectors};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::wallet::UserProviderKind;
use crate::port::{Connector, TxEventHandlers};

/// Build event handlers: every host gets transaction logging.
#[must_use]
pub fn build_event_handlers() -> TxEventHandlers {
    let mut handlers = TxEventHandlers::new();
    handlers.register(Box::new(LogEventHandler));
    handlers
}

#[cfg(feature = "onchain")]
fn network_connector(config: &Config) -> Result<Arc<dyn Connector>> {
    use crate::adapter::outbound::onchain::NetworkConnector;

    let endpoints = config.json_rpc.endpoints()?;
    if endpoints.is_empty() {
        warn!("No JSON-RPC endpoints configured, network connector trusts the default chain");
        return Ok(Arc::new(StaticNetworkConnector::new(
            config.router.supported_chains.iter().copied(),
            config.default_chain_id,
        )));
    }
    Ok(Arc::new(NetworkConnector::new(endpoints, config.default_chain_id)))
}

#[cfg(not(feature = "onchain"))]
fn network_connector(config: &Config) -> Result<Arc<dyn Connector>> {
    Ok(Arc::new(StaticNetworkConnector::new(
        config.router.supported_chains.iter().copied(),
        config.default_chain_id,
    )))
}

#[cfg(feature = "onchain")]
fn json_rpc_wallet(config: &Config, private_key: &str) -> Result<Arc<dyn Connector>> {
    use crate::adapter::outbound::onchain::LocalWallet;

    let wallet =
        LocalWallet::from_private_key(private_key, config.json_rpc.endpoints()?, config.default_chain_id)?;
    info!(address = %wallet.address(), "Local wallet configured");
    Ok(Arc::new(wallet))
}

#[cfg(not(feature = "onchain"))]
fn json_rpc_wallet(_config: &Config, _private_key: &str) -> Result<Arc<dyn Connector>> {
    Err(crate::error::ConfigError::InvalidValue {
        field: "wallet.provider",
        reason: "json_rpc wallets require the onchain feature".to_string(),
    }
    .into())
}

/// The host-supplied connector, if the configuration names one.
fn user_connector(config: &Config) -> Result<Option<Arc<dyn Connector>>> {
    match (config.wallet.provider, config.wallet.private_key.as_deref()) {
        (UserProviderKind::JsonRpc, Some(key)) => json_rpc_wallet(config, key).map(Some),
        (UserProviderKind::Eip1193, _) => {
            warn!("EIP-1193 providers are injected by a browser host, ignoring");
            Ok(None)
        }
        _ => Ok(None),
    }
}

/// Build every connector slot from configuration.
///
/// # Errors
///
/// Returns an error if the JSON-RPC map or the wallet key is invalid.
pub fn build_connectors(config: &Config) -> Result<Connectors> {
    Ok(Connectors {
        user: user_connector(config)?,
        injected: Arc::new(UnavailableConnector::new("injected")),
        remote_popup: Arc::new(UnavailableConnector::new("remote-popup")),
        remote_qr: Arc::new(UnavailableConnector::new("remote-qr")),
        network: network_connector(config)?,
    })
}

/// Build the connector registry from configuration.
///
/// # Errors
///
/// Returns an error if the connectors cannot be built.
pub fn build_registry(config: &Config) -> Result<ConnectorRegistry> {
    let registry = ConnectorRegistry::new(build_connectors(config)?);
    info!(connectors = registry.len(), "Connector registry built");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConnectorKind;

    #[test]
    fn default_config_has_no_user_connector() {
        let registry = build_registry(&Config::default()).unwrap();
        assert!(registry.get(ConnectorKind::UserSupplied).is_none());
        assert!(registry.get(ConnectorKind::ReadOnlyNetwork).is_some());
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn handlers_include_logging() {
        assert_eq!(build_event_handlers().len(), 1);
    }
}
