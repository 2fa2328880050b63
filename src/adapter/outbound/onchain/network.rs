//! Read-only network connector backed by JSON-RPC endpoints.

use std::collections::HashMap;

use alloy_provider::{Provider, ProviderBuilder};
use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{ChainId, Connection};
use crate::error::ConnectError;
use crate::port::Connector;

/// Provides chain context without an account.
///
/// Endpoints for a chain are tried in order until one answers with the
/// expected chain id.
pub struct NetworkConnector {
    endpoints: HashMap<ChainId, Vec<Url>>,
    chain_id: Mutex<ChainId>,
}

impl NetworkConnector {
    #[must_use]
    pub fn new(endpoints: HashMap<ChainId, Vec<Url>>, default_chain: ChainId) -> Self {
        Self {
            endpoints,
            chain_id: Mutex::new(default_chain),
        }
    }

    /// Chains with at least one endpoint.
    pub fn chains(&self) -> impl Iterator<Item = ChainId> + '_ {
        self.endpoints
            .iter()
            .filter(|(_, urls)| !urls.is_empty())
            .map(|(chain_id, _)| *chain_id)
    }

    async fn probe(&self, chain_id: ChainId) -> Result<Connection, ConnectError> {
        let urls = self
            .endpoints
            .get(&chain_id)
            .filter(|urls| !urls.is_empty())
            .ok_or(ConnectError::UnsupportedChain(chain_id))?;

        let mut last_error = None;
        for url in urls {
            let provider = ProviderBuilder::new().connect_http(url.clone());
            match provider.get_chain_id().await {
                Ok(reported) if reported == chain_id.value() => {
                    debug!(chain_id = %chain_id, url = %url, "Network endpoint ready");
                    return Ok(Connection::read_only(chain_id));
                }
                Ok(reported) => {
                    warn!(url = %url, expected = %chain_id, reported, "Endpoint serves another chain");
                    last_error = Some(format!("{url} serves chain {reported}"));
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "Endpoint unreachable");
                    last_error = Some(e.to_string());
                }
            }
        }
        Err(ConnectError::Provider(
            last_error.unwrap_or_else(|| "no endpoint answered".to_string()),
        ))
    }
}

#[async_trait]
impl Connector for NetworkConnector {
    fn name(&self) -> &str {
        "network"
    }

    async fn activate(&self) -> Result<Connection, ConnectError> {
        let chain_id = *self.chain_id.lock();
        self.probe(chain_id).await
    }

    async fn switch_chain(&self, chain_id: ChainId) -> Result<Connection, ConnectError> {
        let connection = self.probe(chain_id).await?;
        *self.chain_id.lock() = chain_id;
        Ok(connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn chain_without_endpoint_is_unsupported() {
        let connector = NetworkConnector::new(HashMap::new(), ChainId::new(1));
        assert_eq!(
            connector.activate().await,
            Err(ConnectError::UnsupportedChain(ChainId::new(1)))
        );
    }

    #[test]
    fn chains_skip_empty_endpoint_lists() {
        let mut endpoints = HashMap::new();
        endpoints.insert(ChainId::new(1), vec![Url::parse("http://localhost:8545").unwrap()]);
        endpoints.insert(ChainId::new(10), Vec::new());
        let connector = NetworkConnector::new(endpoints, ChainId::new(1));
        assert_eq!(connector.chains().collect::<Vec<_>>(), vec![ChainId::new(1)]);
    }
}
