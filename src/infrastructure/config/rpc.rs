//! JSON-RPC connection map: endpoints per chain.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use url::Url;

use crate::domain::ChainId;
use crate::error::ConfigError;

/// `[json_rpc]` table keyed by chain id.
///
/// ```toml
/// [json_rpc]
/// 1 = ["https://eth.llamarpc.com"]
/// 10 = ["https://mainnet.optimism.io"]
/// ```
///
/// Endpoints are tried in order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct JsonRpcConfig(BTreeMap<String, Vec<Url>>);

impl JsonRpcConfig {
    /// Endpoints keyed by parsed chain id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for keys that are not chain ids.
    pub fn endpoints(&self) -> Result<HashMap<ChainId, Vec<Url>>, ConfigError> {
        self.0
            .iter()
            .map(|(key, urls)| {
                let id = key.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    field: "json_rpc",
                    reason: format!("\"{key}\" is not a chain id"),
                })?;
                Ok((ChainId::new(id), urls.clone()))
            })
            .collect()
    }

    /// First endpoint for a chain.
    #[must_use]
    pub fn primary(&self, chain_id: ChainId) -> Option<&Url> {
        self.0
            .get(&chain_id.to_string())
            .and_then(|urls| urls.first())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        json_rpc: JsonRpcConfig,
    }

    fn parse(toml: &str) -> JsonRpcConfig {
        toml::from_str::<Wrapper>(toml).unwrap().json_rpc
    }

    #[test]
    fn parses_chain_keys() {
        let config = parse(
            r#"
            [json_rpc]
            1 = ["http://localhost:8545", "http://backup:8545"]
            137 = ["http://polygon:8545"]
            "#,
        );
        let endpoints = config.endpoints().unwrap();
        assert_eq!(endpoints[&ChainId::new(1)].len(), 2);
        assert_eq!(
            config.primary(ChainId::new(1)).map(Url::as_str),
            Some("http://localhost:8545/")
        );
        assert!(config.primary(ChainId::new(10)).is_none());
    }

    #[test]
    fn non_numeric_key_is_invalid() {
        let config = parse(
            r#"
            [json_rpc]
            mainnet = ["http://localhost:8545"]
            "#,
        );
        assert!(matches!(
            config.endpoints(),
            Err(ConfigError::InvalidValue { field: "json_rpc", .. })
        ));
    }
}
