//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file; the wallet key comes from the
//! `WALLET_PRIVATE_KEY` environment variable only.
//!
//! # Example
//!
//! ```no_run
//! use swapwidget::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::rpc::JsonRpcConfig;
use super::swap::{RouterConfig, SwapConfig};
use super::wallet::WalletConfig;
use crate::domain::{ChainId, SupportedChain};
use crate::error::{ConfigError, Result};

const fn default_chain_id() -> ChainId {
    ChainId::new(1)
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every section is optional.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Chain the read-only network connector starts on.
    #[serde(default = "default_chain_id")]
    pub default_chain_id: ChainId,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// JSON-RPC endpoints per chain.
    #[serde(default)]
    pub json_rpc: JsonRpcConfig,

    /// Swap execution settings.
    #[serde(default)]
    pub swap: SwapConfig,

    /// Routing service settings.
    #[serde(default)]
    pub router: RouterConfig,

    /// Host wallet settings.
    #[serde(default)]
    pub wallet: WalletConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_chain_id: default_chain_id(),
            logging: LoggingConfig::default(),
            json_rpc: JsonRpcConfig::default(),
            swap: SwapConfig::default(),
            router: RouterConfig::default(),
            wallet: WalletConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Loads the private key from the `WALLET_PRIVATE_KEY` environment
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        // Never from the config file.
        config.wallet.private_key = std::env::var("WALLET_PRIVATE_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if SupportedChain::from_id(self.default_chain_id).is_none() {
            return Err(ConfigError::InvalidValue {
                field: "default_chain_id",
                reason: format!("chain {} is not supported", self.default_chain_id),
            }
            .into());
        }
        self.logging.validate()?;
        self.json_rpc.endpoints()?;
        self.swap.validate()?;
        self.router.validate()?;
        self.wallet.validate()?;
        Ok(())
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
