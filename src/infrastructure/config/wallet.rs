//! User wallet configuration.

use serde::Deserialize;

use crate::error::ConfigError;

/// Kind of provider the host supplies as its own wallet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserProviderKind {
    /// No host wallet; the widget's own connectors are used.
    #[default]
    None,
    /// An EIP-1193 provider injected by the host page.
    Eip1193,
    /// A JSON-RPC provider holding a key (the CLI's local wallet).
    JsonRpc,
    /// A JSON-RPC provider wrapped as EIP-1193. Rejected at validation.
    Bridge,
}

/// `[wallet]` section.
///
/// The private key is loaded from `WALLET_PRIVATE_KEY` at runtime, never
/// from the config file.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    pub provider: UserProviderKind,
    #[serde(skip)]
    pub private_key: Option<String>,
}

impl std::fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletConfig")
            .field("provider", &self.provider)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl WalletConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        match self.provider {
            UserProviderKind::Bridge => Err(ConfigError::InvalidValue {
                field: "wallet.provider",
                reason: "bridged JSON-RPC providers are not supported; use \"json_rpc\""
                    .to_string(),
            }),
            UserProviderKind::JsonRpc if !self.has_private_key() => {
                Err(ConfigError::MissingField {
                    field: "WALLET_PRIVATE_KEY",
                })
            }
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn has_private_key(&self) -> bool {
        self.private_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}
