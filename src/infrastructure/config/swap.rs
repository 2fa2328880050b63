//! Swap and routing configuration.

use alloy_primitives::{address, Address};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::SwapSettings;
use crate::domain::{default_auto_slippage, ChainId, SupportedChain};
use crate::error::ConfigError;

/// Uniswap `SwapRouter02`, deployed at the same address on most chains.
const SWAP_ROUTER_02: Address = address!("0x68b3465833fb72a70ecdf485e0e4c7bd8665fc45");

/// `[swap]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SwapConfig {
    /// Router contract authorized to spend the input token.
    pub spender: Address,
    /// Tolerance applied while slippage is automatic (0.005 = 0.5%).
    pub default_slippage: Decimal,
    /// Largest tolerance a user may set.
    pub max_slippage: Decimal,
    /// Prefer EIP-2612 permits over approval transactions.
    pub permit_enabled: bool,
    /// Lifetime of a permit signature in seconds.
    pub permit_deadline_secs: u64,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            spender: SWAP_ROUTER_02,
            default_slippage: default_auto_slippage(),
            max_slippage: Decimal::new(5, 1),
            permit_enabled: true,
            permit_deadline_secs: 30 * 60,
        }
    }
}

impl SwapConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.spender == Address::ZERO {
            return Err(ConfigError::MissingField {
                field: "swap.spender",
            });
        }
        if self.max_slippage <= Decimal::ZERO || self.max_slippage > Decimal::new(5, 1) {
            return Err(ConfigError::InvalidValue {
                field: "swap.max_slippage",
                reason: "must be greater than 0 and at most 0.5".to_string(),
            });
        }
        if self.default_slippage < Decimal::ZERO || self.default_slippage > self.max_slippage {
            return Err(ConfigError::InvalidValue {
                field: "swap.default_slippage",
                reason: "must be between 0 and max_slippage".to_string(),
            });
        }
        if self.permit_deadline_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "swap.permit_deadline_secs",
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Session settings for these values.
    #[must_use]
    pub fn settings(&self) -> SwapSettings {
        SwapSettings {
            spender: self.spender,
            auto_slippage: self.default_slippage,
            max_slippage: self.max_slippage,
            permit_enabled: self.permit_enabled,
            permit_deadline_secs: self.permit_deadline_secs,
        }
    }
}

/// `[router]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Chains the routing service quotes on.
    pub supported_chains: Vec<ChainId>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            supported_chains: SupportedChain::all().map(SupportedChain::id).collect(),
        }
    }
}

impl RouterConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.supported_chains.is_empty() {
            return Err(ConfigError::MissingField {
                field: "router.supported_chains",
            });
        }
        if let Some(unknown) = self
            .supported_chains
            .iter()
            .find(|id| SupportedChain::from_id(**id).is_none())
        {
            return Err(ConfigError::InvalidValue {
                field: "router.supported_chains",
                reason: format!("chain {unknown} is not supported"),
            });
        }
        Ok(())
    }
}
