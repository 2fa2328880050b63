//! ERC-20 token reads over JSON-RPC.

use alloy_primitives::{Address, U256};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_sol_types::sol;
use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::domain::{Currency, CurrencyAmount, PermitSupport};
use crate::error::ApprovalError;
use crate::port::AllowanceReader;

sol! {
    #[sol(rpc)]
    contract IERC20Permit {
        function allowance(address owner, address spender) external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function name() external view returns (string);
        function nonces(address owner) external view returns (uint256);
        function DOMAIN_SEPARATOR() external view returns (bytes32);
    }
}

/// Reads balances, allowances and permit data from one chain.
pub struct Erc20Reader {
    rpc_url: Url,
}

impl Erc20Reader {
    #[must_use]
    pub fn new(rpc_url: Url) -> Self {
        Self { rpc_url }
    }
}

fn read_error(what: &str, e: impl std::fmt::Display) -> ApprovalError {
    ApprovalError::Read(format!("failed to read {what}: {e}"))
}

#[async_trait]
impl AllowanceReader for Erc20Reader {
    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, ApprovalError> {
        let provider = ProviderBuilder::new().connect_http(self.rpc_url.clone());
        IERC20Permit::new(token, &provider)
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| read_error("allowance", e))
    }

    async fn balance(
        &self,
        currency: &Currency,
        owner: Address,
    ) -> Result<CurrencyAmount, ApprovalError> {
        let provider = ProviderBuilder::new().connect_http(self.rpc_url.clone());
        let raw = match currency.address() {
            None => provider
                .get_balance(owner)
                .await
                .map_err(|e| read_error("native balance", e))?,
            Some(token) => IERC20Permit::new(token, &provider)
                .balanceOf(owner)
                .call()
                .await
                .map_err(|e| read_error("balance", e))?,
        };
        Ok(CurrencyAmount::from_raw(currency.clone(), raw))
    }

    async fn permit_support(&self, token: Address) -> PermitSupport {
        let provider = ProviderBuilder::new().connect_http(self.rpc_url.clone());
        let contract = IERC20Permit::new(token, &provider);
        let separator = contract.DOMAIN_SEPARATOR();
        let nonces = contract.nonces(Address::ZERO);
        let (separator, nonces) = tokio::join!(separator.call(), nonces.call());
        let support = if separator.is_ok() && nonces.is_ok() {
            PermitSupport::Supported
        } else {
            PermitSupport::Unsupported
        };
        debug!(token = %token, support = ?support, "Probed permit support");
        support
    }

    async fn nonce(&self, token: Address, owner: Address) -> Result<U256, ApprovalError> {
        let provider = ProviderBuilder::new().connect_http(self.rpc_url.clone());
        IERC20Permit::new(token, &provider)
            .nonces(owner)
            .call()
            .await
            .map_err(|e| read_error("nonce", e))
    }

    async fn name(&self, token: Address) -> Result<String, ApprovalError> {
        let provider = ProviderBuilder::new().connect_http(self.rpc_url.clone());
        IERC20Permit::new(token, &provider)
            .name()
            .call()
            .await
            .map_err(|e| read_error("token name", e))
    }
}
