//! Token state reads: balances, allowances and permit support.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;

use crate::domain::{Currency, CurrencyAmount, PermitSupport};
use crate::error::ApprovalError;

/// Port for reading ERC-20 and native balances and authorization state.
///
/// # Errors
///
/// Read failures are reported as [`ApprovalError::Read`].
#[async_trait]
pub trait AllowanceReader: Send + Sync {
    /// Amount `spender` may move on behalf of `owner`.
    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, ApprovalError>;

    /// Balance of `owner` in `currency` (native or token).
    async fn balance(
        &self,
        currency: &Currency,
        owner: Address,
    ) -> Result<CurrencyAmount, ApprovalError>;

    /// Whether the token implements EIP-2612. Never fails; unreadable
    /// tokens report [`PermitSupport::Unsupported`].
    async fn permit_support(&self, token: Address) -> PermitSupport;

    /// Current EIP-2612 nonce of `owner`.
    async fn nonce(&self, token: Address, owner: Address) -> Result<U256, ApprovalError>;

    /// Token `name()`, used as the EIP-712 domain name.
    async fn name(&self, token: Address) -> Result<String, ApprovalError>;
}
