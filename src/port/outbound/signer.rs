//! Off-chain permit signing port.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;

use crate::domain::{ChainId, SignatureData};
use crate::error::ApprovalError;

/// Everything needed to sign an EIP-2612 `Permit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermitRequest {
    pub chain_id: ChainId,
    pub token: Address,
    /// EIP-712 domain name of the token.
    pub token_name: String,
    pub owner: Address,
    pub spender: Address,
    pub amount: U256,
    pub nonce: U256,
    /// Unix timestamp.
    pub deadline: u64,
}

/// Port for requesting permit signatures from the wallet.
#[async_trait]
pub trait PermitSigner: Send + Sync {
    /// Sign a permit.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Rejected`] if the user declines and
    /// [`ApprovalError::Signer`] for signer failures.
    async fn sign_permit(&self, request: &PermitRequest) -> Result<SignatureData, ApprovalError>;
}
