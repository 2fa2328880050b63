//! Local private-key wallet.
//!
//! Serves as the host-supplied connector for the CLI: it connects with the
//! key's account, sends transactions through the configured endpoints and
//! signs permits locally.

use std::collections::HashMap;
use std::str::FromStr;

use alloy_primitives::{Address, Bytes};
use alloy_provider::network::{Ethereum, EthereumWallet, Network, ReceiptResponse, TransactionBuilder};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use super::permit::permit_signing_hash;
use crate::domain::{ChainId, Connection, SignatureData, TxHash, TxStatus};
use crate::error::{ApprovalError, ConfigError, ConnectError, SubmissionError};
use crate::port::{
    Connector, PermitRequest, PermitSigner, TransactionRequest, TransactionSender,
    TransactionTracker,
};

/// A wallet holding its own key.
pub struct LocalWallet {
    signer: PrivateKeySigner,
    endpoints: HashMap<ChainId, Vec<Url>>,
    chain_id: Mutex<ChainId>,
}

impl LocalWallet {
    /// Create a wallet from a hex private key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the key is missing or malformed.
    pub fn from_private_key(
        private_key: &str,
        endpoints: HashMap<ChainId, Vec<Url>>,
        chain_id: ChainId,
    ) -> Result<Self, ConfigError> {
        if private_key.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "WALLET_PRIVATE_KEY",
            });
        }
        let signer =
            PrivateKeySigner::from_str(private_key.trim()).map_err(|e| ConfigError::InvalidValue {
                field: "WALLET_PRIVATE_KEY",
                reason: e.to_string(),
            })?;
        Ok(Self {
            signer,
            endpoints,
            chain_id: Mutex::new(chain_id),
        })
    }

    #[must_use]
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    fn endpoint(&self, chain_id: ChainId) -> Option<Url> {
        self.endpoints
            .get(&chain_id)
            .and_then(|urls| urls.first())
            .cloned()
    }

    fn current_endpoint(&self) -> Result<Url, ConnectError> {
        let chain_id = *self.chain_id.lock();
        self.endpoint(chain_id)
            .ok_or(ConnectError::UnsupportedChain(chain_id))
    }

    async fn connect_on(&self, chain_id: ChainId) -> Result<Connection, ConnectError> {
        let url = self
            .endpoint(chain_id)
            .ok_or(ConnectError::UnsupportedChain(chain_id))?;
        let provider = ProviderBuilder::new().connect_http(url);
        let reported = provider
            .get_chain_id()
            .await
            .map_err(|e| ConnectError::Provider(e.to_string()))?;
        if reported != chain_id.value() {
            return Err(ConnectError::Provider(format!(
                "endpoint for chain {chain_id} serves chain {reported}"
            )));
        }
        Ok(Connection::with_account(chain_id, self.signer.address()))
    }
}

#[async_trait]
impl Connector for LocalWallet {
    fn name(&self) -> &str {
        "local"
    }

    async fn activate(&self) -> Result<Connection, ConnectError> {
        let chain_id = *self.chain_id.lock();
        self.connect_on(chain_id).await
    }

    async fn switch_chain(&self, chain_id: ChainId) -> Result<Connection, ConnectError> {
        let connection = self.connect_on(chain_id).await?;
        *self.chain_id.lock() = chain_id;
        info!(chain_id = %chain_id, "Wallet switched chain");
        Ok(connection)
    }
}

#[async_trait]
impl TransactionSender for LocalWallet {
    async fn send(
        &self,
        from: Address,
        request: &TransactionRequest,
    ) -> Result<TxHash, SubmissionError> {
        if from != self.signer.address() {
            return Err(SubmissionError::Rejected(format!(
                "wallet does not hold account {from}"
            )));
        }
        let url = self.current_endpoint()?;
        let calldata: Bytes = request.calldata()?;
        let tx = <Ethereum as Network>::TransactionRequest::default()
            .with_from(from)
            .with_to(request.to())
            .with_input(calldata)
            .with_value(request.value());

        let wallet = EthereumWallet::from(self.signer.clone());
        let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);
        let pending = provider
            .send_transaction(tx)
            .await
            .map_err(|e| SubmissionError::Rejected(e.to_string()))?;
        let hash = *pending.tx_hash();
        debug!(hash = %hash, to = %request.to(), "Transaction broadcast");
        Ok(hash)
    }
}

#[async_trait]
impl TransactionTracker for LocalWallet {
    async fn status(&self, hash: TxHash) -> TxStatus {
        let Ok(url) = self.current_endpoint() else {
            return TxStatus::Pending;
        };
        let provider = ProviderBuilder::new().connect_http(url);
        match provider.get_transaction_receipt(hash).await {
            Ok(Some(receipt)) if receipt.status() => TxStatus::Confirmed,
            Ok(Some(_)) => TxStatus::Failed,
            Ok(None) => TxStatus::Pending,
            Err(e) => {
                warn!(hash = %hash, error = %e, "Receipt lookup failed");
                TxStatus::Pending
            }
        }
    }
}

#[async_trait]
impl PermitSigner for LocalWallet {
    async fn sign_permit(&self, request: &PermitRequest) -> Result<SignatureData, ApprovalError> {
        if request.owner != self.signer.address() {
            return Err(ApprovalError::Signer(format!(
                "wallet does not hold account {}",
                request.owner
            )));
        }
        let hash = permit_signing_hash(request);
        let signature = self
            .signer
            .sign_hash_sync(&hash)
            .map_err(|e| ApprovalError::Signer(e.to_string()))?;
        Ok(SignatureData {
            token: request.token,
            owner: request.owner,
            spender: request.spender,
            amount: request.amount,
            nonce: request.nonce,
            deadline: request.deadline,
            signature: Bytes::from(signature.as_bytes().to_vec()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    fn wallet() -> LocalWallet {
        LocalWallet::from_private_key(KEY, HashMap::new(), ChainId::new(1)).unwrap()
    }

    #[test]
    fn empty_key_is_missing() {
        let result = LocalWallet::from_private_key("  ", HashMap::new(), ChainId::new(1));
        assert!(matches!(result, Err(ConfigError::MissingField { .. })));
    }

    #[test]
    fn malformed_key_is_invalid() {
        let result = LocalWallet::from_private_key("0x1234", HashMap::new(), ChainId::new(1));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[tokio::test]
    async fn switching_to_chain_without_endpoint_fails() {
        assert_eq!(
            wallet().switch_chain(ChainId::new(10)).await,
            Err(ConnectError::UnsupportedChain(ChainId::new(10)))
        );
    }

    #[tokio::test]
    async fn permit_for_foreign_owner_is_refused() {
        let request = PermitRequest {
            chain_id: ChainId::new(1),
            token: Address::repeat_byte(0x11),
            token_name: "USD Coin".to_string(),
            owner: Address::repeat_byte(0x99),
            spender: Address::repeat_byte(0x22),
            amount: U256::from(1u64),
            nonce: U256::ZERO,
            deadline: 1,
        };
        assert!(matches!(
            wallet().sign_permit(&request).await,
            Err(ApprovalError::Signer(_))
        ));
    }

    #[tokio::test]
    async fn permit_signature_is_65_bytes() {
        let wallet = wallet();
        let request = PermitRequest {
            chain_id: ChainId::new(1),
            token: Address::repeat_byte(0x11),
            token_name: "USD Coin".to_string(),
            owner: wallet.address(),
            spender: Address::repeat_byte(0x22),
            amount: U256::from(1u64),
            nonce: U256::ZERO,
            deadline: 1,
        };
        let signature = wallet.sign_permit(&request).await.unwrap();
        assert_eq!(signature.signature.len(), 65);
        assert!(matches!(signature.signature[64], 27 | 28));
    }
}
