//! Recording wallet mocks: [`ScriptedSigner`] and [`ScriptedSender`].

use std::sync::Arc;

use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::domain::{SignatureData, TxHash};
use crate::error::{ApprovalError, SubmissionError};
use crate::port::{PermitRequest, PermitSigner, TransactionRequest, TransactionSender};

// ---------------------------------------------------------------------------
// ScriptedSigner
// ---------------------------------------------------------------------------

/// Signs every permit with a fixed signature, or refuses.
#[derive(Default)]
pub struct ScriptedSigner {
    rejecting: bool,
    requests: Mutex<Vec<PermitRequest>>,
}

impl ScriptedSigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        Self {
            rejecting: true,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<PermitRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl PermitSigner for ScriptedSigner {
    async fn sign_permit(&self, request: &PermitRequest) -> Result<SignatureData, ApprovalError> {
        self.requests.lock().push(request.clone());
        if self.rejecting {
            return Err(ApprovalError::Rejected);
        }
        let mut signature = vec![0x11; 64];
        signature.push(27);
        Ok(SignatureData {
            token: request.token,
            owner: request.owner,
            spender: request.spender,
            amount: request.amount,
            nonce: request.nonce,
            deadline: request.deadline,
            signature: Bytes::from(signature),
        })
    }
}

// ---------------------------------------------------------------------------
// ScriptedSender
// ---------------------------------------------------------------------------

/// Accepts transactions with sequential hashes, or refuses them.
///
/// A gated sender holds every transaction until the returned [`Notify`]
/// fires, which keeps a submission in flight for concurrency tests.
#[derive(Default)]
pub struct ScriptedSender {
    rejection: Option<String>,
    gate: Option<Arc<Notify>>,
    sent: Mutex<Vec<(Address, TransactionRequest)>>,
}

impl ScriptedSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(reason: &str) -> Self {
        Self {
            rejection: Some(reason.to_string()),
            ..Self::default()
        }
    }

    pub fn gated() -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let sender = Self {
            gate: Some(Arc::clone(&gate)),
            ..Self::default()
        };
        (sender, gate)
    }

    /// Transactions received, in order.
    pub fn sent(&self) -> Vec<(Address, TransactionRequest)> {
        self.sent.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().len()
    }

    /// Hash the n-th accepted transaction receives (1-based).
    pub fn hash(n: u8) -> TxHash {
        B256::with_last_byte(n)
    }
}

#[async_trait]
impl TransactionSender for ScriptedSender {
    async fn send(
        &self,
        from: Address,
        request: &TransactionRequest,
    ) -> Result<TxHash, SubmissionError> {
        let n = {
            let mut sent = self.sent.lock();
            sent.push((from, request.clone()));
            sent.len()
        };
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.rejection {
            Some(reason) => Err(SubmissionError::Rejected(reason.clone())),
            None => Ok(Self::hash(u8::try_from(n).unwrap_or(u8::MAX))),
        }
    }
}
