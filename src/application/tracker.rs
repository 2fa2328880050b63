//! In-memory log of transactions submitted by the widget.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::domain::{TransactionInfo, TxHash, TxStatus};
use crate::port::TransactionTracker;

/// A submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub hash: TxHash,
    pub info: TransactionInfo,
    pub status: TxStatus,
    pub added_at: DateTime<Utc>,
}

/// Transactions keyed by hash.
///
/// Also serves as a [`TransactionTracker`] for hosts that report receipts
/// themselves through [`TransactionLog::set_status`].
#[derive(Debug, Default)]
pub struct TransactionLog {
    transactions: RwLock<HashMap<TxHash, Transaction>>,
}

impl TransactionLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly submitted transaction as pending.
    pub fn add(&self, hash: TxHash, info: TransactionInfo) {
        self.transactions.write().insert(
            hash,
            Transaction {
                hash,
                info,
                status: TxStatus::Pending,
                added_at: Utc::now(),
            },
        );
    }

    /// Update a transaction's status.
    ///
    /// Returns the transaction when this call moved it to a final status;
    /// repeated or unknown updates return `None`.
    pub fn set_status(&self, hash: TxHash, status: TxStatus) -> Option<Transaction> {
        let mut transactions = self.transactions.write();
        let transaction = transactions.get_mut(&hash)?;
        if transaction.status.is_final() || transaction.status == status {
            return None;
        }
        transaction.status = status;
        status.is_final().then(|| transaction.clone())
    }

    #[must_use]
    pub fn get(&self, hash: &TxHash) -> Option<Transaction> {
        self.transactions.read().get(hash).cloned()
    }

    /// Hashes of transactions still pending, oldest first.
    #[must_use]
    pub fn pending(&self) -> Vec<TxHash> {
        let transactions = self.transactions.read();
        let mut pending: Vec<_> = transactions
            .values()
            .filter(|tx| tx.status == TxStatus::Pending)
            .collect();
        pending.sort_by_key(|tx| tx.added_at);
        pending.into_iter().map(|tx| tx.hash).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.read().is_empty()
    }
}

#[async_trait]
impl TransactionTracker for TransactionLog {
    async fn status(&self, hash: TxHash) -> TxStatus {
        self.transactions
            .read()
            .get(&hash)
            .map_or(TxStatus::Pending, |tx| tx.status)
    }
}
