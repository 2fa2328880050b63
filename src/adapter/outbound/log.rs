//! Event handler that writes transaction callbacks to the log.

use tracing::{info, warn};

use crate::domain::{TransactionInfo, TxHash};
use crate::error::SubmissionError;
use crate::port::TxEventHandler;

/// Logs every transaction callback.
pub struct LogEventHandler;

impl TxEventHandler for LogEventHandler {
    fn on_tx_submit(&self, hash: TxHash, info: &TransactionInfo) {
        info!(hash = %hash, kind = %info.transaction_type(), "Transaction submitted");
    }

    fn on_tx_success(&self, hash: TxHash, info: &TransactionInfo) {
        info!(hash = %hash, kind = %info.transaction_type(), "Transaction confirmed");
    }

    fn on_tx_fail(&self, hash: Option<TxHash>, info: &TransactionInfo, error: &SubmissionError) {
        match hash {
            Some(hash) => warn!(
                hash = %hash,
                kind = %info.transaction_type(),
                error = %error,
                "Transaction failed"
            ),
            None => warn!(
                kind = %info.transaction_type(),
                error = %error,
                "Transaction refused"
            ),
        }
    }
}
