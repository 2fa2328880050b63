//! Recording [`TxEventHandler`] for asserting host callbacks.

use parking_lot::Mutex;

use crate::domain::{TransactionInfo, TransactionType, TxHash};
use crate::error::SubmissionError;
use crate::port::TxEventHandler;

/// One host callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxEvent {
    Submitted(TxHash, TransactionType),
    Succeeded(TxHash, TransactionType),
    Failed(Option<TxHash>, TransactionType, SubmissionError),
}

/// Captures every callback in order.
#[derive(Default)]
pub struct RecordingHandler {
    events: Mutex<Vec<TxEvent>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TxEvent> {
        self.events.lock().clone()
    }
}

impl TxEventHandler for RecordingHandler {
    fn on_tx_submit(&self, hash: TxHash, info: &TransactionInfo) {
        self.events
            .lock()
            .push(TxEvent::Submitted(hash, info.transaction_type()));
    }

    fn on_tx_success(&self, hash: TxHash, info: &TransactionInfo) {
        self.events
            .lock()
            .push(TxEvent::Succeeded(hash, info.transaction_type()));
    }

    fn on_tx_fail(&self, hash: Option<TxHash>, info: &TransactionInfo, error: &SubmissionError) {
        self.events.lock().push(TxEvent::Failed(
            hash,
            info.transaction_type(),
            error.clone(),
        ));
    }
}
