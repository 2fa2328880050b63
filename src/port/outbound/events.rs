//! Host transaction event handlers.
//!
//! The host application observes submitted transactions through these
//! callbacks. They are invoked only by the submission dispatcher and never
//! for local validation failures such as a disabled action.

use crate::domain::{TransactionInfo, TxHash};
use crate::error::SubmissionError;

/// Trait for host transaction callbacks.
///
/// Every method defaults to a no-op so hosts implement only what they use.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - Callbacks should return quickly; spawn a task for slow work
pub trait TxEventHandler: Send + Sync {
    /// The wallet accepted a transaction.
    fn on_tx_submit(&self, _hash: TxHash, _info: &TransactionInfo) {}

    /// A submitted transaction was confirmed.
    fn on_tx_success(&self, _hash: TxHash, _info: &TransactionInfo) {}

    /// Submission failed, or a submitted transaction reverted. `hash` is
    /// `None` when the wallet never produced one.
    fn on_tx_fail(&self, _hash: Option<TxHash>, _info: &TransactionInfo, _error: &SubmissionError) {
    }
}

/// Registry of handlers (composite pattern).
///
/// Broadcasts each callback to all registered handlers.
#[derive(Default)]
pub struct TxEventHandlers {
    handlers: Vec<Box<dyn TxEventHandler>>,
}

impl TxEventHandlers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Box<dyn TxEventHandler>) {
        self.handlers.push(handler);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl TxEventHandler for TxEventHandlers {
    fn on_tx_submit(&self, hash: TxHash, info: &TransactionInfo) {
        for handler in &self.handlers {
            handler.on_tx_submit(hash, info);
        }
    }

    fn on_tx_success(&self, hash: TxHash, info: &TransactionInfo) {
        for handler in &self.handlers {
            handler.on_tx_success(hash, info);
        }
    }

    fn on_tx_fail(&self, hash: Option<TxHash>, info: &TransactionInfo, error: &SubmissionError) {
        for handler in &self.handlers {
            handler.on_tx_fail(hash, info, error);
        }
    }
}

/// A handler that ignores every event.
pub struct NullEventHandler;

impl TxEventHandler for NullEventHandler {}
