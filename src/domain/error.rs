//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new`/`parse` constructors and by
//! arithmetic that requires matching currencies.
//!
//! # Examples
//!
//! ```
//! use swapwidget::domain::{ChainId, Currency, CurrencyAmount, DomainError};
//!
//! let eth = Currency::native(ChainId::new(1)).unwrap();
//! let result = CurrencyAmount::parse(eth, "1.0000000000000000001");
//!
//! assert!(matches!(result, Err(DomainError::InvalidAmount { .. })));
//! ```

use thiserror::Error;

use super::ChainId;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Two amounts of different currencies were compared or combined.
    #[error("currency mismatch: {left} vs {right}")]
    CurrencyMismatch {
        /// Symbol of the left-hand currency.
        left: String,
        /// Symbol of the right-hand currency.
        right: String,
    },

    /// An amount string could not be parsed exactly.
    #[error("invalid amount '{input}': {reason}")]
    InvalidAmount {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A trade must swap between two distinct currencies.
    #[error("trade input and output are the same currency")]
    SameCurrency,

    /// A trade must stay on a single chain.
    #[error("trade spans chains {input} and {output}")]
    CrossChainTrade {
        /// Chain of the input currency.
        input: ChainId,
        /// Chain of the output currency.
        output: ChainId,
    },

    /// Slippage tolerance must be a non-negative fraction.
    #[error("slippage must be non-negative, got {slippage}")]
    NegativeSlippage {
        /// The rejected tolerance.
        slippage: rust_decimal::Decimal,
    },

    /// The chain has no entry in the chain table.
    #[error("unsupported chain {0}")]
    UnsupportedChain(ChainId),
}
