//! Transaction descriptions reported to host event handlers.

use std::fmt;

use alloy_primitives::{Address, U256};

use super::{CurrencyAmount, Trade, TradeType, WrapType};

/// Kind of transaction the widget submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Approval,
    Swap,
    Wrap,
    Unwrap,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Approval => "approval",
            Self::Swap => "swap",
            Self::Wrap => "wrap",
            Self::Unwrap => "unwrap",
        };
        write!(f, "{label}")
    }
}

/// What a submitted transaction does, as handed to host callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionInfo {
    Approval {
        token: Address,
        spender: Address,
        amount: U256,
    },
    ExactInputSwap {
        input: CurrencyAmount,
        expected_output: CurrencyAmount,
        minimum_output: CurrencyAmount,
    },
    ExactOutputSwap {
        output: CurrencyAmount,
        expected_input: CurrencyAmount,
        maximum_input: CurrencyAmount,
    },
    Wrap {
        amount: CurrencyAmount,
    },
    Unwrap {
        amount: CurrencyAmount,
    },
}

impl TransactionInfo {
    #[must_use]
    pub const fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Approval { .. } => TransactionType::Approval,
            Self::ExactInputSwap { .. } | Self::ExactOutputSwap { .. } => TransactionType::Swap,
            Self::Wrap { .. } => TransactionType::Wrap,
            Self::Unwrap { .. } => TransactionType::Unwrap,
        }
    }

    /// Describe a swap of `trade` under the given slippage bounds.
    #[must_use]
    pub fn swap(trade: &Trade, minimum_output: CurrencyAmount, maximum_input: CurrencyAmount) -> Self {
        match trade.trade_type() {
            TradeType::ExactInput => Self::ExactInputSwap {
                input: trade.input_amount().clone(),
                expected_output: trade.output_amount().clone(),
                minimum_output,
            },
            TradeType::ExactOutput => Self::ExactOutputSwap {
                output: trade.output_amount().clone(),
                expected_input: trade.input_amount().clone(),
                maximum_input,
            },
        }
    }

    #[must_use]
    pub fn wrap(wrap_type: WrapType, amount: CurrencyAmount) -> Self {
        match wrap_type {
            WrapType::Wrap => Self::Wrap { amount },
            WrapType::Unwrap => Self::Unwrap { amount },
        }
    }
}

/// Status of a tracked transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxStatus {
    Pending,
    Confirmed,
    Failed,
}

impl TxStatus {
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }
}
