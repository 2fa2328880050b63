//! Quote routing port.

use async_trait::async_trait;

use crate::domain::{ChainId, Currency, CurrencyAmount, Trade, TradeType};
use crate::error::RouteError;

/// A request for a quote.
///
/// `amount` is denominated in the fixed side of the trade: the input
/// currency for exact-input trades, the output currency for exact-output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub trade_type: TradeType,
    pub amount: CurrencyAmount,
    /// The currency on the other side of the trade.
    pub other: Currency,
}

impl QuoteRequest {
    #[must_use]
    pub fn new(trade_type: TradeType, amount: CurrencyAmount, other: Currency) -> Self {
        Self {
            trade_type,
            amount,
            other,
        }
    }

    #[must_use]
    pub fn chain_id(&self) -> ChainId {
        self.amount.currency().chain_id()
    }

    #[must_use]
    pub fn input_currency(&self) -> &Currency {
        match self.trade_type {
            TradeType::ExactInput => self.amount.currency(),
            TradeType::ExactOutput => &self.other,
        }
    }

    #[must_use]
    pub fn output_currency(&self) -> &Currency {
        match self.trade_type {
            TradeType::ExactInput => &self.other,
            TradeType::ExactOutput => self.amount.currency(),
        }
    }
}

/// Port for the on-chain routing service.
#[async_trait]
pub trait QuoteRouter: Send + Sync {
    /// Quote a trade.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::NotFound`] if there is no path between the
    /// currencies and [`RouteError::UnsupportedChain`] for chains the router
    /// does not serve.
    async fn route(&self, request: &QuoteRequest) -> Result<Trade, RouteError>;
}
