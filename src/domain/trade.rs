//! Quoted trades produced by the routing service.

use std::fmt;

use alloy_primitives::{Address, Bytes, U256};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::slippage::{add_slippage, remove_slippage};
use super::{Currency, CurrencyAmount, DomainError};

/// Which side of the trade the user fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeType {
    ExactInput,
    ExactOutput,
}

impl TradeType {
    #[must_use]
    pub fn invert(self) -> Self {
        match self {
            Self::ExactInput => Self::ExactOutput,
            Self::ExactOutput => Self::ExactInput,
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactInput => write!(f, "exact_input"),
            Self::ExactOutput => write!(f, "exact_output"),
        }
    }
}

/// Router call produced alongside a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodParameters {
    /// Router contract to call.
    pub to: Address,
    /// ABI-encoded call.
    pub calldata: Bytes,
    /// Native value to attach.
    pub value: U256,
}

/// An immutable quote between two currencies on one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    trade_type: TradeType,
    input: CurrencyAmount,
    output: CurrencyAmount,
    price_impact: Decimal,
    method_parameters: Option<MethodParameters>,
}

impl Trade {
    /// Create a validated trade.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SameCurrency`] if input and output are the same
    /// currency and [`DomainError::CrossChainTrade`] if they live on
    /// different chains.
    pub fn try_new(
        trade_type: TradeType,
        input: CurrencyAmount,
        output: CurrencyAmount,
        price_impact: Decimal,
    ) -> Result<Self, DomainError> {
        if input.currency() == output.currency() {
            return Err(DomainError::SameCurrency);
        }
        let (input_chain, output_chain) =
            (input.currency().chain_id(), output.currency().chain_id());
        if input_chain != output_chain {
            return Err(DomainError::CrossChainTrade {
                input: input_chain,
                output: output_chain,
            });
        }

        Ok(Self {
            trade_type,
            input,
            output,
            price_impact,
            method_parameters: None,
        })
    }

    /// Attach the router call for this quote.
    #[must_use]
    pub fn with_method_parameters(mut self, parameters: MethodParameters) -> Self {
        self.method_parameters = Some(parameters);
        self
    }

    #[must_use]
    pub fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    #[must_use]
    pub fn input_amount(&self) -> &CurrencyAmount {
        &self.input
    }

    #[must_use]
    pub fn output_amount(&self) -> &CurrencyAmount {
        &self.output
    }

    #[must_use]
    pub fn input_currency(&self) -> &Currency {
        self.input.currency()
    }

    #[must_use]
    pub fn output_currency(&self) -> &Currency {
        self.output.currency()
    }

    #[must_use]
    pub fn price_impact(&self) -> Decimal {
        self.price_impact
    }

    #[must_use]
    pub fn method_parameters(&self) -> Option<&MethodParameters> {
        self.method_parameters.as_ref()
    }

    /// Most input the trade may spend under the slippage tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NegativeSlippage`] for a negative tolerance.
    pub fn maximum_amount_in(&self, slippage: Decimal) -> Result<CurrencyAmount, DomainError> {
        match self.trade_type {
            TradeType::ExactInput => Ok(self.input.clone()),
            TradeType::ExactOutput => Ok(CurrencyAmount::from_raw(
                self.input.currency().clone(),
                add_slippage(self.input.raw(), slippage)?,
            )),
        }
    }

    /// Least output the trade may return under the slippage tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NegativeSlippage`] for a negative tolerance.
    pub fn minimum_amount_out(&self, slippage: Decimal) -> Result<CurrencyAmount, DomainError> {
        match self.trade_type {
            TradeType::ExactOutput => Ok(self.output.clone()),
            TradeType::ExactInput => Ok(CurrencyAmount::from_raw(
                self.output.currency().clone(),
                remove_slippage(self.output.raw(), slippage)?,
            )),
        }
    }
}

/// Outcome of the latest quote request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TradeState {
    /// No quote requested (missing currency or amount).
    #[default]
    Idle,
    /// A quote is in flight.
    Loading,
    /// The router found no path, or does not serve the chain.
    NoRoute,
    /// A usable quote.
    Valid(Trade),
}

impl TradeState {
    #[must_use]
    pub fn trade(&self) -> Option<&Trade> {
        match self {
            Self::Valid(trade) => Some(trade),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChainId;
    use alloy_primitives::address;
    use rust_decimal_macros::dec;

    fn usdc(chain: u64) -> Currency {
        Currency::token(
            ChainId::new(chain),
            address!("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"),
            6,
            Some("USDC".to_string()),
        )
    }

    fn dai() -> Currency {
        Currency::token(
            ChainId::new(1),
            address!("0x6b175474e89094c44da98b954eedeac495271d0f"),
            18,
            Some("DAI".to_string()),
        )
    }

    fn trade(trade_type: TradeType) -> Trade {
        Trade::try_new(
            trade_type,
            CurrencyAmount::parse(usdc(1), "100").unwrap(),
            CurrencyAmount::parse(dai(), "99.5").unwrap(),
            dec!(0.001),
        )
        .unwrap()
    }

    #[test]
    fn exact_input_maximum_in_is_input() {
        let trade = trade(TradeType::ExactInput);
        assert_eq!(
            trade.maximum_amount_in(dec!(0.01)).unwrap(),
            *trade.input_amount()
        );
    }

    #[test]
    fn exact_output_maximum_in_adds_slippage() {
        let trade = trade(TradeType::ExactOutput);
        let max_in = trade.maximum_amount_in(dec!(0.01)).unwrap();
        assert_eq!(max_in.to_exact(), "101");
    }

    #[test]
    fn exact_input_minimum_out_removes_slippage() {
        let trade = trade(TradeType::ExactInput);
        let min_out = trade.minimum_amount_out(dec!(0.005)).unwrap();
        assert_eq!(min_out.to_exact(), "99.004975124378109452");
    }

    #[test]
    fn same_currency_trade_is_rejected() {
        let result = Trade::try_new(
            TradeType::ExactInput,
            CurrencyAmount::parse(usdc(1), "1").unwrap(),
            CurrencyAmount::parse(usdc(1), "1").unwrap(),
            Decimal::ZERO,
        );
        assert_eq!(result, Err(DomainError::SameCurrency));
    }

    #[test]
    fn cross_chain_trade_is_rejected() {
        let result = Trade::try_new(
            TradeType::ExactInput,
            CurrencyAmount::parse(usdc(137), "1").unwrap(),
            CurrencyAmount::parse(dai(), "1").unwrap(),
            Decimal::ZERO,
        );
        assert!(matches!(result, Err(DomainError::CrossChainTrade { .. })));
    }

    #[test]
    fn only_valid_state_exposes_trade() {
        assert!(TradeState::Idle.trade().is_none());
        assert!(TradeState::Loading.trade().is_none());
        assert!(TradeState::NoRoute.trade().is_none());
        let valid = TradeState::Valid(trade(TradeType::ExactInput));
        assert!(valid.trade().is_some());
    }

    #[test]
    fn trade_type_inverts() {
        assert_eq!(TradeType::ExactInput.invert(), TradeType::ExactOutput);
        assert_eq!(TradeType::ExactOutput.invert(), TradeType::ExactInput);
    }
}
