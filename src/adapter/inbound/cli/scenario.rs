//! Swap scenario files for `swapwidget resolve`.
//!
//! A scenario pins every input of the action resolver:
//!
//! ```toml
//! connection_chain = 1
//! amount = "100"
//! balance = "500"
//!
//! [input]
//! chain_id = 1
//! address = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"
//! decimals = 6
//! symbol = "USDC"
//!
//! [output]
//! chain_id = 1
//! address = "0x6b175474e89094c44da98b954eedeac495271d0f"
//! decimals = 18
//! symbol = "DAI"
//!
//! [trade]
//! state = "valid"
//! output = "99.5"
//!
//! [approval]
//! state = "requires_approval"
//! ```

use std::path::Path;

use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{
    resolve, ActionInputs, Approval, ApprovalState, ChainId, Currency, CurrencyAmount,
    ResolvedAction, Trade, TradeState, TradeType, WrapType,
};
use crate::error::{ConfigError, Result};

const fn default_decimals() -> u8 {
    18
}

/// A currency; native when `address` is absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurrencySpec {
    pub chain_id: ChainId,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    #[serde(default)]
    pub symbol: Option<String>,
}

impl CurrencySpec {
    fn currency(&self) -> Result<Currency> {
        match self.address {
            Some(address) => Ok(Currency::token(
                self.chain_id,
                address,
                self.decimals,
                self.symbol.clone(),
            )),
            None => Ok(Currency::native(self.chain_id)?),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeStatus {
    #[default]
    Idle,
    Loading,
    NoRoute,
    Valid,
}

/// Quote state; a valid quote carries its output amount.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TradeSpec {
    #[serde(default)]
    pub state: TradeStatus,
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    NotRequired,
    RequiresApproval,
    PendingApproval,
    RequiresPermitSignature,
    #[default]
    Approved,
}

impl From<ApprovalStatus> for ApprovalState {
    fn from(status: ApprovalStatus) -> Self {
        match status {
            ApprovalStatus::NotRequired => Self::NotRequired,
            ApprovalStatus::RequiresApproval => Self::RequiresApproval,
            ApprovalStatus::PendingApproval => Self::PendingApproval,
            ApprovalStatus::RequiresPermitSignature => Self::RequiresPermitSignature,
            ApprovalStatus::Approved => Self::Approved,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApprovalSpec {
    #[serde(default)]
    pub state: ApprovalStatus,
}

/// Everything the resolver reads, as written in a scenario file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Chain of the active connection; absent when disconnected.
    #[serde(default)]
    pub connection_chain: Option<ChainId>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub input: Option<CurrencySpec>,
    #[serde(default)]
    pub output: Option<CurrencySpec>,
    /// Input amount, human-readable.
    #[serde(default)]
    pub amount: Option<String>,
    /// Input balance, human-readable.
    #[serde(default)]
    pub balance: Option<String>,
    #[serde(default)]
    pub trade: TradeSpec,
    #[serde(default)]
    pub approval: ApprovalSpec,
}

impl Scenario {
    /// Parse a scenario from TOML content.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed content.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content).map_err(ConfigError::Parse)?)
    }

    /// Load a scenario file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    fn trade_state(
        &self,
        input: Option<&CurrencyAmount>,
        output: Option<&Currency>,
    ) -> Result<TradeState> {
        Ok(match self.trade.state {
            TradeStatus::Idle => TradeState::Idle,
            TradeStatus::Loading => TradeState::Loading,
            TradeStatus::NoRoute => TradeState::NoRoute,
            TradeStatus::Valid => {
                let (Some(input), Some(output), Some(value)) =
                    (input, output, self.trade.output.as_deref())
                else {
                    return Err(ConfigError::MissingField {
                        field: "trade.output",
                    }
                    .into());
                };
                let output = CurrencyAmount::parse(output.clone(), value)?;
                TradeState::Valid(Trade::try_new(
                    TradeType::ExactInput,
                    input.clone(),
                    output,
                    Decimal::ZERO,
                )?)
            }
        })
    }

    /// Run the action resolver on this scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if a currency, amount or trade in the file is invalid.
    pub fn evaluate(&self) -> Result<ResolvedAction> {
        let input = self.input.as_ref().map(CurrencySpec::currency).transpose()?;
        let output = self.output.as_ref().map(CurrencySpec::currency).transpose()?;

        let parse_input = |value: &Option<String>| -> Result<Option<CurrencyAmount>> {
            match (input.as_ref(), value.as_deref()) {
                (Some(currency), Some(value)) => {
                    Ok(Some(CurrencyAmount::parse(currency.clone(), value)?))
                }
                _ => Ok(None),
            }
        };
        let amount = parse_input(&self.amount)?;
        let balance = parse_input(&self.balance)?;

        let trade = self.trade_state(amount.as_ref(), output.as_ref())?;
        let approval = Approval::new(self.approval.state.into());
        let token_chain = input.as_ref().or(output.as_ref()).map(Currency::chain_id);

        Ok(resolve(&ActionInputs {
            connection_chain: self.connection_chain,
            token_chain,
            trade: &trade,
            wrap: WrapType::detect(input.as_ref(), output.as_ref()),
            input_amount: amount.as_ref(),
            input_balance: balance.as_ref(),
            approval: &approval,
            disabled: self.disabled,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DisabledReason;
    use crate::error::Error;

    const USDC_DAI: &str = r#"
        connection_chain = 1
        amount = "100"
        balance = "500"

        [input]
        chain_id = 1
        address = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"
        decimals = 6
        symbol = "USDC"

        [output]
        chain_id = 1
        address = "0x6b175474e89094c44da98b954eedeac495271d0f"
        symbol = "DAI"

        [trade]
        state = "valid"
        output = "99.5"
    "#;

    #[test]
    fn approved_trade_swaps() {
        let action = Scenario::parse(USDC_DAI).unwrap().evaluate().unwrap();
        assert_eq!(action.label(), "swap");
    }

    #[test]
    fn unapproved_trade_approves() {
        let content = format!("{USDC_DAI}\n[approval]\nstate = \"requires_approval\"\n");
        let action = Scenario::parse(&content).unwrap().evaluate().unwrap();
        assert_eq!(action.label(), "approve");
    }

    #[test]
    fn empty_scenario_has_no_connection() {
        let action = Scenario::default().evaluate().unwrap();
        assert_eq!(action, ResolvedAction::Disabled(DisabledReason::NoConnection));
    }

    #[test]
    fn native_to_wrapped_is_a_wrap() {
        let action = Scenario::parse(
            r#"
            connection_chain = 1
            amount = "1"
            balance = "2"

            [input]
            chain_id = 1

            [output]
            chain_id = 1
            address = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
            symbol = "WETH"
            "#,
        )
        .unwrap()
        .evaluate()
        .unwrap();
        assert_eq!(action, ResolvedAction::Wrap(WrapType::Wrap));
    }

    #[test]
    fn valid_trade_needs_output() {
        let result = Scenario::parse(
            r#"
            [trade]
            state = "valid"
            "#,
        )
        .unwrap()
        .evaluate();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField { field: "trade.output" }))
        ));
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(Scenario::parse("colour = 1").is_err());
    }
}
