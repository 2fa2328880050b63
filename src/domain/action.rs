//! Resolution of the single user-facing swap action.
//!
//! [`resolve`] is a pure function of its inputs: calling it twice with the
//! same inputs yields the same action, and every input change is handled by
//! simply resolving again. The rule order is significant; each rule is a
//! precondition for the ones after it:
//!
//! 1. chain mismatch -> [`ResolvedAction::SwitchChain`]
//! 2. anything missing or an insufficient balance -> [`ResolvedAction::Disabled`]
//! 3. native wrap/unwrap -> [`ResolvedAction::Wrap`] (never needs approval)
//! 4. authorization missing -> [`ResolvedAction::Approve`]
//! 5. otherwise -> [`ResolvedAction::Swap`]

use std::fmt;

use super::{
    Approval, ApprovalState, ChainId, CurrencyAmount, SignatureData, Trade, TradeState, WrapType,
};

/// Why the action button is disabled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DisabledReason {
    /// The host disabled the widget.
    Forced,
    /// No connector provides a chain.
    NoConnection,
    /// The router returned no route.
    NoRoute,
    /// A quote is still loading.
    QuoteLoading,
    /// No quote has been requested.
    NoTrade,
    /// No input amount entered.
    MissingAmount,
    /// The input balance is unknown (e.g. no account connected).
    MissingBalance,
    /// Balance and amount are in different currencies.
    BalanceMismatch,
    /// Balance is strictly less than the input amount.
    InsufficientBalance { symbol: String },
}

impl fmt::Display for DisabledReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forced => write!(f, "disabled"),
            Self::NoConnection => write!(f, "no connection"),
            Self::NoRoute => write!(f, "no route"),
            Self::QuoteLoading => write!(f, "fetching quote"),
            Self::NoTrade => write!(f, "no trade"),
            Self::MissingAmount => write!(f, "enter an amount"),
            Self::MissingBalance => write!(f, "balance unknown"),
            Self::BalanceMismatch => write!(f, "balance currency mismatch"),
            Self::InsufficientBalance { symbol } => write!(f, "insufficient {symbol} balance"),
        }
    }
}

/// The one action presented to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAction {
    /// Ask the wallet to switch to the token's chain.
    SwitchChain(ChainId),
    /// Nothing can be submitted.
    Disabled(DisabledReason),
    /// Wrap or unwrap the native asset.
    Wrap(WrapType),
    /// Authorize the router first.
    Approve { trade: Trade, state: ApprovalState },
    /// Submit the swap, with a permit when one was signed.
    Swap {
        trade: Trade,
        signature: Option<SignatureData>,
    },
}

impl ResolvedAction {
    /// Whether pressing the action button does anything.
    ///
    /// A pending approval renders as an approve action that cannot be
    /// pressed again.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        match self {
            Self::Disabled(_) => false,
            Self::Approve { state, .. } => *state != ApprovalState::PendingApproval,
            Self::SwitchChain(_) | Self::Wrap(_) | Self::Swap { .. } => true,
        }
    }

    /// Short machine-friendly label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::SwitchChain(_) => "switch_chain",
            Self::Disabled(_) => "disabled",
            Self::Wrap(_) => "wrap",
            Self::Approve { .. } => "approve",
            Self::Swap { .. } => "swap",
        }
    }
}

impl fmt::Display for ResolvedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SwitchChain(chain) => write!(f, "switch to chain {chain}"),
            Self::Disabled(reason) => write!(f, "disabled: {reason}"),
            Self::Wrap(wrap_type) => write!(f, "{wrap_type}"),
            Self::Approve { trade, state } => {
                write!(f, "approve {} ({state})", trade.input_currency())
            }
            Self::Swap { trade, signature } => {
                write!(f, "swap {} for {}", trade.input_amount(), trade.output_currency())?;
                if signature.is_some() {
                    write!(f, " with permit")?;
                }
                Ok(())
            }
        }
    }
}

/// Everything the action depends on, as seen in one update cycle.
#[derive(Debug, Clone, Copy)]
pub struct ActionInputs<'a> {
    /// Chain of the active connection.
    pub connection_chain: Option<ChainId>,
    /// Chain of the selected tokens (input, falling back to output).
    pub token_chain: Option<ChainId>,
    pub trade: &'a TradeState,
    /// Set when the pair is a native wrap/unwrap.
    pub wrap: Option<WrapType>,
    pub input_amount: Option<&'a CurrencyAmount>,
    pub input_balance: Option<&'a CurrencyAmount>,
    pub approval: &'a Approval,
    /// Host override.
    pub disabled: bool,
}

/// Resolve the action for the given inputs. First matching rule wins.
#[must_use]
pub fn resolve(inputs: &ActionInputs<'_>) -> ResolvedAction {
    if let (Some(connection), Some(token)) = (inputs.connection_chain, inputs.token_chain) {
        if connection != token {
            return ResolvedAction::SwitchChain(token);
        }
    }

    if let Some(reason) = disabled_reason(inputs) {
        return ResolvedAction::Disabled(reason);
    }

    if let Some(wrap_type) = inputs.wrap {
        return ResolvedAction::Wrap(wrap_type);
    }

    let Some(trade) = inputs.trade.trade() else {
        return ResolvedAction::Disabled(DisabledReason::NoTrade);
    };

    if !inputs.approval.state.is_authorized() {
        return ResolvedAction::Approve {
            trade: trade.clone(),
            state: inputs.approval.state,
        };
    }

    ResolvedAction::Swap {
        trade: trade.clone(),
        signature: inputs.approval.signature.clone(),
    }
}

fn disabled_reason(inputs: &ActionInputs<'_>) -> Option<DisabledReason> {
    if inputs.disabled {
        return Some(DisabledReason::Forced);
    }
    if inputs.connection_chain.is_none() {
        return Some(DisabledReason::NoConnection);
    }
    if inputs.wrap.is_none() {
        match inputs.trade {
            TradeState::Valid(_) => {}
            TradeState::Idle => return Some(DisabledReason::NoTrade),
            TradeState::Loading => return Some(DisabledReason::QuoteLoading),
            TradeState::NoRoute => return Some(DisabledReason::NoRoute),
        }
    }

    let Some(amount) = inputs.input_amount else {
        return Some(DisabledReason::MissingAmount);
    };
    let Some(balance) = inputs.input_balance else {
        return Some(DisabledReason::MissingBalance);
    };

    match balance.less_than(amount) {
        Ok(false) => None,
        Ok(true) => Some(DisabledReason::InsufficientBalance {
            symbol: amount.currency().symbol().to_string(),
        }),
        Err(_) => Some(DisabledReason::BalanceMismatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Currency, TradeType};
    use alloy_primitives::address;
    use rust_decimal::Decimal;

    fn usdc() -> Currency {
        Currency::token(
            ChainId::new(1),
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

    fn amount(value: &str) -> CurrencyAmount {
        CurrencyAmount::parse(usdc(), value).unwrap()
    }

    fn valid_trade() -> TradeState {
        TradeState::Valid(
            Trade::try_new(
                TradeType::ExactInput,
                amount("100"),
                CurrencyAmount::parse(dai(), "99").unwrap(),
                Decimal::ZERO,
            )
            .unwrap(),
        )
    }

    struct Fixture {
        trade: TradeState,
        amount: CurrencyAmount,
        balance: CurrencyAmount,
        approval: Approval,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                trade: valid_trade(),
                amount: amount("100"),
                balance: amount("500"),
                approval: Approval::new(ApprovalState::Approved),
            }
        }

        fn inputs(&self) -> ActionInputs<'_> {
            ActionInputs {
                connection_chain: Some(ChainId::new(1)),
                token_chain: Some(ChainId::new(1)),
                trade: &self.trade,
                wrap: None,
                input_amount: Some(&self.amount),
                input_balance: Some(&self.balance),
                approval: &self.approval,
                disabled: false,
            }
        }
    }

    #[test]
    fn approved_trade_resolves_to_swap() {
        let fixture = Fixture::new();
        let action = resolve(&fixture.inputs());
        assert_eq!(action.label(), "swap");
        assert!(action.is_submittable());
    }

    #[test]
    fn chain_mismatch_wins_over_everything() {
        let fixture = Fixture::new();
        let inputs = ActionInputs {
            token_chain: Some(ChainId::new(137)),
            disabled: true,
            input_amount: None,
            ..fixture.inputs()
        };
        assert_eq!(resolve(&inputs), ResolvedAction::SwitchChain(ChainId::new(137)));
    }

    #[test]
    fn unknown_token_chain_does_not_switch() {
        let fixture = Fixture::new();
        let inputs = ActionInputs {
            token_chain: None,
            ..fixture.inputs()
        };
        assert_eq!(resolve(&inputs).label(), "swap");
    }

    #[test]
    fn host_override_disables() {
        let fixture = Fixture::new();
        let inputs = ActionInputs {
            disabled: true,
            ..fixture.inputs()
        };
        assert_eq!(
            resolve(&inputs),
            ResolvedAction::Disabled(DisabledReason::Forced)
        );
    }

    #[test]
    fn missing_connection_disables() {
        let fixture = Fixture::new();
        let inputs = ActionInputs {
            connection_chain: None,
            ..fixture.inputs()
        };
        let action = resolve(&inputs);
        assert_eq!(action, ResolvedAction::Disabled(DisabledReason::NoConnection));
        assert_eq!(action.to_string(), "disabled: no connection");
    }

    #[test]
    fn trade_state_maps_to_disabled_reason() {
        let mut fixture = Fixture::new();
        for (state, reason) in [
            (TradeState::Idle, DisabledReason::NoTrade),
            (TradeState::Loading, DisabledReason::QuoteLoading),
            (TradeState::NoRoute, DisabledReason::NoRoute),
        ] {
            fixture.trade = state;
            assert_eq!(resolve(&fixture.inputs()), ResolvedAction::Disabled(reason));
        }
    }

    #[test]
    fn missing_balance_disables() {
        let fixture = Fixture::new();
        let inputs = ActionInputs {
            input_balance: None,
            ..fixture.inputs()
        };
        assert_eq!(
            resolve(&inputs),
            ResolvedAction::Disabled(DisabledReason::MissingBalance)
        );
    }

    #[test]
    fn insufficient_balance_disables() {
        let mut fixture = Fixture::new();
        fixture.balance = amount("99.999999");
        assert_eq!(
            resolve(&fixture.inputs()),
            ResolvedAction::Disabled(DisabledReason::InsufficientBalance {
                symbol: "USDC".to_string()
            })
        );
    }

    #[test]
    fn exactly_sufficient_balance_is_allowed() {
        let mut fixture = Fixture::new();
        fixture.balance = amount("100");
        assert_eq!(resolve(&fixture.inputs()).label(), "swap");
    }

    #[test]
    fn wrap_skips_trade_and_approval() {
        let mut fixture = Fixture::new();
        fixture.trade = TradeState::Idle;
        fixture.approval = Approval::new(ApprovalState::RequiresApproval);
        let inputs = ActionInputs {
            wrap: Some(WrapType::Wrap),
            ..fixture.inputs()
        };
        assert_eq!(resolve(&inputs), ResolvedAction::Wrap(WrapType::Wrap));
    }

    #[test]
    fn unauthorized_trade_resolves_to_approve() {
        let mut fixture = Fixture::new();
        fixture.approval = Approval::new(ApprovalState::RequiresPermitSignature);
        match resolve(&fixture.inputs()) {
            ResolvedAction::Approve { state, .. } => {
                assert_eq!(state, ApprovalState::RequiresPermitSignature);
            }
            other => panic!("Expected Approve, got {other:?}"),
        }
    }

    #[test]
    fn pending_approval_is_not_submittable() {
        let mut fixture = Fixture::new();
        fixture.approval = Approval::new(ApprovalState::PendingApproval);
        let action = resolve(&fixture.inputs());
        assert_eq!(action.label(), "approve");
        assert!(!action.is_submittable());
    }

    #[test]
    fn resolution_is_idempotent() {
        let fixture = Fixture::new();
        assert_eq!(resolve(&fixture.inputs()), resolve(&fixture.inputs()));
    }
}
