//! Builders for domain primitives used across tests.
//!
//! Mainnet currencies and trades with router call data attached, so tests
//! focus on assertions rather than construction boilerplate.

use alloy_primitives::{address, bytes, Address, U256};
use rust_decimal::Decimal;

use crate::domain::{
    ChainId, Currency, CurrencyAmount, MethodParameters, Trade, TradeState, TradeType,
};

/// Router address used by test trades.
pub const ROUTER: Address = address!("0x68b3465833fb72a70ecdf485e0e4c7bd8665fc45");

/// Test account.
pub const ACCOUNT: Address = address!("0x00000000000000000000000000000000000000aa");

pub fn mainnet() -> ChainId {
    ChainId::new(1)
}

pub fn usdc() -> Currency {
    Currency::token(
        mainnet(),
        address!("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"),
        6,
        Some("USDC".to_string()),
    )
}

pub fn dai() -> Currency {
    Currency::token(
        mainnet(),
        address!("0x6b175474e89094c44da98b954eedeac495271d0f"),
        18,
        Some("DAI".to_string()),
    )
}

pub fn weth() -> Currency {
    Currency::token(
        mainnet(),
        address!("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
        18,
        Some("WETH".to_string()),
    )
}

pub fn eth() -> Currency {
    Currency::native(mainnet()).expect("mainnet has a native currency")
}

/// Parse a human-readable amount.
pub fn amount(currency: &Currency, value: &str) -> CurrencyAmount {
    CurrencyAmount::parse(currency.clone(), value).expect("valid test amount")
}

/// Router call data for a trade; value is attached for native inputs.
pub fn method_parameters(input: &CurrencyAmount) -> MethodParameters {
    MethodParameters {
        to: ROUTER,
        calldata: bytes!("5ae401dc"),
        value: if input.currency().is_native() {
            input.raw()
        } else {
            U256::ZERO
        },
    }
}

/// A routable trade between two amounts.
pub fn trade(trade_type: TradeType, input: CurrencyAmount, output: CurrencyAmount) -> Trade {
    let parameters = method_parameters(&input);
    Trade::try_new(trade_type, input, output, Decimal::ZERO)
        .expect("valid test trade")
        .with_method_parameters(parameters)
}

/// `input` USDC for 0.99x DAI, exact input.
pub fn usdc_dai_trade(input: &str) -> Trade {
    let input = amount(&usdc(), input);
    let output_value = input
        .to_exact()
        .parse::<Decimal>()
        .expect("decimal amount")
        * Decimal::new(99, 2);
    trade(
        TradeType::ExactInput,
        input,
        amount(&dai(), &output_value.normalize().to_string()),
    )
}

pub fn valid(trade: Trade) -> TradeState {
    TradeState::Valid(trade)
}
