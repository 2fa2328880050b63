//! Fixed-rate [`QuoteRouter`] for testing.

use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{Currency, CurrencyAmount, Trade, TradeType};
use crate::error::RouteError;
use crate::port::{QuoteRequest, QuoteRouter};

use super::domain::method_parameters;

/// Quotes every pair at one output-per-input rate, or never finds a route.
pub struct StaticRouter {
    rate: Option<Decimal>,
    failures: AtomicUsize,
    calls: AtomicUsize,
}

impl StaticRouter {
    /// Quote at `rate` output units per input unit.
    pub fn rate(rate: &str) -> Self {
        Self {
            rate: Some(Decimal::from_str(rate).expect("valid rate")),
            failures: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn no_route() -> Self {
        Self {
            rate: None,
            failures: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail the first `count` requests with a transport error.
    pub fn failing(self, count: usize) -> Self {
        self.failures.store(count, Ordering::SeqCst);
        self
    }

    /// Number of routing requests received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn convert(
    amount: &CurrencyAmount,
    into: &Currency,
    factor: Decimal,
) -> Result<CurrencyAmount, RouteError> {
    let value = Decimal::from_str(&amount.to_exact())
        .map_err(|e| RouteError::Request(e.to_string()))?
        * factor;
    let value = value.round_dp(u32::from(into.decimals())).normalize();
    CurrencyAmount::parse(into.clone(), &value.to_string())
        .map_err(|e| RouteError::Request(e.to_string()))
}

#[async_trait]
impl QuoteRouter for StaticRouter {
    async fn route(&self, request: &QuoteRequest) -> Result<Trade, RouteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(RouteError::Request("connection reset".to_string()));
        }
        let Some(rate) = self.rate else {
            return Err(RouteError::NotFound {
                input: request.input_currency().symbol().to_string(),
                output: request.output_currency().symbol().to_string(),
            });
        };

        let (input, output) = match request.trade_type {
            TradeType::ExactInput => {
                let output = convert(&request.amount, request.output_currency(), rate)?;
                (request.amount.clone(), output)
            }
            TradeType::ExactOutput => {
                let input = convert(&request.amount, request.input_currency(), Decimal::ONE / rate)?;
                (input, request.amount.clone())
            }
        };
        let parameters = method_parameters(&input);
        Trade::try_new(request.trade_type, input, output, Decimal::ZERO)
            .map(|trade| trade.with_method_parameters(parameters))
            .map_err(|e| RouteError::Request(e.to_string()))
    }
}
