//! Slippage tolerance and exact slippage-adjusted amounts.

use alloy_primitives::U256;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::DomainError;

/// Slippage used when the user has not set a maximum (0.5%).
#[must_use]
pub fn default_auto_slippage() -> Decimal {
    Decimal::new(5, 3)
}

/// User slippage setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Slippage {
    /// Use the automatic tolerance.
    #[serde(default = "default_true")]
    pub auto: bool,
    /// User-entered maximum tolerance as a fraction (0.01 = 1%).
    #[serde(default)]
    pub max: Option<Decimal>,
}

const fn default_true() -> bool {
    true
}

impl Default for Slippage {
    fn default() -> Self {
        Self {
            auto: true,
            max: None,
        }
    }
}

impl Slippage {
    /// A fixed user-entered tolerance.
    #[must_use]
    pub fn fixed(max: Decimal) -> Self {
        Self {
            auto: false,
            max: Some(max),
        }
    }

    /// The tolerance actually applied to trades.
    #[must_use]
    pub fn allowed(&self, auto: Decimal) -> Decimal {
        match (self.auto, self.max) {
            (false, Some(max)) => max,
            _ => auto,
        }
    }
}

/// Split a non-negative decimal fraction into `(numerator, denominator)`.
fn ratio(slippage: Decimal) -> Result<(U256, U256), DomainError> {
    if slippage.is_sign_negative() && !slippage.is_zero() {
        return Err(DomainError::NegativeSlippage { slippage });
    }
    let mantissa = slippage.mantissa().unsigned_abs();
    let denominator = 10u128.pow(slippage.scale());
    Ok((U256::from(mantissa), U256::from(denominator)))
}

/// `raw * (1 + slippage)`, rounded down.
///
/// # Errors
///
/// Returns [`DomainError::NegativeSlippage`] for a negative tolerance.
pub fn add_slippage(raw: U256, slippage: Decimal) -> Result<U256, DomainError> {
    let (num, den) = ratio(slippage)?;
    Ok(raw.saturating_mul(den + num) / den)
}

/// `raw / (1 + slippage)`, rounded down.
///
/// # Errors
///
/// Returns [`DomainError::NegativeSlippage`] for a negative tolerance.
pub fn remove_slippage(raw: U256, slippage: Decimal) -> Result<U256, DomainError> {
    let (num, den) = ratio(slippage)?;
    Ok(raw.saturating_mul(den) / (den + num))
}
