//! Currencies and exact currency amounts.
//!
//! Amounts are held as raw integer base units (`U256`) so every comparison
//! the resolvers make is exact; decimal strings are only used at the edges.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use super::chain::chain_info;
use super::{ChainId, DomainError};

/// A chain's native asset or an ERC-20 token.
///
/// Identity is `(chain, address)`; symbol and decimals are metadata and do
/// not take part in equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Currency {
    /// The chain's native asset (ETH, MATIC, ...).
    Native {
        chain_id: ChainId,
        symbol: String,
        decimals: u8,
    },
    /// An ERC-20 token contract.
    Token {
        chain_id: ChainId,
        address: Address,
        decimals: u8,
        #[serde(default)]
        symbol: Option<String>,
    },
}

impl Currency {
    /// The native asset of a supported chain.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnsupportedChain`] if the chain is not in the
    /// chain table.
    pub fn native(chain_id: ChainId) -> Result<Self, DomainError> {
        let info = chain_info(chain_id).ok_or(DomainError::UnsupportedChain(chain_id))?;
        Ok(Self::Native {
            chain_id,
            symbol: info.native_symbol.to_string(),
            decimals: info.native_decimals,
        })
    }

    /// An ERC-20 token.
    #[must_use]
    pub fn token(
        chain_id: ChainId,
        address: Address,
        decimals: u8,
        symbol: impl Into<Option<String>>,
    ) -> Self {
        Self::Token {
            chain_id,
            address,
            decimals,
            symbol: symbol.into(),
        }
    }

    #[must_use]
    pub fn chain_id(&self) -> ChainId {
        match self {
            Self::Native { chain_id, .. } | Self::Token { chain_id, .. } => *chain_id,
        }
    }

    #[must_use]
    pub fn decimals(&self) -> u8 {
        match self {
            Self::Native { decimals, .. } | Self::Token { decimals, .. } => *decimals,
        }
    }

    /// Display symbol, `"UNKNOWN"` for tokens without metadata.
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Self::Native { symbol, .. } => symbol,
            Self::Token { symbol, .. } => symbol.as_deref().unwrap_or("UNKNOWN"),
        }
    }

    #[must_use]
    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native { .. })
    }

    /// Token contract address, `None` for the native asset.
    #[must_use]
    pub fn address(&self) -> Option<Address> {
        match self {
            Self::Native { .. } => None,
            Self::Token { address, .. } => Some(*address),
        }
    }

    /// The ERC-20 form of this currency: the wrapped-native token for a
    /// native asset, the token itself otherwise.
    #[must_use]
    pub fn wrapped(&self) -> Option<Currency> {
        match self {
            Self::Native { chain_id, .. } => {
                let info = chain_info(*chain_id)?;
                Some(Self::token(
                    *chain_id,
                    info.wrapped_native,
                    info.native_decimals,
                    Some(info.wrapped_symbol.to_string()),
                ))
            }
            Self::Token { .. } => Some(self.clone()),
        }
    }

    /// Whether this token is the wrapped-native token of its chain.
    #[must_use]
    pub fn is_wrapped_native(&self) -> bool {
        match self {
            Self::Native { .. } => false,
            Self::Token {
                chain_id, address, ..
            } => chain_info(*chain_id).is_some_and(|info| info.wrapped_native == *address),
        }
    }

    fn key(&self) -> (ChainId, Option<Address>) {
        (self.chain_id(), self.address())
    }
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Currency {}

impl Hash for Currency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An exact amount of a currency in raw base units.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyAmount {
    currency: Currency,
    raw: U256,
}

impl CurrencyAmount {
    /// Create an amount from raw base units.
    #[must_use]
    pub fn from_raw(currency: Currency, raw: U256) -> Self {
        Self { currency, raw }
    }

    /// Parse a human-readable decimal string (e.g. `"1.5"`) exactly.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidAmount`] if the string is not a plain
    /// non-negative decimal, has more fractional digits than the currency
    /// supports, or overflows 256 bits.
    pub fn parse(currency: Currency, input: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidAmount {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("empty amount"));
        }
        if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected decimal digits"));
        }

        let decimals = usize::from(currency.decimals());
        if fraction.len() > decimals {
            return Err(invalid(&format!("more than {decimals} decimal places")));
        }

        let digits = format!("{whole}{fraction:0<decimals$}");
        let digits = digits.trim_start_matches('0');
        let raw = if digits.is_empty() {
            U256::ZERO
        } else {
            U256::from_str_radix(digits, 10).map_err(|_| invalid("amount overflows 256 bits"))?
        };

        Ok(Self { currency, raw })
    }

    #[must_use]
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    #[must_use]
    pub fn raw(&self) -> U256 {
        self.raw
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Compare two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::CurrencyMismatch`] if the currencies differ.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, DomainError> {
        if self.currency != other.currency {
            return Err(DomainError::CurrencyMismatch {
                left: self.currency.symbol().to_string(),
                right: other.currency.symbol().to_string(),
            });
        }
        Ok(self.raw.cmp(&other.raw))
    }

    /// Strict `self < other` for amounts of the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::CurrencyMismatch`] if the currencies differ.
    pub fn less_than(&self, other: &Self) -> Result<bool, DomainError> {
        Ok(self.try_cmp(other)? == Ordering::Less)
    }

    /// Exact decimal rendering without trailing zeros.
    #[must_use]
    pub fn to_exact(&self) -> String {
        let decimals = usize::from(self.currency.decimals());
        let digits = self.raw.to_string();
        if decimals == 0 {
            return digits;
        }

        let padded = format!("{digits:0>width$}", width = decimals + 1);
        let (whole, fraction) = padded.split_at(padded.len() - decimals);
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            whole.to_string()
        } else {
            format!("{whole}.{fraction}")
        }
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_exact(), self.currency.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn usdc() -> Currency {
        Currency::token(
            ChainId::new(1),
            address!("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"),
            6,
            Some("USDC".to_string()),
        )
    }

    #[test]
    fn parse_whole_amount() {
        let amount = CurrencyAmount::parse(usdc(), "100").unwrap();
        assert_eq!(amount.raw(), U256::from(100_000_000u64));
    }

    #[test]
    fn parse_fractional_amount() {
        let amount = CurrencyAmount::parse(usdc(), "0.5").unwrap();
        assert_eq!(amount.raw(), U256::from(500_000u64));
    }

    #[test]
    fn parse_leading_dot() {
        let amount = CurrencyAmount::parse(usdc(), ".000001").unwrap();
        assert_eq!(amount.raw(), U256::from(1u64));
    }

    #[test]
    fn parse_zero() {
        let amount = CurrencyAmount::parse(usdc(), "0.000").unwrap();
        assert!(amount.is_zero());
    }

    #[test]
    fn parse_rejects_excess_precision() {
        let result = CurrencyAmount::parse(usdc(), "1.0000001");
        assert!(matches!(result, Err(DomainError::InvalidAmount { .. })));
    }

    #[test]
    fn parse_rejects_non_digits() {
        assert!(CurrencyAmount::parse(usdc(), "1e6").is_err());
        assert!(CurrencyAmount::parse(usdc(), "-1").is_err());
        assert!(CurrencyAmount::parse(usdc(), "").is_err());
    }

    #[test]
    fn to_exact_trims_trailing_zeros() {
        let amount = CurrencyAmount::from_raw(usdc(), U256::from(1_500_000u64));
        assert_eq!(amount.to_exact(), "1.5");
        let small = CurrencyAmount::from_raw(usdc(), U256::from(42u64));
        assert_eq!(small.to_exact(), "0.000042");
        let whole = CurrencyAmount::from_raw(usdc(), U256::from(3_000_000u64));
        assert_eq!(whole.to_exact(), "3");
    }

    #[test]
    fn display_includes_symbol() {
        let amount = CurrencyAmount::parse(usdc(), "2.25").unwrap();
        assert_eq!(amount.to_string(), "2.25 USDC");
    }

    #[test]
    fn less_than_is_strict() {
        let hundred = CurrencyAmount::parse(usdc(), "100").unwrap();
        let also_hundred = CurrencyAmount::parse(usdc(), "100").unwrap();
        let fifty = CurrencyAmount::parse(usdc(), "50").unwrap();

        assert!(fifty.less_than(&hundred).unwrap());
        assert!(!also_hundred.less_than(&hundred).unwrap());
        assert!(!hundred.less_than(&fifty).unwrap());
    }

    #[test]
    fn comparing_different_currencies_fails() {
        let eth = Currency::native(ChainId::new(1)).unwrap();
        let a = CurrencyAmount::parse(usdc(), "1").unwrap();
        let b = CurrencyAmount::parse(eth, "1").unwrap();
        assert!(matches!(
            a.less_than(&b),
            Err(DomainError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn equality_ignores_metadata() {
        let bare = Currency::token(
            ChainId::new(1),
            address!("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"),
            6,
            None,
        );
        assert_eq!(bare, usdc());
        assert_eq!(bare.symbol(), "UNKNOWN");
    }

    #[test]
    fn native_wraps_to_table_token() {
        let eth = Currency::native(ChainId::new(1)).unwrap();
        let weth = eth.wrapped().unwrap();
        assert_eq!(weth.symbol(), "WETH");
        assert!(weth.is_wrapped_native());
        assert!(!usdc().is_wrapped_native());
    }

    #[test]
    fn native_of_unknown_chain_fails() {
        assert_eq!(
            Currency::native(ChainId::new(424_242)),
            Err(DomainError::UnsupportedChain(ChainId::new(424_242)))
        );
    }
}
