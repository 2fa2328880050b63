//! Native asset wrap/unwrap detection.

use std::fmt;

use super::Currency;

/// Conversion between a chain's native asset and its wrapped token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapType {
    /// Native -> wrapped native (`deposit`).
    Wrap,
    /// Wrapped native -> native (`withdraw`).
    Unwrap,
}

impl WrapType {
    /// Detect whether swapping `input` for `output` is a wrap or unwrap.
    ///
    /// Returns `None` for regular swaps, for missing currencies and for pairs
    /// on different chains.
    #[must_use]
    pub fn detect(input: Option<&Currency>, output: Option<&Currency>) -> Option<Self> {
        let (input, output) = (input?, output?);
        if input.chain_id() != output.chain_id() {
            return None;
        }
        if input.is_native() && output.is_wrapped_native() {
            Some(Self::Wrap)
        } else if input.is_wrapped_native() && output.is_native() {
            Some(Self::Unwrap)
        } else {
            None
        }
    }
}

impl fmt::Display for WrapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wrap => write!(f, "wrap"),
            Self::Unwrap => write!(f, "unwrap"),
        }
    }
}
