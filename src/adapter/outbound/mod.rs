//! Outbound adapters (driven side).

pub mod headless;
pub mod log;

#[cfg(feature = "onchain")]
pub mod onchain;
