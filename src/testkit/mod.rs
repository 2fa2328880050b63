//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`connector`]: `ScriptedConnector`, a wallet backend with a fixed answer.
//! - [`router`]: `StaticRouter`, fixed-rate quotes.
//! - [`token`]: `StaticReader`, settable balances, allowances and permit support.
//! - [`wallet`]: `ScriptedSigner` and `ScriptedSender`, recording wallets.
//! - [`events`]: `RecordingHandler`, captures host callbacks.
//! - [`domain`]: Builders for mainnet currencies, amounts and trades.

pub mod connector;
pub mod domain;
pub mod events;
pub mod router;
pub mod token;
pub mod wallet;
