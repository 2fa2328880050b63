//! Swapwidget - swap action resolution engine for embeddable DEX widgets.
//!
//! Given the connected wallets, the selected tokens, a quote and the token's
//! authorization state, the engine decides the single action the widget's
//! button performs (switch chain, approve, sign a permit, wrap, swap, or
//! nothing) and executes it exactly once per press.
//!
//! # Architecture
//!
//! Hexagonal layout:
//!
//! - [`domain`] - Pure types and the action resolver
//! - [`port`] - Traits for wallets, routers, token reads and transactions
//! - [`application`] - Connector prioritization, approval resolution, the
//!   submission dispatcher and the swap session that composes them
//! - [`adapter`] - CLI (inbound), logging and JSON-RPC backends (outbound)
//! - [`infrastructure`] - Configuration and the composition root
//!
//! # Features
//!
//! - `onchain` - JSON-RPC token reads, network connector and local wallet (alloy)
//! - `testkit` - Scripted connectors, routers and wallets for integration tests
//!
//! # Example
//!
//! ```
//! use swapwidget::domain::{resolve, ActionInputs, Approval, ApprovalState, TradeState};
//!
//! let trade = TradeState::Idle;
//! let approval = Approval::new(ApprovalState::NotRequired);
//! let action = resolve(&ActionInputs {
//!     connection_chain: None,
//!     token_chain: None,
//!     trade: &trade,
//!     wrap: None,
//!     input_amount: None,
//!     input_balance: None,
//!     approval: &approval,
//!     disabled: false,
//! });
//! assert_eq!(action.to_string(), "disabled: no connection");
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
