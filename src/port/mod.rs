//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems (wallets, the routing service, token contracts, the host).
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │                         │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              │                         │              │
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │Connector│            │   Router    │              │   Host    │
//! │ Adapter │            │   Adapter   │              │  Events   │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`Connector`] - Wallet backends
//! - [`QuoteRouter`] - Quote routing
//! - [`AllowanceReader`] - Balances, allowances and permit support
//! - [`PermitSigner`] - EIP-2612 permit signatures
//! - [`TransactionSender`], [`TransactionTracker`] - Submission and receipts
//! - [`TxEventHandler`] - Host transaction callbacks

pub mod outbound;

pub use outbound::connector::Connector;
pub use outbound::events::{NullEventHandler, TxEventHandler, TxEventHandlers};
pub use outbound::router::{QuoteRequest, QuoteRouter};
pub use outbound::signer::{PermitRequest, PermitSigner};
pub use outbound::token::AllowanceReader;
pub use outbound::transaction::{TransactionRequest, TransactionSender, TransactionTracker};
