//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the swap widget's use cases.

pub mod approval;
pub mod connector;
pub mod dispatch;
pub mod routing;
pub mod session;
pub mod tracker;

pub use approval::{ApprovalInputs, ApprovalResolver, Requirement, Ticket};
pub use connector::{ConnectorPrioritizer, ConnectorRegistry, ConnectorSlot, Connectors};
pub use dispatch::{DispatchPorts, Submission, SubmissionDispatcher, SubmitContext};
pub use routing::{quote_request, QuoteService, RouterFactory};
pub use session::{SessionPorts, SubmitOutcome, SwapForm, SwapSession, SwapSettings, SwapView};
pub use tracker::{Transaction, TransactionLog};
