//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the widget's external collaborators: wallet
//! connectors, the routing service, token reads, permit signing,
//! transaction submission and the host's event handlers.

pub mod connector;
pub mod events;
pub mod router;
pub mod signer;
pub mod token;
pub mod transaction;
