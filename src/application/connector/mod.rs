//! Wallet connector registry and prioritization.

pub mod prioritizer;
pub mod registry;

pub use prioritizer::ConnectorPrioritizer;
pub use registry::{ConnectorRegistry, ConnectorSlot, Connectors, RegistryFingerprint};
