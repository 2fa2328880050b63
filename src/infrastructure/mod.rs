//! Infrastructure layer.
//!
//! - [`bootstrap`] - Composition root wiring connectors and handlers
//! - [`config`] - Configuration loading and validation

pub mod bootstrap;
pub mod config;
