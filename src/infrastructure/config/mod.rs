//! Infrastructure configuration modules.

pub mod logging;
pub mod rpc;
pub mod settings;
pub mod swap;
pub mod wallet;
