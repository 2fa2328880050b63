#![allow(dead_code)]

pub mod architecture;
pub mod connectors;
pub mod session;
