//! JSON-RPC backed adapters: token reads, the read-only network connector
//! and a local private-key wallet.

mod erc20;
mod network;
mod permit;
mod wallet;

pub use erc20::Erc20Reader;
pub use network::NetworkConnector;
pub use permit::permit_signing_hash;
pub use wallet::LocalWallet;
