//! Chain-agnostic domain types and the pure action resolver.

pub mod action;
pub mod approval;
pub mod chain;
pub mod connection;
pub mod currency;
pub mod error;
pub mod id;
pub mod operation;
pub mod slippage;
pub mod trade;
pub mod transaction;
pub mod wrap;

pub use action::{resolve, ActionInputs, DisabledReason, ResolvedAction};
pub use approval::{Approval, ApprovalState, PermitSupport, SignatureData};
pub use chain::{chain_info, ChainInfo, SupportedChain};
pub use connection::{
    ActiveConnection, Connection, ConnectionState, ConnectorKind, CONNECTOR_PRIORITY,
    EAGER_CONNECTORS,
};
pub use currency::{Currency, CurrencyAmount};
pub use error::DomainError;
pub use id::{ChainId, SlotId, TxHash};
pub use operation::Operation;
pub use slippage::{default_auto_slippage, Slippage};
pub use trade::{MethodParameters, Trade, TradeState, TradeType};
pub use transaction::{TransactionInfo, TransactionType, TxStatus};
pub use wrap::WrapType;
