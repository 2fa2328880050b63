//! Wallet connector kinds, connection state and the active connection.

use std::fmt;

use alloy_primitives::Address;

use super::ChainId;
use crate::error::ConnectError;

/// The wallet backends the widget can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorKind {
    /// Provider handed in by the host application.
    UserSupplied,
    /// Browser-injected EIP-1193 provider.
    InjectedProvider,
    /// Remote wallet reached through a popup/deep link.
    RemotePopup,
    /// Remote wallet reached through a QR code.
    RemoteQr,
    /// Read-only JSON-RPC connection, no account.
    ReadOnlyNetwork,
}

/// Connector precedence, highest first.
///
/// Adding or removing a backend is a one-line edit here.
pub const CONNECTOR_PRIORITY: [ConnectorKind; 5] = [
    ConnectorKind::UserSupplied,
    ConnectorKind::InjectedProvider,
    ConnectorKind::RemotePopup,
    ConnectorKind::RemoteQr,
    ConnectorKind::ReadOnlyNetwork,
];

/// Connectors asked to restore a previously authorized session on startup.
pub const EAGER_CONNECTORS: [ConnectorKind; 2] =
    [ConnectorKind::InjectedProvider, ConnectorKind::RemotePopup];

impl ConnectorKind {
    /// Position in [`CONNECTOR_PRIORITY`]; lower ranks first.
    #[must_use]
    pub fn rank(self) -> usize {
        CONNECTOR_PRIORITY
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or(CONNECTOR_PRIORITY.len())
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::UserSupplied => "user",
            Self::InjectedProvider => "injected",
            Self::RemotePopup => "remote_popup",
            Self::RemoteQr => "remote_qr",
            Self::ReadOnlyNetwork => "network",
        };
        write!(f, "{label}")
    }
}

/// Result of a successful activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub chain_id: ChainId,
    /// Connected account; `None` for read-only connections.
    pub account: Option<Address>,
}

impl Connection {
    #[must_use]
    pub const fn read_only(chain_id: ChainId) -> Self {
        Self {
            chain_id,
            account: None,
        }
    }

    #[must_use]
    pub const fn with_account(chain_id: ChainId, account: Address) -> Self {
        Self {
            chain_id,
            account: Some(account),
        }
    }
}

/// Live state of one connector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionState {
    pub chain_id: Option<ChainId>,
    pub account: Option<Address>,
    pub is_activating: bool,
    pub error: Option<ConnectError>,
}

impl ConnectionState {
    /// Whether this connector can back account-dependent actions.
    #[must_use]
    pub fn has_account(&self) -> bool {
        self.error.is_none() && !self.is_activating && self.account.is_some()
    }

    /// Whether this connector provides a usable chain context.
    #[must_use]
    pub fn has_chain(&self) -> bool {
        self.error.is_none() && !self.is_activating && self.chain_id.is_some()
    }
}

/// The single connection the rest of the widget works against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveConnection {
    /// A connector with an account.
    Wallet {
        kind: ConnectorKind,
        chain_id: ChainId,
        account: Address,
    },
    /// Chain context only, from the read-only network connector.
    ReadOnly { chain_id: ChainId },
    /// No connector provides a chain.
    Disconnected,
}

impl ActiveConnection {
    #[must_use]
    pub const fn chain_id(&self) -> Option<ChainId> {
        match self {
            Self::Wallet { chain_id, .. } | Self::ReadOnly { chain_id } => Some(*chain_id),
            Self::Disconnected => None,
        }
    }

    #[must_use]
    pub const fn account(&self) -> Option<Address> {
        match self {
            Self::Wallet { account, .. } => Some(*account),
            _ => None,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> Option<ConnectorKind> {
        match self {
            Self::Wallet { kind, .. } => Some(*kind),
            Self::ReadOnly { .. } => Some(ConnectorKind::ReadOnlyNetwork),
            Self::Disconnected => None,
        }
    }
}

impl fmt::Display for ActiveConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wallet {
                kind,
                chain_id,
                account,
            } => write!(f, "{kind} {account} on chain {chain_id}"),
            Self::ReadOnly { chain_id } => write!(f, "read-only on chain {chain_id}"),
            Self::Disconnected => write!(f, "disconnected"),
        }
    }
}
