//! Token authorization state for the swap input.

use std::fmt;

use alloy_primitives::{Address, Bytes, U256};

/// Whether the input token may be spent by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApprovalState {
    /// Nothing to authorize (no trade yet, or a native input).
    NotRequired,
    /// An on-chain approval transaction is needed.
    RequiresApproval,
    /// An approval transaction was sent and is awaiting confirmation.
    PendingApproval,
    /// An off-chain permit signature is needed.
    RequiresPermitSignature,
    /// The router may spend the input amount.
    Approved,
}

impl ApprovalState {
    /// Whether a swap may proceed without further authorization.
    #[must_use]
    pub const fn is_authorized(self) -> bool {
        matches!(self, Self::Approved | Self::NotRequired)
    }
}

impl fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotRequired => "not_required",
            Self::RequiresApproval => "requires_approval",
            Self::PendingApproval => "pending_approval",
            Self::RequiresPermitSignature => "requires_permit_signature",
            Self::Approved => "approved",
        };
        write!(f, "{label}")
    }
}

/// A signed EIP-2612 permit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignatureData {
    /// Token the permit authorizes.
    pub token: Address,
    /// Permit signer.
    pub owner: Address,
    /// Router allowed to spend.
    pub spender: Address,
    /// Authorized amount in raw units.
    pub amount: U256,
    /// Token nonce at signing time.
    pub nonce: U256,
    /// Unix timestamp after which the permit is void.
    pub deadline: u64,
    /// 65-byte `r || s || v` signature.
    pub signature: Bytes,
}

impl SignatureData {
    /// Whether this permit covers `amount` of `token` at time `now`.
    #[must_use]
    pub fn covers(&self, token: Address, amount: U256, now: u64) -> bool {
        self.token == token && self.amount == amount && self.deadline > now
    }
}

/// Whether a token implements EIP-2612 `permit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermitSupport {
    /// Not yet determined.
    #[default]
    Unknown,
    Unsupported,
    Supported,
}

/// Resolved authorization for the current trade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Approval {
    pub state: ApprovalState,
    /// Present only when authorized through a permit.
    pub signature: Option<SignatureData>,
}

impl Approval {
    #[must_use]
    pub const fn new(state: ApprovalState) -> Self {
        Self {
            state,
            signature: None,
        }
    }

    #[must_use]
    pub fn permitted(signature: SignatureData) -> Self {
        Self {
            state: ApprovalState::Approved,
            signature: Some(signature),
        }
    }
}
