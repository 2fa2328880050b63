//! Transaction submission and tracking ports.
//!
//! [`TransactionRequest`] describes the three transactions the widget sends
//! and encodes their call data; [`TransactionSender`] hands them to the
//! wallet and [`TransactionTracker`] reports their fate.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;

use crate::domain::{MethodParameters, SignatureData, TxHash, TxStatus, WrapType};
use crate::error::{ApprovalError, SubmissionError};

sol! {
    interface IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
    }

    interface IWETH9 {
        function deposit() external payable;
        function withdraw(uint256 wad) external;
    }

    interface ISwapRouter {
        function multicall(bytes[] data) external payable returns (bytes[] results);
        function selfPermit(address token, uint256 value, uint256 deadline, uint8 v, bytes32 r, bytes32 s) external payable;
    }
}

/// A transaction the widget asks the wallet to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionRequest {
    /// ERC-20 `approve(spender, amount)`.
    Approve {
        token: Address,
        spender: Address,
        amount: U256,
    },
    /// Router call, prefixed by `selfPermit` when a permit was signed.
    Swap {
        parameters: MethodParameters,
        permit: Option<SignatureData>,
    },
    /// `deposit()` or `withdraw(amount)` on the wrapped-native contract.
    Wrap {
        wrapped: Address,
        wrap_type: WrapType,
        amount: U256,
    },
}

impl TransactionRequest {
    /// Contract the transaction calls.
    #[must_use]
    pub fn to(&self) -> Address {
        match self {
            Self::Approve { token, .. } => *token,
            Self::Swap { parameters, .. } => parameters.to,
            Self::Wrap { wrapped, .. } => *wrapped,
        }
    }

    /// Native value attached to the call.
    #[must_use]
    pub fn value(&self) -> U256 {
        match self {
            Self::Approve { .. } => U256::ZERO,
            Self::Swap { parameters, .. } => parameters.value,
            Self::Wrap {
                wrap_type: WrapType::Wrap,
                amount,
                ..
            } => *amount,
            Self::Wrap {
                wrap_type: WrapType::Unwrap,
                ..
            } => U256::ZERO,
        }
    }

    /// ABI-encoded call data.
    ///
    /// # Errors
    ///
    /// Returns an error if an attached permit signature is malformed.
    pub fn calldata(&self) -> Result<Bytes, SubmissionError> {
        let encoded = match self {
            Self::Approve {
                spender, amount, ..
            } => IERC20::approveCall {
                spender: *spender,
                amount: *amount,
            }
            .abi_encode(),
            Self::Swap {
                parameters,
                permit: None,
            } => return Ok(parameters.calldata.clone()),
            Self::Swap {
                parameters,
                permit: Some(permit),
            } => ISwapRouter::multicallCall {
                data: vec![self_permit(permit)?, parameters.calldata.clone()],
            }
            .abi_encode(),
            Self::Wrap {
                wrap_type: WrapType::Wrap,
                ..
            } => IWETH9::depositCall {}.abi_encode(),
            Self::Wrap {
                wrap_type: WrapType::Unwrap,
                amount,
                ..
            } => IWETH9::withdrawCall { wad: *amount }.abi_encode(),
        };
        Ok(encoded.into())
    }
}

/// Encode `selfPermit` from a 65-byte `r || s || v` signature.
fn self_permit(permit: &SignatureData) -> Result<Bytes, SubmissionError> {
    let bytes = permit.signature.as_ref();
    if bytes.len() != 65 {
        return Err(ApprovalError::Signer(format!(
            "expected 65-byte signature, got {}",
            bytes.len()
        ))
        .into());
    }
    let v = match bytes[64] {
        v @ (0 | 1) => v + 27,
        v => v,
    };
    let call = ISwapRouter::selfPermitCall {
        token: permit.token,
        value: permit.amount,
        deadline: U256::from(permit.deadline),
        v,
        r: B256::from_slice(&bytes[..32]),
        s: B256::from_slice(&bytes[32..64]),
    };
    Ok(call.abi_encode().into())
}

/// Port for sending transactions from the connected account.
#[async_trait]
pub trait TransactionSender: Send + Sync {
    /// Send a transaction and return its hash once the wallet accepts it.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::Rejected`] if the user or node refuses it.
    async fn send(
        &self,
        from: Address,
        request: &TransactionRequest,
    ) -> Result<TxHash, SubmissionError>;
}

/// Port for tracking sent transactions.
#[async_trait]
pub trait TransactionTracker: Send + Sync {
    /// Current status; unknown hashes are reported as pending.
    async fn status(&self, hash: TxHash) -> TxStatus;
}
