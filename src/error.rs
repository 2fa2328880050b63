use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::{ChainId, TxHash};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised by a single wallet connector.
///
/// Connection failures are never fatal; they are recorded in the connector's
/// state and exclude it from active selection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("connection request rejected by user")]
    Rejected,

    #[error("connector unavailable: {0}")]
    Unavailable(String),

    #[error("no previously authorized session")]
    NoSession,

    #[error("chain {0} is not supported by this connector")]
    UnsupportedChain(ChainId),

    #[error("provider error: {0}")]
    Provider(String),
}

/// Quote routing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("no route found for {input} -> {output}")]
    NotFound { input: String, output: String },

    #[error("router does not support chain {0}")]
    UnsupportedChain(ChainId),

    #[error("router request failed: {0}")]
    Request(String),
}

/// Token authorization errors (approval transactions and permit signatures).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApprovalError {
    #[error("authorization rejected by user")]
    Rejected,

    #[error("approval transaction {hash} reverted")]
    Reverted { hash: TxHash },

    #[error("authorization result is stale")]
    Stale,

    #[error("signer error: {0}")]
    Signer(String),

    #[error("token read failed: {0}")]
    Read(String),
}

/// Transaction submission errors, reported to the host through `on_tx_fail`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("a submission is already in flight")]
    InFlight,

    #[error("action cannot be submitted: {0}")]
    NotSubmittable(String),

    #[error("transaction rejected: {0}")]
    Rejected(String),

    #[error("transaction {hash} reverted")]
    Reverted { hash: TxHash },

    #[error("trade has no router call data")]
    MissingCalldata,

    #[error("no account connected")]
    NoAccount,

    #[error(transparent)]
    Approval(#[from] ApprovalError),

    #[error(transparent)]
    Connect(#[from] ConnectError),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Approval(#[from] ApprovalError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl From<SubmissionError> for ApprovalError {
    fn from(error: SubmissionError) -> Self {
        match error {
            SubmissionError::Approval(error) => error,
            SubmissionError::Reverted { hash } => Self::Reverted { hash },
            SubmissionError::Rejected(_) => Self::Rejected,
            other => Self::Signer(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
