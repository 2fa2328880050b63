//! Lifecycle of a single asynchronous operation.

/// State of one suspendable operation (a permit request, an approval
/// transaction, a swap submission).
///
/// Each resource owns its own `Operation` so resolvers stay pure functions
/// over a small set of named states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation<T, E> {
    /// Nothing started.
    Idle,
    /// Started and awaiting a result.
    Pending,
    /// Finished successfully.
    Succeeded(T),
    /// Finished with an error.
    Failed(E),
}

impl<T, E> Default for Operation<T, E> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T, E> Operation<T, E> {
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The success value, if any.
    #[must_use]
    pub const fn succeeded(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    /// The failure, if any.
    #[must_use]
    pub const fn failed(&self) -> Option<&E> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Record the outcome of the pending operation.
    pub fn settle(&mut self, result: Result<T, E>) {
        *self = match result {
            Ok(value) => Self::Succeeded(value),
            Err(error) => Self::Failed(error),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        let op: Operation<u32, String> = Operation::default();
        assert!(op.is_idle());
        assert!(op.succeeded().is_none());
    }

    #[test]
    fn settle_records_success() {
        let mut op: Operation<u32, String> = Operation::Pending;
        op.settle(Ok(7));
        assert_eq!(op.succeeded(), Some(&7));
        assert!(!op.is_pending());
    }

    #[test]
    fn settle_records_failure() {
        let mut op: Operation<u32, String> = Operation::Pending;
        op.settle(Err("rejected".to_string()));
        assert_eq!(op.failed().map(String::as_str), Some("rejected"));
    }
}
