//! # Ledger Errors
//!
//! Error types for ledger submission and snapshot reads.

use thiserror::Error;

/// Ledger interaction error.
///
/// Submission failures abort the batch sequence at the point they occur;
/// they are reported to the caller rather than retried here, since a retry
/// against stale prepared-leg counters would corrupt the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The ledger rejected the submission.
    #[error("ledger rejected submission: {0}")]
    Rejected(String),

    /// The transport failed before a verdict was reached.
    #[error("connection error: {0}")]
    Connection(String),

    /// The submission timed out without confirmation.
    #[error("submission timed out after {0}s")]
    Timeout(u64),

    /// Snapshot decoding or other internal failure.
    #[error("internal ledger error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Creates a rejection error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if the failure happened before the ledger reached a
    /// verdict, meaning the submission may or may not have landed.
    #[must_use]
    pub const fn is_indeterminate(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout(_))
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        assert_eq!(
            LedgerError::rejected("insufficient collateral").to_string(),
            "ledger rejected submission: insufficient collateral"
        );
        assert_eq!(
            LedgerError::Timeout(30).to_string(),
            "submission timed out after 30s"
        );
    }

    #[test]
    fn indeterminate_classification() {
        assert!(LedgerError::Timeout(5).is_indeterminate());
        assert!(LedgerError::connection("reset").is_indeterminate());
        assert!(!LedgerError::rejected("no").is_indeterminate());
        assert!(!LedgerError::internal("decode").is_indeterminate());
    }
}
