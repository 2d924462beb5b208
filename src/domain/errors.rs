//! # Domain Errors
//!
//! Error types for the domain layer.
//!
//! These errors cover input-integrity failures (mismatched snapshots,
//! missing confirmations) and settlement computation failures. They are
//! fatal: the caller handed the decision layer inconsistent inputs, so no
//! retry can succeed.
//!
//! # Examples
//!
//! ```
//! use rfq_settle::domain::errors::DomainError;
//!
//! let err = DomainError::validation("legs must not be empty");
//! assert_eq!(err.to_string(), "validation error: legs must not be empty");
//! ```

use crate::domain::value_objects::{Address, ArithmeticError, QuoteSide};
use thiserror::Error;

/// Domain layer error.
///
/// Every variant represents a hard input-integrity or computation failure;
/// "no valid action" is never an error, the state machine returns `None`
/// for it instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The response references a different request than the one supplied.
    #[error("response references request {referenced}, expected {expected}")]
    RequestMismatch {
        /// The request address the response points at.
        referenced: Address,
        /// The address of the request snapshot actually supplied.
        expected: Address,
    },

    /// Settlement was requested for a response with no confirmation.
    #[error("unconfirmed settlement: response carries no confirmation")]
    UnconfirmedSettlement,

    /// The confirmed side has no quote on the response.
    #[error("missing {0} quote on confirmed response")]
    MissingQuote(QuoteSide),

    /// An open-size request was confirmed against a quote without an
    /// explicit legs multiplier.
    #[error("open-size confirmation requires an explicit legs multiplier")]
    MissingLegsMultiplier,

    /// A snapshot failed cross-field validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Arithmetic failure during settlement computation.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl DomainError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a cross-reference mismatch error.
    #[must_use]
    pub fn request_mismatch(referenced: Address, expected: Address) -> Self {
        Self::RequestMismatch {
            referenced,
            expected,
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        let err = DomainError::request_mismatch(Address::new("rfq-1"), Address::new("rfq-2"));
        assert_eq!(
            err.to_string(),
            "response references request rfq-1, expected rfq-2"
        );

        assert_eq!(
            DomainError::MissingQuote(QuoteSide::Bid).to_string(),
            "missing BID quote on confirmed response"
        );
    }

    #[test]
    fn arithmetic_error_converts() {
        let err: DomainError = ArithmeticError::DivisionByZero.into();
        assert_eq!(err, DomainError::Arithmetic(ArithmeticError::DivisionByZero));
    }

    #[test]
    fn validation_helper() {
        let err = DomainError::validation("bad counter");
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
