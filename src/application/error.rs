//! # Application Errors
//!
//! Error types for batch planning and submission.
//!
//! Planning failures are configuration problems: the transport budget
//! cannot fit even a single leg, so retrying is pointless. Submission
//! failures carry the index of the failing batch so the caller knows how
//! far the sequence got before it aborted.
//!
//! # Examples
//!
//! ```
//! use rfq_settle::application::error::PlanError;
//!
//! let err = PlanError::IrreducibleOverhead {
//!     start: 4,
//!     budget_bytes: 1232,
//! };
//! assert_eq!(
//!     err.to_string(),
//!     "irreducible overhead: leg 4 alone exceeds the 1232-byte budget"
//! );
//! ```

use crate::infrastructure::ledger::LedgerError;
use thiserror::Error;

/// Batch planning error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Halving exhausted: a single leg plus the fixed overhead does not
    /// fit the transport budget.
    #[error("irreducible overhead: leg {start} alone exceeds the {budget_bytes}-byte budget")]
    IrreducibleOverhead {
        /// Index of the leg that could not be placed.
        start: u32,
        /// The transport budget that was exceeded.
        budget_bytes: usize,
    },
}

/// Batch submission error.
///
/// Cancellation is not represented here; a cancelled run is a normal
/// outcome reported through the submission report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The ledger failed a batch; everything before `batch_index` landed.
    #[error("batch {batch_index} failed: {source}")]
    Ledger {
        /// Zero-based index of the failing batch.
        batch_index: usize,
        /// The underlying ledger failure.
        #[source]
        source: LedgerError,
    },
}
