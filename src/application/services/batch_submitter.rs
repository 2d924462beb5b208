//! # Batch Submitter
//!
//! Drives sequential submission of a planned batch partition.
//!
//! Batches are submitted strictly one at a time: each batch's validity and
//! the next batch's implicit offset depend on the ledger state left by the
//! previous submission, so there is no parallelism to exploit. The first
//! ledger failure aborts the run. Cancellation is cooperative: the flag is
//! checked at every batch boundary, and a cancelled run is a normal
//! outcome reporting how far it got, never an error. Partially submitted
//! sequences are not rolled back; that is the ledger's job.
//!
//! # Examples
//!
//! ```
//! use rfq_settle::application::services::batch_submitter::{
//!     submit_prepared_legs, CancellationFlag,
//! };
//! use rfq_settle::domain::value_objects::{Address, LegRange};
//! use rfq_settle::infrastructure::ledger::InMemoryLedger;
//!
//! # tokio_test::block_on(async {
//! let ledger = InMemoryLedger::new();
//! let ranges = vec![LegRange::new(0, 3), LegRange::new(3, 2)];
//! let report = submit_prepared_legs(
//!     &ledger,
//!     &Address::new("resp-1"),
//!     &ranges,
//!     &CancellationFlag::new(),
//! )
//! .await
//! .unwrap();
//! assert_eq!(report.receipts.len(), 2);
//! assert!(!report.cancelled);
//! # });
//! ```

use crate::application::error::SubmissionError;
use crate::domain::value_objects::{Address, LegRange};
use crate::infrastructure::ledger::{LedgerClient, LedgerReceipt, SettlementBatch};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Cooperative cancellation flag shared between the submitter and its
/// caller.
///
/// Cancellation takes effect at the next batch boundary; a batch already
/// in flight completes normally.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    /// Creates a new, uncancelled flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true once cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Outcome of a submission run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    /// Receipts for the batches that landed, in submission order.
    pub receipts: Vec<LedgerReceipt>,
    /// True if the run stopped because cancellation was requested.
    pub cancelled: bool,
}

impl SubmissionReport {
    /// Returns true if every planned batch was submitted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.cancelled
    }
}

/// Submits the planned ranges for one response, sequentially and in order.
///
/// Stops at the first ledger failure; everything submitted before the
/// failure stays submitted. A cancelled run returns `Ok` with
/// `cancelled: true` and the receipts collected so far.
///
/// # Arguments
///
/// * `client` - The ledger port submissions go through
/// * `response` - The response whose legs are being prepared
/// * `ranges` - The planned partition, contiguous and ascending
/// * `cancel` - Cooperative cancellation flag
///
/// # Errors
///
/// Returns [`SubmissionError::Ledger`] carrying the failing batch index
/// and the underlying ledger error.
pub async fn submit_prepared_legs(
    client: &dyn LedgerClient,
    response: &Address,
    ranges: &[LegRange],
    cancel: &CancellationFlag,
) -> Result<SubmissionReport, SubmissionError> {
    let mut receipts = Vec::with_capacity(ranges.len());

    for (batch_index, range) in ranges.iter().enumerate() {
        if cancel.is_cancelled() {
            info!(
                %response,
                submitted = receipts.len(),
                planned = ranges.len(),
                "submission cancelled at batch boundary"
            );
            return Ok(SubmissionReport {
                receipts,
                cancelled: true,
            });
        }

        let batch = SettlementBatch::new(response.clone(), *range);
        match client.submit(&batch).await {
            Ok(receipt) => {
                info!(%batch, signature = %receipt.signature, "batch accepted");
                receipts.push(receipt);
            }
            Err(source) => {
                warn!(%batch, batch_index, error = %source, "batch failed, aborting run");
                return Err(SubmissionError::Ledger {
                    batch_index,
                    source,
                });
            }
        }
    }

    Ok(SubmissionReport {
        receipts,
        cancelled: false,
    })
}
