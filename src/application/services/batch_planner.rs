//! # Batch Planner
//!
//! Partitions settlement legs into transport-safe batches.
//!
//! Settlement preparation submits one operation per leg, and a transport
//! message has a hard byte budget. The planner asks a [`SizeEstimator`]
//! how big a candidate batch would serialize and greedily packs the
//! largest prefix that fits, halving the candidate count until it does.
//! The resulting ranges are contiguous, ascending and gapless; the ledger
//! treats its cumulative prepared-leg counter as the implicit offset of
//! the next batch, so any other ordering would corrupt it.
//!
//! # Examples
//!
//! ```
//! use rfq_settle::application::services::batch_planner::{
//!     plan_batches, SizeEstimate, SizeEstimator,
//! };
//! use rfq_settle::domain::value_objects::LegRange;
//!
//! #[derive(Debug)]
//! struct FlatEstimator;
//!
//! impl SizeEstimator for FlatEstimator {
//!     fn estimate(&self, range: LegRange) -> SizeEstimate {
//!         SizeEstimate::Bytes(range.count() as usize * 200)
//!     }
//! }
//!
//! // 800 bytes of legs against a 500-byte budget: two legs per batch.
//! let plan = plan_batches(4, &FlatEstimator, 50, 500).unwrap();
//! assert_eq!(plan, vec![LegRange::new(0, 2), LegRange::new(2, 2)]);
//! ```

use crate::application::error::PlanError;
use crate::domain::value_objects::LegRange;
use std::fmt;
use tracing::{debug, trace};

/// Serialized size of a candidate batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeEstimate {
    /// The batch serializes to this many bytes, excluding fixed overhead.
    Bytes(usize),
    /// The batch cannot be represented at all at this size.
    TooLarge,
}

/// Sizing oracle for candidate batches.
///
/// Implementations typically serialize the batch's operations and report
/// the encoded length. Returning [`SizeEstimate::TooLarge`] is equivalent
/// to exceeding the budget and makes the planner halve the candidate.
pub trait SizeEstimator: fmt::Debug {
    /// Estimates the serialized size of the given leg range.
    fn estimate(&self, range: LegRange) -> SizeEstimate;
}

/// Plans the batch partition for `leg_count` legs.
///
/// Returns contiguous `[start, start + count)` ranges covering
/// `[0, leg_count)` exactly once, in ascending order. Zero legs yield an
/// empty plan.
///
/// # Arguments
///
/// * `leg_count` - Total number of legs to cover
/// * `estimator` - Sizing oracle consulted per candidate batch
/// * `fixed_overhead_bytes` - Per-message overhead added to every estimate
/// * `budget_bytes` - Hard transport byte budget per batch
///
/// # Errors
///
/// Returns [`PlanError::IrreducibleOverhead`] if a single leg plus the
/// fixed overhead still exceeds the budget.
pub fn plan_batches(
    leg_count: u32,
    estimator: &dyn SizeEstimator,
    fixed_overhead_bytes: usize,
    budget_bytes: usize,
) -> Result<Vec<LegRange>, PlanError> {
    let mut plan = Vec::new();
    let mut start = 0;

    while start < leg_count {
        let range = next_batch(start, leg_count, estimator, fixed_overhead_bytes, budget_bytes)?;
        plan.push(range);
        start = range.end();
    }

    debug!(leg_count, batches = plan.len(), "planned batch partition");
    Ok(plan)
}

/// Finds the largest batch starting at `start` that fits the budget.
///
/// # Errors
///
/// Returns [`PlanError::IrreducibleOverhead`] if halving reaches zero legs
/// without fitting.
pub fn next_batch(
    start: u32,
    leg_count: u32,
    estimator: &dyn SizeEstimator,
    fixed_overhead_bytes: usize,
    budget_bytes: usize,
) -> Result<LegRange, PlanError> {
    let mut count = leg_count.saturating_sub(start);
    while count > 0 {
        let range = LegRange::new(start, count);
        let fits = match estimator.estimate(range) {
            SizeEstimate::Bytes(size) => {
                size.saturating_add(fixed_overhead_bytes) <= budget_bytes
            }
            SizeEstimate::TooLarge => false,
        };
        trace!(%range, fits, "sized candidate batch");
        if fits {
            return Ok(range);
        }
        count /= 2;
    }
    Err(PlanError::IrreducibleOverhead {
        start,
        budget_bytes,
    })
}
