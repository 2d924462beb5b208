//! # Application Services
//!
//! Batch planning and the sequential submission driver.
//!
//! - [`batch_planner`] - partitions legs into transport-safe ranges
//! - [`batch_submitter`] - submits the partition in order, one batch at a
//!   time, with cooperative cancellation

pub mod batch_planner;
pub mod batch_submitter;

pub use batch_planner::{next_batch, plan_batches, SizeEstimate, SizeEstimator};
pub use batch_submitter::{submit_prepared_legs, CancellationFlag, SubmissionReport};
