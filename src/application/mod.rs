//! # Application Layer
//!
//! Orchestration above the pure domain: planning settlement batches and
//! driving their submission through the ledger port.

pub mod error;
pub mod services;

pub use error::{PlanError, SubmissionError};
