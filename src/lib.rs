//! # rfq-settle
//!
//! Client-side decision layer for an over-the-counter Request-for-Quote
//! (RFQ) negotiation protocol between a single requester ("taker") and one
//! or more quoting counterparties ("makers").
//!
//! Given immutable snapshots of a negotiation request and its responses,
//! this crate:
//!
//! - derives the current lifecycle state and the single valid next action
//!   for a calling participant ([`domain::services::state_machine`]);
//! - computes, once a response is confirmed, the exact bilateral settlement
//!   amounts with a fixed asymmetric rounding policy
//!   ([`domain::services::settlement`]);
//! - partitions per-leg settlement operations into an ordered sequence of
//!   atomic, transport-size-bounded batches
//!   ([`application::services::batch_planner`]) and drives their sequential
//!   submission ([`application::services::batch_submitter`]).
//!
//! All decision logic is pure: every function is deterministic given its
//! snapshot arguments and an explicitly supplied `now`. The ledger that
//! enforces these rules, transaction signing and network transport live
//! behind the ports in [`infrastructure`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ application   batch planning/submission │
//! ├─────────────────────────────────────────┤
//! │ domain        snapshots, state machine, │
//! │               settlement math           │
//! ├─────────────────────────────────────────┤
//! │ infrastructure  clock + ledger ports    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Examples
//!
//! ```
//! use rfq_settle::application::services::batch_planner::{plan_batches, SizeEstimate, SizeEstimator};
//! use rfq_settle::domain::value_objects::LegRange;
//!
//! /// Flat ten bytes per leg.
//! #[derive(Debug)]
//! struct FlatEstimator;
//!
//! impl SizeEstimator for FlatEstimator {
//!     fn estimate(&self, range: LegRange) -> SizeEstimate {
//!         SizeEstimate::Bytes(range.count() as usize * 10)
//!     }
//! }
//!
//! // 5 legs, 100 bytes of fixed overhead, 1232-byte transport budget:
//! // everything fits in a single batch.
//! let plan = plan_batches(5, &FlatEstimator, 100, 1232).unwrap();
//! assert_eq!(plan, vec![LegRange::new(0, 5)]);
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
