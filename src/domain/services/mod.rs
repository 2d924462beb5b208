//! # Domain Services
//!
//! Pure computations over request and response snapshots.
//!
//! - [`state_machine`] - lifecycle state and next-action derivation
//! - [`settlement`] - transfer direction and amount computation
//!
//! Both take `now` as an argument rather than reading a clock, so every
//! derivation is deterministic and directly testable.

pub mod settlement;
pub mod state_machine;

pub use settlement::{compute_settlement, PartyAmount, SettlementResult};
pub use state_machine::{
    defaulting_party, derive_request_state, derive_response_state, RequestAction, RequestState,
    ResponseAction, ResponseState,
};
