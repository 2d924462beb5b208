//! # Domain Entities
//!
//! Immutable snapshots of on-ledger negotiation accounts.
//!
//! - [`negotiation_request::NegotiationRequest`] - a taker's RFQ and its legs
//! - [`response::Response`] - a maker's quotes, confirmation and
//!   settlement-preparation counters
//!
//! The decision layer never mutates these; every lifecycle transition is
//! enforced by the external ledger.

pub mod negotiation_request;
pub mod response;

pub use negotiation_request::{Leg, NegotiationRequest, NegotiationRequestBuilder};
pub use response::{Confirmation, Quote, Response, ResponseBuilder};
