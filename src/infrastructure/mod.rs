//! # Infrastructure Layer
//!
//! Ports to the outside world: wall-clock time and the settlement ledger.
//!
//! Everything here is a seam; the domain and application layers depend on
//! the traits, never on a concrete transport.

pub mod clock;
pub mod ledger;

pub use clock::{Clock, FixedClock, SystemClock};
