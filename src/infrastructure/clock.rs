//! # Clock Port
//!
//! Wall-clock abstraction for state derivation.
//!
//! Every derivation in the domain layer takes `now` as a plain argument;
//! this port is how the surrounding application obtains that value. Tests
//! use [`FixedClock`] to pin time to a known instant.

use crate::domain::value_objects::Timestamp;
use std::fmt;

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current time.
    fn now(&self) -> Timestamp;
}

/// System wall-clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock pinned to a fixed instant, for tests.
///
/// # Examples
///
/// ```
/// use rfq_settle::domain::value_objects::Timestamp;
/// use rfq_settle::infrastructure::clock::{Clock, FixedClock};
///
/// let clock = FixedClock::at(Timestamp::from_secs(1_000).unwrap());
/// assert_eq!(clock.now().timestamp_secs(), 1_000);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(Timestamp);

impl FixedClock {
    /// Creates a clock that always reports the given instant.
    #[must_use]
    pub const fn at(now: Timestamp) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
