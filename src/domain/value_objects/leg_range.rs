//! # Leg Range
//!
//! A contiguous, index-ordered slice of a response's legs.
//!
//! Settlement preparation submits legs in batches. Each batch is described
//! by a [`LegRange`]: a starting leg index and a count. Ranges must be
//! submitted contiguously and in ascending order because the ledger tracks
//! cumulative prepared-leg counters and treats them as the implicit offset
//! for the next preparation call.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A contiguous range of leg indices, `[start, start + count)`.
///
/// # Examples
///
/// ```
/// use rfq_settle::domain::value_objects::LegRange;
///
/// let range = LegRange::new(3, 4);
/// assert_eq!(range.start(), 3);
/// assert_eq!(range.count(), 4);
/// assert_eq!(range.end(), 7);
/// assert!(range.contains(6));
/// assert!(!range.contains(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegRange {
    start: u32,
    count: u32,
}

impl LegRange {
    /// Creates a new range starting at `start` and covering `count` legs.
    #[inline]
    #[must_use]
    pub const fn new(start: u32, count: u32) -> Self {
        Self { start, count }
    }

    /// Returns the first leg index in the range.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> u32 {
        self.start
    }

    /// Returns the number of legs in the range.
    #[inline]
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Returns the exclusive end index of the range.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.start + self.count
    }

    /// Returns true if the range covers no legs.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if the given leg index falls inside the range.
    #[inline]
    #[must_use]
    pub const fn contains(&self, index: u32) -> bool {
        index >= self.start && index < self.end()
    }

    /// Returns the range immediately following this one with the given
    /// count.
    #[inline]
    #[must_use]
    pub const fn next(&self, count: u32) -> Self {
        Self::new(self.end(), count)
    }
}

impl fmt::Display for LegRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}
