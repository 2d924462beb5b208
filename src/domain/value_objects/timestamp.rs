//! # Timestamp Value Object
//!
//! DateTime wrapper with negotiation-window arithmetic.
//!
//! This module provides the [`Timestamp`] type used for request creation
//! times, expiry boundaries and settlement deadlines. Windows in the
//! protocol are whole seconds, and every deadline comparison is inclusive:
//! a request whose active window ends at `t` is already expired at exactly
//! `t` (see [`Timestamp::has_reached`]).
//!
//! # Examples
//!
//! ```
//! use rfq_settle::domain::value_objects::Timestamp;
//!
//! let created = Timestamp::from_secs(1_000).unwrap();
//! let expiry = created.add_secs(100);
//!
//! assert!(!created.has_reached(&expiry));
//! assert!(expiry.has_reached(&expiry)); // inclusive boundary
//! ```

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A UTC timestamp with nanosecond precision.
///
/// Wraps `chrono::DateTime<Utc>` with the arithmetic the negotiation
/// protocol needs: adding whole-second windows and inclusive deadline
/// checks.
///
/// # Invariants
///
/// - Always in UTC timezone
/// - Nanosecond precision
///
/// # Examples
///
/// ```
/// use rfq_settle::domain::value_objects::Timestamp;
///
/// let created = Timestamp::from_secs(1_700_000_000).unwrap();
/// let deadline = created.add_secs(300);
/// assert_eq!(deadline.timestamp_secs(), 1_700_000_300);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// # Returns
    ///
    /// `Some(Timestamp)` if the value is valid, `None` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfq_settle::domain::value_objects::Timestamp;
    ///
    /// let ts = Timestamp::from_secs(1704067200).unwrap();
    /// assert_eq!(ts.timestamp_secs(), 1704067200);
    /// ```
    #[must_use]
    pub fn from_secs(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }

    /// Creates a timestamp from Unix milliseconds.
    ///
    /// # Returns
    ///
    /// `Some(Timestamp)` if the value is valid, `None` otherwise.
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// Returns the Unix timestamp in seconds.
    #[inline]
    #[must_use]
    pub fn timestamp_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Returns the Unix timestamp in milliseconds.
    #[inline]
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Adds seconds to the timestamp.
    ///
    /// # Arguments
    ///
    /// * `secs` - Number of seconds to add (can be negative)
    ///
    /// # Examples
    ///
    /// ```
    /// use rfq_settle::domain::value_objects::Timestamp;
    ///
    /// let ts = Timestamp::from_secs(1000).unwrap();
    /// assert_eq!(ts.add_secs(60).timestamp_secs(), 1060);
    /// assert_eq!(ts.add_secs(-60).timestamp_secs(), 940);
    /// ```
    #[must_use]
    pub fn add_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }

    /// Subtracts seconds from the timestamp.
    #[must_use]
    pub fn sub_secs(&self, secs: i64) -> Self {
        Self(self.0 - Duration::seconds(secs))
    }

    /// Returns true if this timestamp has reached the given deadline.
    ///
    /// The comparison is inclusive: at exactly the deadline, the deadline
    /// counts as reached. This is the convention the ledger applies to both
    /// the active-window expiry and the settlement deadline.
    ///
    /// # Arguments
    ///
    /// * `deadline` - The boundary to test against
    ///
    /// # Examples
    ///
    /// ```
    /// use rfq_settle::domain::value_objects::Timestamp;
    ///
    /// let deadline = Timestamp::from_secs(1100).unwrap();
    ///
    /// assert!(!Timestamp::from_secs(1099).unwrap().has_reached(&deadline));
    /// assert!(Timestamp::from_secs(1100).unwrap().has_reached(&deadline));
    /// assert!(Timestamp::from_secs(1101).unwrap().has_reached(&deadline));
    /// ```
    #[inline]
    #[must_use]
    pub fn has_reached(&self, deadline: &Self) -> bool {
        self.0 >= deadline.0
    }

    /// Returns true if this timestamp is strictly before another.
    #[inline]
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.0 < other.0
    }

    /// Returns true if this timestamp is strictly after another.
    #[inline]
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.0 > other.0
    }

    /// Returns the duration between this timestamp and a later one.
    ///
    /// Returns zero if `other` is not after `self`.
    #[must_use]
    pub fn duration_until(&self, other: &Self) -> std::time::Duration {
        (other.0 - self.0).to_std().unwrap_or(std::time::Duration::ZERO)
    }

    /// Formats the timestamp as ISO 8601.
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Returns the underlying DateTime.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl Add<std::time::Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: std::time::Duration) -> Self::Output {
        Self(self.0 + Duration::from_std(rhs).unwrap_or(Duration::zero()))
    }
}

impl Sub<std::time::Duration> for Timestamp {
    type Output = Self;

    fn sub(self, rhs: std::time::Duration) -> Self::Output {
        Self(self.0 - Duration::from_std(rhs).unwrap_or(Duration::zero()))
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = std::time::Duration;

    fn sub(self, rhs: Timestamp) -> Self::Output {
        (self.0 - rhs.0)
            .to_std()
            .unwrap_or(std::time::Duration::ZERO)
    }
}
