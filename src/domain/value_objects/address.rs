//! # Address Value Object
//!
//! Opaque on-ledger account identifier.
//!
//! Negotiation requests, responses and participants are all identified by
//! ledger addresses. The decision layer never interprets their contents; it
//! only compares them, so the type is a thin string newtype.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque ledger account address.
///
/// # Examples
///
/// ```
/// use rfq_settle::domain::value_objects::Address;
///
/// let a = Address::new("rfq-7f3a");
/// let b = Address::new("rfq-7f3a");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "rfq-7f3a");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Creates a new address from any string-like value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the address as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
