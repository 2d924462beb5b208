//! # Request Size
//!
//! Defines how a negotiation request specifies its trade size.
//!
//! This module provides the [`RequestSize`] enum which controls where the
//! settlement legs multiplier comes from once a quote is confirmed.
//!
//! # Variants
//!
//! | Variant | Multiplier source at settlement |
//! |---------|---------------------------------|
//! | `Open` | The confirmed quote's explicit multiplier (mandatory) |
//! | `FixedBase` | The multiplier fixed on the request itself |
//! | `FixedQuote` | Derived as `quote_amount / |price|` |
//!
//! # Examples
//!
//! ```
//! use rfq_settle::domain::value_objects::RequestSize;
//! use rust_decimal::Decimal;
//!
//! let size = RequestSize::FixedBase {
//!     legs_multiplier: Decimal::from(2),
//! };
//! assert!(size.is_fixed());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the trade size of a request is specified.
///
/// The size type determines where the per-leg multiplier comes from when
/// settlement amounts are computed; see
/// [`compute_settlement`](crate::domain::services::settlement::compute_settlement).
///
/// # Examples
///
/// ```
/// use rfq_settle::domain::value_objects::RequestSize;
/// use rust_decimal::Decimal;
///
/// let open = RequestSize::Open;
/// assert!(!open.is_fixed());
///
/// let fixed = RequestSize::FixedQuote {
///     quote_amount: Decimal::from(1000),
/// };
/// assert!(fixed.is_fixed());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestSize {
    /// Size left open; each quote carries its own multiplier.
    Open,

    /// A fixed number of leg baskets.
    FixedBase {
        /// The number of leg baskets to trade.
        legs_multiplier: Decimal,
    },

    /// A fixed total amount of the quote asset.
    FixedQuote {
        /// The total quote-asset amount to trade.
        quote_amount: Decimal,
    },
}

impl RequestSize {
    /// Returns true if the size is fixed by the request itself.
    #[inline]
    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        matches!(self, Self::FixedBase { .. } | Self::FixedQuote { .. })
    }

    /// Returns the fixed base multiplier, if this is a fixed-base request.
    #[inline]
    #[must_use]
    pub const fn legs_multiplier(&self) -> Option<Decimal> {
        match self {
            Self::FixedBase { legs_multiplier } => Some(*legs_multiplier),
            _ => None,
        }
    }

    /// Returns the fixed quote amount, if this is a fixed-quote request.
    #[inline]
    #[must_use]
    pub const fn quote_amount(&self) -> Option<Decimal> {
        match self {
            Self::FixedQuote { quote_amount } => Some(*quote_amount),
            _ => None,
        }
    }
}

impl Default for RequestSize {
    /// Defaults to `Open`.
    fn default() -> Self {
        Self::Open
    }
}

impl fmt::Display for RequestSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::FixedBase { legs_multiplier } => write!(f, "FixedBase({legs_multiplier})"),
            Self::FixedQuote { quote_amount } => write!(f, "FixedQuote({quote_amount})"),
        }
    }
}
