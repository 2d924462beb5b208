//! # Domain Enums
//!
//! Enumeration types for negotiation concepts.
//!
//! This module provides the core enumerations used throughout the RFQ
//! decision layer:
//!
//! - [`Party`] - The two sides of a negotiation (taker or maker)
//! - [`QuoteSide`] - Bid or Ask side of a two-way quote
//! - [`LegSide`] - Long or Short position within a leg
//! - [`OrderDirection`] - Buy, Sell or TwoWay request direction
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A negotiation participant role.
///
/// The taker opens the request; makers respond with quotes. The same type
/// doubles as the receiver tag in settlement amounts and as the defaulting
/// party marker, because all three are drawn from the same two-element set.
///
/// # Examples
///
/// ```
/// use rfq_settle::domain::value_objects::Party;
///
/// assert_eq!(Party::Taker.opposite(), Party::Maker);
/// assert_eq!(Party::Maker.to_string(), "MAKER");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Party {
    /// The requester who opened the negotiation.
    Taker = 0,
    /// A quoting counterparty.
    Maker = 1,
}

impl Party {
    /// Returns the counterparty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfq_settle::domain::value_objects::Party;
    ///
    /// assert_eq!(Party::Taker.opposite(), Party::Maker);
    /// assert_eq!(Party::Maker.opposite(), Party::Taker);
    /// ```
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Taker => Self::Maker,
            Self::Maker => Self::Taker,
        }
    }

    /// Returns true if this is the taker.
    #[inline]
    #[must_use]
    pub const fn is_taker(self) -> bool {
        matches!(self, Self::Taker)
    }

    /// Returns true if this is a maker.
    #[inline]
    #[must_use]
    pub const fn is_maker(self) -> bool {
        matches!(self, Self::Maker)
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Taker => write!(f, "TAKER"),
            Self::Maker => write!(f, "MAKER"),
        }
    }
}

impl FromStr for Party {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TAKER" => Ok(Self::Taker),
            "MAKER" => Ok(Self::Maker),
            _ => Err(ParseEnumError::InvalidValue("Party", s.to_string())),
        }
    }
}

/// The side of a two-way quote.
///
/// A maker's response may carry a bid (price at which the maker buys the
/// legs) and/or an ask (price at which the maker sells). The taker confirms
/// exactly one side.
///
/// # Examples
///
/// ```
/// use rfq_settle::domain::value_objects::QuoteSide;
///
/// assert_eq!(QuoteSide::Bid.opposite(), QuoteSide::Ask);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum QuoteSide {
    /// The maker buys the leg basket at this price.
    Bid = 0,
    /// The maker sells the leg basket at this price.
    Ask = 1,
}

impl QuoteSide {
    /// Returns the opposite side.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Bid => Self::Ask,
            Self::Ask => Self::Bid,
        }
    }

    /// Returns true if this is the bid side.
    #[inline]
    #[must_use]
    pub const fn is_bid(self) -> bool {
        matches!(self, Self::Bid)
    }
}

impl fmt::Display for QuoteSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bid => write!(f, "BID"),
            Self::Ask => write!(f, "ASK"),
        }
    }
}

impl FromStr for QuoteSide {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BID" => Ok(Self::Bid),
            "ASK" => Ok(Self::Ask),
            _ => Err(ParseEnumError::InvalidValue("QuoteSide", s.to_string())),
        }
    }
}

/// The position direction of a single leg, from the taker's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum LegSide {
    /// The taker goes long this leg.
    Long = 0,
    /// The taker goes short this leg.
    Short = 1,
}

impl LegSide {
    /// Returns true if this is a short leg.
    #[inline]
    #[must_use]
    pub const fn is_short(self) -> bool {
        matches!(self, Self::Short)
    }
}

impl fmt::Display for LegSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => write!(f, "LONG"),
            Self::Short => write!(f, "SHORT"),
        }
    }
}

impl FromStr for LegSide {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LONG" => Ok(Self::Long),
            "SHORT" => Ok(Self::Short),
            _ => Err(ParseEnumError::InvalidValue("LegSide", s.to_string())),
        }
    }
}

/// The direction of a negotiation request.
///
/// Controls which quote sides makers are expected to provide: a `Buy`
/// request solicits asks, a `Sell` request solicits bids, and a `TwoWay`
/// request solicits both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum OrderDirection {
    /// The taker wants to buy; makers quote asks.
    Buy = 0,
    /// The taker wants to sell; makers quote bids.
    Sell = 1,
    /// The taker solicits both sides.
    TwoWay = 2,
}

impl OrderDirection {
    /// Returns true if makers are expected to quote the given side.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfq_settle::domain::value_objects::{OrderDirection, QuoteSide};
    ///
    /// assert!(OrderDirection::Buy.expects_side(QuoteSide::Ask));
    /// assert!(!OrderDirection::Buy.expects_side(QuoteSide::Bid));
    /// assert!(OrderDirection::TwoWay.expects_side(QuoteSide::Bid));
    /// ```
    #[must_use]
    pub const fn expects_side(self, side: QuoteSide) -> bool {
        match (self, side) {
            (Self::Buy, QuoteSide::Ask) | (Self::Sell, QuoteSide::Bid) => true,
            (Self::TwoWay, _) => true,
            _ => false,
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::TwoWay => write!(f, "TWOWAY"),
        }
    }
}

impl FromStr for OrderDirection {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            "TWOWAY" | "TWO_WAY" => Ok(Self::TwoWay),
            _ => Err(ParseEnumError::InvalidValue(
                "OrderDirection",
                s.to_string(),
            )),
        }
    }
}

/// Error returned when parsing an enum from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseEnumError {
    /// The string did not match any variant of the named enum.
    #[error("invalid {0} value: {1}")]
    InvalidValue(&'static str, String),
}
