//! # Response Entity
//!
//! Immutable snapshot of a maker's response to a negotiation request.
//!
//! A response carries up to two [`Quote`]s (bid and ask), an optional
//! [`Confirmation`] recorded when the taker accepts one side, the raw
//! ledger lifecycle flag, and the per-side settlement preparation counters
//! the default heuristic reads.
//!
//! Like [`NegotiationRequest`](super::negotiation_request::NegotiationRequest),
//! this entity is read-only: all transitions happen on the ledger.
//!
//! # Examples
//!
//! ```
//! use rfq_settle::domain::entities::response::{Confirmation, Quote, Response};
//! use rfq_settle::domain::value_objects::{Address, QuoteSide, ResponseLifecycle, Timestamp};
//! use rust_decimal::Decimal;
//!
//! let response = Response::builder(
//!     Address::new("resp-1"),
//!     Address::new("maker-1"),
//!     Address::new("rfq-1"),
//!     Timestamp::from_secs(1_010).unwrap(),
//! )
//! .with_ask(Quote::new(Decimal::from(10), Some(Decimal::from(2))))
//! .with_confirmation(Confirmation::new(QuoteSide::Ask, None))
//! .with_lifecycle(ResponseLifecycle::SettlingPreparations)
//! .build()
//! .unwrap();
//!
//! assert_eq!(response.confirmed_side(), Some(QuoteSide::Ask));
//! assert!(response.is_confirmed_on(QuoteSide::Ask));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{Address, Party, QuoteSide, ResponseLifecycle, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of a maker's two-way quote.
///
/// The price is per unit multiplier and may be negative (e.g. for spread
/// baskets). The explicit legs multiplier is mandatory for open-size
/// requests and absent otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    price: Decimal,
    legs_multiplier: Option<Decimal>,
}

impl Quote {
    /// Creates a new quote.
    ///
    /// # Arguments
    ///
    /// * `price` - Price per unit multiplier; sign encodes direction of
    ///   the quote-asset flow
    /// * `legs_multiplier` - Explicit multiplier for open-size requests
    #[must_use]
    pub const fn new(price: Decimal, legs_multiplier: Option<Decimal>) -> Self {
        Self {
            price,
            legs_multiplier,
        }
    }

    /// Returns the quoted price.
    #[inline]
    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    /// Returns the explicit legs multiplier, if quoted.
    #[inline]
    #[must_use]
    pub const fn legs_multiplier(&self) -> Option<Decimal> {
        self.legs_multiplier
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.legs_multiplier {
            Some(m) => write!(f, "Quote({} x {m})", self.price),
            None => write!(f, "Quote({})", self.price),
        }
    }
}

/// The taker's acceptance of one quoted side.
///
/// Recorded on the ledger at most once and never cleared. The optional
/// override multiplier lets the taker take a smaller fill than quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    side: QuoteSide,
    override_multiplier: Option<Decimal>,
}

impl Confirmation {
    /// Creates a new confirmation.
    ///
    /// # Arguments
    ///
    /// * `side` - The quoted side being accepted
    /// * `override_multiplier` - Optional smaller fill than quoted
    #[must_use]
    pub const fn new(side: QuoteSide, override_multiplier: Option<Decimal>) -> Self {
        Self {
            side,
            override_multiplier,
        }
    }

    /// Returns the confirmed side.
    #[inline]
    #[must_use]
    pub const fn side(&self) -> QuoteSide {
        self.side
    }

    /// Returns the override multiplier, if any.
    #[inline]
    #[must_use]
    pub const fn override_multiplier(&self) -> Option<Decimal> {
        self.override_multiplier
    }
}

/// Immutable snapshot of a maker's response.
///
/// # Invariants
///
/// - `request` references exactly one [`NegotiationRequest`] address
/// - The confirmation, once present, never changes
/// - Prepared-leg counters are bounded by the request's leg count
///   (enforced by the ledger; this snapshot only carries them)
///
/// [`NegotiationRequest`]: super::negotiation_request::NegotiationRequest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Ledger address of the response account.
    address: Address,
    /// Identity of the quoting maker.
    maker: Address,
    /// Address of the request this response belongs to.
    request: Address,
    /// When the response was created on the ledger.
    created_at: Timestamp,
    /// Optional bid quote.
    bid: Option<Quote>,
    /// Optional ask quote.
    ask: Option<Quote>,
    /// The taker's confirmation, set at most once.
    confirmation: Option<Confirmation>,
    /// Raw ledger lifecycle flag.
    lifecycle: ResponseLifecycle,
    /// Legs the maker has prepared for settlement.
    maker_prepared_legs: u32,
    /// Legs the taker has prepared for settlement.
    taker_prepared_legs: u32,
    /// Legs already settled.
    settled_legs: u32,
    /// Explicit defaulting party recorded by the ledger, if any.
    defaulting_party: Option<Party>,
    /// Collateral the maker has locked against this response.
    maker_collateral_locked: Decimal,
    /// Collateral the taker has locked against this response.
    taker_collateral_locked: Decimal,
}

impl Response {
    /// Starts building a response snapshot.
    ///
    /// # Arguments
    ///
    /// * `address` - Ledger address of the response account
    /// * `maker` - Identity of the quoting maker
    /// * `request` - Address of the request this response belongs to
    /// * `created_at` - Ledger creation timestamp
    #[must_use]
    pub fn builder(
        address: Address,
        maker: Address,
        request: Address,
        created_at: Timestamp,
    ) -> ResponseBuilder {
        ResponseBuilder {
            address,
            maker,
            request,
            created_at,
            bid: None,
            ask: None,
            confirmation: None,
            lifecycle: ResponseLifecycle::Active,
            maker_prepared_legs: 0,
            taker_prepared_legs: 0,
            settled_legs: 0,
            defaulting_party: None,
            maker_collateral_locked: Decimal::ZERO,
            taker_collateral_locked: Decimal::ZERO,
        }
    }

    /// Returns the ledger address of this response.
    #[inline]
    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Returns the maker identity.
    #[inline]
    #[must_use]
    pub fn maker(&self) -> &Address {
        &self.maker
    }

    /// Returns the address of the request this response belongs to.
    #[inline]
    #[must_use]
    pub fn request(&self) -> &Address {
        &self.request
    }

    /// Returns the creation timestamp.
    #[inline]
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns the quote on the given side, if present.
    #[must_use]
    pub fn quote(&self, side: QuoteSide) -> Option<&Quote> {
        match side {
            QuoteSide::Bid => self.bid.as_ref(),
            QuoteSide::Ask => self.ask.as_ref(),
        }
    }

    /// Returns the confirmation, if the taker has confirmed a side.
    #[inline]
    #[must_use]
    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    /// Returns the confirmed side, if any.
    #[inline]
    #[must_use]
    pub fn confirmed_side(&self) -> Option<QuoteSide> {
        self.confirmation.as_ref().map(Confirmation::side)
    }

    /// Returns true if the response is confirmed on the given side.
    #[inline]
    #[must_use]
    pub fn is_confirmed_on(&self, side: QuoteSide) -> bool {
        self.confirmed_side() == Some(side)
    }

    /// Returns the raw ledger lifecycle flag.
    #[inline]
    #[must_use]
    pub const fn lifecycle(&self) -> ResponseLifecycle {
        self.lifecycle
    }

    /// Returns the number of legs the given party has prepared.
    #[must_use]
    pub const fn prepared_legs(&self, party: Party) -> u32 {
        match party {
            Party::Maker => self.maker_prepared_legs,
            Party::Taker => self.taker_prepared_legs,
        }
    }

    /// Returns the number of legs already settled.
    #[inline]
    #[must_use]
    pub const fn settled_legs(&self) -> u32 {
        self.settled_legs
    }

    /// Returns the explicit defaulting party recorded by the ledger.
    #[inline]
    #[must_use]
    pub const fn defaulting_party(&self) -> Option<Party> {
        self.defaulting_party
    }

    /// Returns the collateral the given party has locked.
    #[must_use]
    pub const fn collateral_locked(&self, party: Party) -> Decimal {
        match party {
            Party::Maker => self.maker_collateral_locked,
            Party::Taker => self.taker_collateral_locked,
        }
    }

    /// Returns true if the given party has prepared every leg.
    #[must_use]
    pub fn fully_prepared(&self, party: Party, leg_count: u32) -> bool {
        self.prepared_legs(party) >= leg_count
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Response({}, maker {}, {})",
            self.address, self.maker, self.lifecycle
        )
    }
}

/// Builder for [`Response`] snapshots.
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    address: Address,
    maker: Address,
    request: Address,
    created_at: Timestamp,
    bid: Option<Quote>,
    ask: Option<Quote>,
    confirmation: Option<Confirmation>,
    lifecycle: ResponseLifecycle,
    maker_prepared_legs: u32,
    taker_prepared_legs: u32,
    settled_legs: u32,
    defaulting_party: Option<Party>,
    maker_collateral_locked: Decimal,
    taker_collateral_locked: Decimal,
}

impl ResponseBuilder {
    /// Sets the bid quote.
    #[must_use]
    pub fn with_bid(mut self, quote: Quote) -> Self {
        self.bid = Some(quote);
        self
    }

    /// Sets the ask quote.
    #[must_use]
    pub fn with_ask(mut self, quote: Quote) -> Self {
        self.ask = Some(quote);
        self
    }

    /// Records the taker's confirmation.
    #[must_use]
    pub fn with_confirmation(mut self, confirmation: Confirmation) -> Self {
        self.confirmation = Some(confirmation);
        self
    }

    /// Sets the raw ledger lifecycle flag.
    #[must_use]
    pub fn with_lifecycle(mut self, lifecycle: ResponseLifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Sets the prepared-leg counters (maker, taker).
    #[must_use]
    pub fn with_prepared_legs(mut self, maker: u32, taker: u32) -> Self {
        self.maker_prepared_legs = maker;
        self.taker_prepared_legs = taker;
        self
    }

    /// Sets the settled-leg counter.
    #[must_use]
    pub fn with_settled_legs(mut self, settled: u32) -> Self {
        self.settled_legs = settled;
        self
    }

    /// Records the explicit defaulting party.
    #[must_use]
    pub fn with_defaulting_party(mut self, party: Party) -> Self {
        self.defaulting_party = Some(party);
        self
    }

    /// Sets the locked collateral (maker, taker).
    #[must_use]
    pub fn with_collateral_locked(mut self, maker: Decimal, taker: Decimal) -> Self {
        self.maker_collateral_locked = maker;
        self.taker_collateral_locked = taker;
        self
    }

    /// Validates the snapshot and builds it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - neither a bid nor an ask quote is present
    /// - a confirmation references a side with no quote
    /// - collateral is negative
    pub fn build(self) -> DomainResult<Response> {
        if self.bid.is_none() && self.ask.is_none() {
            return Err(DomainError::validation(
                "response must quote at least one side",
            ));
        }
        if let Some(confirmation) = &self.confirmation {
            let quoted = match confirmation.side() {
                QuoteSide::Bid => self.bid.is_some(),
                QuoteSide::Ask => self.ask.is_some(),
            };
            if !quoted {
                return Err(DomainError::validation(
                    "confirmation references an unquoted side",
                ));
            }
        }
        if self.maker_collateral_locked.is_sign_negative()
            || self.taker_collateral_locked.is_sign_negative()
        {
            return Err(DomainError::validation("collateral must be non-negative"));
        }

        Ok(Response {
            address: self.address,
            maker: self.maker,
            request: self.request,
            created_at: self.created_at,
            bid: self.bid,
            ask: self.ask,
            confirmation: self.confirmation,
            lifecycle: self.lifecycle,
            maker_prepared_legs: self.maker_prepared_legs,
            taker_prepared_legs: self.taker_prepared_legs,
            settled_legs: self.settled_legs,
            defaulting_party: self.defaulting_party,
            maker_collateral_locked: self.maker_collateral_locked,
            taker_collateral_locked: self.taker_collateral_locked,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn base_builder() -> ResponseBuilder {
        Response::builder(
            Address::new("resp-1"),
            Address::new("maker-1"),
            Address::new("rfq-1"),
            Timestamp::from_secs(1_010).unwrap(),
        )
        .with_bid(Quote::new(Decimal::from(9), None))
        .with_ask(Quote::new(Decimal::from(11), None))
    }

    mod construction {
        use super::*;

        #[test]
        fn builder_produces_snapshot() {
            let response = base_builder().build().unwrap();
            assert_eq!(response.request(), &Address::new("rfq-1"));
            assert_eq!(response.lifecycle(), ResponseLifecycle::Active);
            assert!(response.confirmed_side().is_none());
        }

        #[test]
        fn quoteless_response_fails() {
            let result = Response::builder(
                Address::new("resp-1"),
                Address::new("maker-1"),
                Address::new("rfq-1"),
                Timestamp::from_secs(0).unwrap(),
            )
            .build();
            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        #[test]
        fn confirmation_on_unquoted_side_fails() {
            let result = Response::builder(
                Address::new("resp-1"),
                Address::new("maker-1"),
                Address::new("rfq-1"),
                Timestamp::from_secs(0).unwrap(),
            )
            .with_ask(Quote::new(Decimal::from(11), None))
            .with_confirmation(Confirmation::new(QuoteSide::Bid, None))
            .build();
            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        #[test]
        fn negative_collateral_fails() {
            let result = base_builder()
                .with_collateral_locked(Decimal::from(-1), Decimal::ZERO)
                .build();
            assert!(matches!(result, Err(DomainError::Validation(_))));
        }
    }

    mod accessors {
        use super::*;

        #[test]
        fn quote_by_side() {
            let response = base_builder().build().unwrap();
            assert_eq!(
                response.quote(QuoteSide::Bid).unwrap().price(),
                Decimal::from(9)
            );
            assert_eq!(
                response.quote(QuoteSide::Ask).unwrap().price(),
                Decimal::from(11)
            );
        }

        #[test]
        fn confirmed_side_reflects_confirmation() {
            let response = base_builder()
                .with_confirmation(Confirmation::new(QuoteSide::Bid, None))
                .build()
                .unwrap();
            assert_eq!(response.confirmed_side(), Some(QuoteSide::Bid));
            assert!(response.is_confirmed_on(QuoteSide::Bid));
            assert!(!response.is_confirmed_on(QuoteSide::Ask));
        }

        #[test]
        fn prepared_legs_per_party() {
            let response = base_builder().with_prepared_legs(3, 1).build().unwrap();
            assert_eq!(response.prepared_legs(Party::Maker), 3);
            assert_eq!(response.prepared_legs(Party::Taker), 1);
            assert!(response.fully_prepared(Party::Maker, 3));
            assert!(!response.fully_prepared(Party::Taker, 3));
        }

        #[test]
        fn collateral_per_party() {
            let response = base_builder()
                .with_collateral_locked(Decimal::from(50), Decimal::from(20))
                .build()
                .unwrap();
            assert_eq!(response.collateral_locked(Party::Maker), Decimal::from(50));
            assert_eq!(response.collateral_locked(Party::Taker), Decimal::from(20));
        }
    }

    mod serde_support {
        use super::*;

        #[test]
        fn serde_roundtrip() {
            let response = base_builder()
                .with_confirmation(Confirmation::new(QuoteSide::Ask, Some(Decimal::ONE)))
                .with_lifecycle(ResponseLifecycle::SettlingPreparations)
                .with_prepared_legs(2, 2)
                .with_defaulting_party(Party::Maker)
                .build()
                .unwrap();
            let json = serde_json::to_string(&response).unwrap();
            let back: Response = serde_json::from_str(&json).unwrap();
            assert_eq!(response, back);
        }
    }
}
