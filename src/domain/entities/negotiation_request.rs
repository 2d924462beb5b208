//! # Negotiation Request Entity
//!
//! Immutable snapshot of an on-ledger RFQ.
//!
//! This module provides the [`NegotiationRequest`] entity: a taker's
//! request for quotes on an ordered basket of [`Leg`]s, together with the
//! time-window arithmetic every state derivation relies on.
//!
//! Unlike a classic aggregate root, this entity is never mutated by the
//! decision layer. All transitions happen on the ledger; the snapshot only
//! answers questions about the state it captured.
//!
//! # Examples
//!
//! ```
//! use rfq_settle::domain::entities::negotiation_request::{Leg, NegotiationRequest};
//! use rfq_settle::domain::value_objects::{
//!     Address, LegSide, OrderDirection, RequestLifecycle, RequestSize, Timestamp,
//! };
//! use rust_decimal::Decimal;
//!
//! let request = NegotiationRequest::builder(
//!     Address::new("rfq-1"),
//!     Address::new("taker-1"),
//!     OrderDirection::TwoWay,
//!     RequestSize::Open,
//!     Timestamp::from_secs(1_000).unwrap(),
//! )
//! .with_leg(Leg::new(LegSide::Long, Decimal::from(5), 6))
//! .with_windows(100, 200)
//! .with_lifecycle(RequestLifecycle::Active)
//! .build()
//! .unwrap();
//!
//! // Expiry is inclusive: at exactly creation + active window the
//! // request is expired.
//! let at_expiry = Timestamp::from_secs(1_100).unwrap();
//! assert!(request.is_expired(at_expiry));
//! assert!(!request.is_expired(at_expiry.sub_secs(1)));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{
    Address, LegSide, OrderDirection, RequestLifecycle, RequestSize, Timestamp,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One instrument position within a request.
///
/// The leg carries only what settlement needs: its side from the taker's
/// perspective, the notional amount per unit multiplier, and the decimal
/// precision of the underlying asset. Instrument decoding is out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    side: LegSide,
    amount: Decimal,
    decimals: u32,
}

impl Leg {
    /// Creates a new leg.
    ///
    /// # Arguments
    ///
    /// * `side` - Long or short, from the taker's perspective
    /// * `amount` - Notional amount per unit multiplier
    /// * `decimals` - Decimal precision of the leg asset
    #[must_use]
    pub const fn new(side: LegSide, amount: Decimal, decimals: u32) -> Self {
        Self {
            side,
            amount,
            decimals,
        }
    }

    /// Returns the leg side.
    #[inline]
    #[must_use]
    pub const fn side(&self) -> LegSide {
        self.side
    }

    /// Returns the notional amount per unit multiplier.
    #[inline]
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the decimal precision of the leg asset.
    #[inline]
    #[must_use]
    pub const fn decimals(&self) -> u32 {
        self.decimals
    }
}

/// Immutable snapshot of a negotiation request ("RFQ").
///
/// # Invariants
///
/// - Legs are fixed once the request leaves `Constructed`
/// - `cleared_responses <= total_responses`, both monotone non-decreasing
/// - Collateral is non-negative
///
/// # Examples
///
/// ```
/// use rfq_settle::domain::entities::negotiation_request::{Leg, NegotiationRequest};
/// use rfq_settle::domain::value_objects::{
///     Address, LegSide, OrderDirection, RequestLifecycle, RequestSize, Timestamp,
/// };
/// use rust_decimal::Decimal;
///
/// let request = NegotiationRequest::builder(
///     Address::new("rfq-1"),
///     Address::new("taker-1"),
///     OrderDirection::Buy,
///     RequestSize::FixedBase { legs_multiplier: Decimal::from(2) },
///     Timestamp::from_secs(0).unwrap(),
/// )
/// .with_leg(Leg::new(LegSide::Long, Decimal::from(5), 9))
/// .with_windows(3600, 600)
/// .with_lifecycle(RequestLifecycle::Active)
/// .with_response_counters(3, 1, 0)
/// .build()
/// .unwrap();
///
/// assert_eq!(request.pending_responses(), 2);
/// assert_eq!(request.settlement_deadline().timestamp_secs(), 4200);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationRequest {
    /// Ledger address of the request account.
    address: Address,
    /// Identity of the requesting taker.
    taker: Address,
    /// Which quote sides the request solicits.
    direction: OrderDirection,
    /// How the trade size is specified.
    size: RequestSize,
    /// Decimal precision of the quote asset.
    quote_decimals: u32,
    /// Ordered basket of legs, immutable once active.
    legs: Vec<Leg>,
    /// When the request was created on the ledger.
    created_at: Timestamp,
    /// Seconds during which responses are accepted.
    active_window_secs: u32,
    /// Seconds after expiry allotted to settlement preparation.
    settling_window_secs: u32,
    /// Raw ledger lifecycle flag.
    lifecycle: RequestLifecycle,
    /// Total responses ever registered.
    total_responses: u32,
    /// Responses already cleaned up by the taker.
    cleared_responses: u32,
    /// Responses confirmed by the taker.
    confirmed_responses: u32,
    /// Collateral the taker currently has locked against this request.
    total_collateral_locked: Decimal,
}

impl NegotiationRequest {
    /// Starts building a request snapshot.
    ///
    /// # Arguments
    ///
    /// * `address` - Ledger address of the request account
    /// * `taker` - Identity of the requesting taker
    /// * `direction` - Which quote sides the request solicits
    /// * `size` - How the trade size is specified
    /// * `created_at` - Ledger creation timestamp
    #[must_use]
    pub fn builder(
        address: Address,
        taker: Address,
        direction: OrderDirection,
        size: RequestSize,
        created_at: Timestamp,
    ) -> NegotiationRequestBuilder {
        NegotiationRequestBuilder {
            address,
            taker,
            direction,
            size,
            created_at,
            quote_decimals: 6,
            legs: Vec::new(),
            active_window_secs: 3600,
            settling_window_secs: 3600,
            lifecycle: RequestLifecycle::Constructed,
            total_responses: 0,
            cleared_responses: 0,
            confirmed_responses: 0,
            total_collateral_locked: Decimal::ZERO,
        }
    }

    /// Returns the ledger address of this request.
    #[inline]
    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Returns the taker identity.
    #[inline]
    #[must_use]
    pub fn taker(&self) -> &Address {
        &self.taker
    }

    /// Returns the request direction.
    #[inline]
    #[must_use]
    pub const fn direction(&self) -> OrderDirection {
        self.direction
    }

    /// Returns the size specification.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> RequestSize {
        self.size
    }

    /// Returns the decimal precision of the quote asset.
    #[inline]
    #[must_use]
    pub const fn quote_decimals(&self) -> u32 {
        self.quote_decimals
    }

    /// Returns the ordered leg basket.
    #[inline]
    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Returns the number of legs.
    #[inline]
    #[must_use]
    pub fn leg_count(&self) -> u32 {
        self.legs.len() as u32
    }

    /// Returns the creation timestamp.
    #[inline]
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns the active window in seconds.
    #[inline]
    #[must_use]
    pub const fn active_window_secs(&self) -> u32 {
        self.active_window_secs
    }

    /// Returns the settling window in seconds.
    #[inline]
    #[must_use]
    pub const fn settling_window_secs(&self) -> u32 {
        self.settling_window_secs
    }

    /// Returns the raw ledger lifecycle flag.
    #[inline]
    #[must_use]
    pub const fn lifecycle(&self) -> RequestLifecycle {
        self.lifecycle
    }

    /// Returns the total number of responses ever registered.
    #[inline]
    #[must_use]
    pub const fn total_responses(&self) -> u32 {
        self.total_responses
    }

    /// Returns the number of responses already cleaned up.
    #[inline]
    #[must_use]
    pub const fn cleared_responses(&self) -> u32 {
        self.cleared_responses
    }

    /// Returns the number of confirmed responses.
    #[inline]
    #[must_use]
    pub const fn confirmed_responses(&self) -> u32 {
        self.confirmed_responses
    }

    /// Returns the taker collateral currently locked.
    #[inline]
    #[must_use]
    pub const fn total_collateral_locked(&self) -> Decimal {
        self.total_collateral_locked
    }

    /// Returns the number of responses not yet cleaned up.
    #[inline]
    #[must_use]
    pub const fn pending_responses(&self) -> u32 {
        self.total_responses.saturating_sub(self.cleared_responses)
    }

    /// Returns the moment the active window ends.
    #[must_use]
    pub fn expiry(&self) -> Timestamp {
        self.created_at.add_secs(i64::from(self.active_window_secs))
    }

    /// Returns the moment the settling window ends.
    #[must_use]
    pub fn settlement_deadline(&self) -> Timestamp {
        self.expiry().add_secs(i64::from(self.settling_window_secs))
    }

    /// Returns true if the active window has lapsed at `now`.
    ///
    /// The boundary is inclusive: at exactly the expiry instant the request
    /// is already expired.
    #[must_use]
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now.has_reached(&self.expiry())
    }

    /// Returns true if the settling window has lapsed at `now` (inclusive).
    #[must_use]
    pub fn settlement_window_elapsed(&self, now: Timestamp) -> bool {
        now.has_reached(&self.settlement_deadline())
    }
}

impl fmt::Display for NegotiationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NegotiationRequest({}, {}, {} legs, {})",
            self.address,
            self.direction,
            self.legs.len(),
            self.lifecycle
        )
    }
}

/// Builder for [`NegotiationRequest`] snapshots.
#[derive(Debug, Clone)]
pub struct NegotiationRequestBuilder {
    address: Address,
    taker: Address,
    direction: OrderDirection,
    size: RequestSize,
    created_at: Timestamp,
    quote_decimals: u32,
    legs: Vec<Leg>,
    active_window_secs: u32,
    settling_window_secs: u32,
    lifecycle: RequestLifecycle,
    total_responses: u32,
    cleared_responses: u32,
    confirmed_responses: u32,
    total_collateral_locked: Decimal,
}

impl NegotiationRequestBuilder {
    /// Appends a leg to the basket.
    #[must_use]
    pub fn with_leg(mut self, leg: Leg) -> Self {
        self.legs.push(leg);
        self
    }

    /// Replaces the whole leg basket.
    #[must_use]
    pub fn with_legs(mut self, legs: Vec<Leg>) -> Self {
        self.legs = legs;
        self
    }

    /// Sets the active and settling windows, in seconds.
    #[must_use]
    pub fn with_windows(mut self, active_secs: u32, settling_secs: u32) -> Self {
        self.active_window_secs = active_secs;
        self.settling_window_secs = settling_secs;
        self
    }

    /// Sets the quote-asset decimal precision.
    #[must_use]
    pub fn with_quote_decimals(mut self, decimals: u32) -> Self {
        self.quote_decimals = decimals;
        self
    }

    /// Sets the raw ledger lifecycle flag.
    #[must_use]
    pub fn with_lifecycle(mut self, lifecycle: RequestLifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Sets the response counters (total, cleared, confirmed).
    #[must_use]
    pub fn with_response_counters(mut self, total: u32, cleared: u32, confirmed: u32) -> Self {
        self.total_responses = total;
        self.cleared_responses = cleared;
        self.confirmed_responses = confirmed;
        self
    }

    /// Sets the taker collateral currently locked.
    #[must_use]
    pub fn with_collateral_locked(mut self, amount: Decimal) -> Self {
        self.total_collateral_locked = amount;
        self
    }

    /// Validates the snapshot and builds it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - the request is past `Constructed` but has no legs
    /// - `cleared_responses` or `confirmed_responses` exceeds
    ///   `total_responses`
    /// - any amount is negative
    pub fn build(self) -> DomainResult<NegotiationRequest> {
        if self.lifecycle != RequestLifecycle::Constructed && self.legs.is_empty() {
            return Err(DomainError::validation(
                "request past construction must have at least one leg",
            ));
        }
        if self.cleared_responses > self.total_responses {
            return Err(DomainError::validation(
                "cleared responses exceed total responses",
            ));
        }
        if self.confirmed_responses > self.total_responses {
            return Err(DomainError::validation(
                "confirmed responses exceed total responses",
            ));
        }
        if self.total_collateral_locked.is_sign_negative() {
            return Err(DomainError::validation("collateral must be non-negative"));
        }
        if self.legs.iter().any(|leg| leg.amount().is_sign_negative()) {
            return Err(DomainError::validation("leg amounts must be non-negative"));
        }

        Ok(NegotiationRequest {
            address: self.address,
            taker: self.taker,
            direction: self.direction,
            size: self.size,
            quote_decimals: self.quote_decimals,
            legs: self.legs,
            created_at: self.created_at,
            active_window_secs: self.active_window_secs,
            settling_window_secs: self.settling_window_secs,
            lifecycle: self.lifecycle,
            total_responses: self.total_responses,
            cleared_responses: self.cleared_responses,
            confirmed_responses: self.confirmed_responses,
            total_collateral_locked: self.total_collateral_locked,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn base_builder() -> NegotiationRequestBuilder {
        NegotiationRequest::builder(
            Address::new("rfq-1"),
            Address::new("taker-1"),
            OrderDirection::TwoWay,
            RequestSize::Open,
            Timestamp::from_secs(1_000).unwrap(),
        )
        .with_leg(Leg::new(LegSide::Long, Decimal::from(5), 9))
        .with_windows(100, 200)
        .with_lifecycle(RequestLifecycle::Active)
    }

    mod construction {
        use super::*;

        #[test]
        fn builder_produces_snapshot() {
            let request = base_builder().build().unwrap();
            assert_eq!(request.address(), &Address::new("rfq-1"));
            assert_eq!(request.leg_count(), 1);
            assert_eq!(request.lifecycle(), RequestLifecycle::Active);
        }

        #[test]
        fn active_request_without_legs_fails() {
            let result = base_builder().with_legs(Vec::new()).build();
            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        #[test]
        fn constructed_request_without_legs_is_allowed() {
            let request = base_builder()
                .with_legs(Vec::new())
                .with_lifecycle(RequestLifecycle::Constructed)
                .build()
                .unwrap();
            assert_eq!(request.leg_count(), 0);
        }

        #[test]
        fn cleared_above_total_fails() {
            let result = base_builder().with_response_counters(1, 2, 0).build();
            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        #[test]
        fn confirmed_above_total_fails() {
            let result = base_builder().with_response_counters(1, 0, 2).build();
            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        #[test]
        fn negative_collateral_fails() {
            let result = base_builder()
                .with_collateral_locked(Decimal::from(-1))
                .build();
            assert!(matches!(result, Err(DomainError::Validation(_))));
        }
    }

    mod windows {
        use super::*;

        #[test]
        fn expiry_and_deadline_arithmetic() {
            let request = base_builder().build().unwrap();
            assert_eq!(request.expiry().timestamp_secs(), 1_100);
            assert_eq!(request.settlement_deadline().timestamp_secs(), 1_300);
        }

        #[test]
        fn expiry_boundary_is_inclusive() {
            let request = base_builder().build().unwrap();
            let at_expiry = Timestamp::from_secs(1_100).unwrap();
            assert!(!request.is_expired(at_expiry.sub_secs(1)));
            assert!(request.is_expired(at_expiry));
            assert!(request.is_expired(at_expiry.add_secs(1)));
        }

        #[test]
        fn settlement_deadline_is_inclusive() {
            let request = base_builder().build().unwrap();
            let deadline = Timestamp::from_secs(1_300).unwrap();
            assert!(!request.settlement_window_elapsed(deadline.sub_secs(1)));
            assert!(request.settlement_window_elapsed(deadline));
        }
    }

    mod counters {
        use super::*;

        #[test]
        fn pending_is_total_minus_cleared() {
            let request = base_builder()
                .with_response_counters(5, 2, 1)
                .build()
                .unwrap();
            assert_eq!(request.pending_responses(), 3);
        }

        #[test]
        fn pending_is_zero_when_all_cleared() {
            let request = base_builder()
                .with_response_counters(4, 4, 0)
                .build()
                .unwrap();
            assert_eq!(request.pending_responses(), 0);
        }
    }

    mod serde_support {
        use super::*;

        #[test]
        fn serde_roundtrip() {
            let request = base_builder()
                .with_response_counters(2, 1, 1)
                .with_collateral_locked(Decimal::from(100))
                .build()
                .unwrap();
            let json = serde_json::to_string(&request).unwrap();
            let back: NegotiationRequest = serde_json::from_str(&json).unwrap();
            assert_eq!(request, back);
        }
    }
}
