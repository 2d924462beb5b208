//! # Negotiation State Machine
//!
//! Derives lifecycle states and valid next actions from snapshots.
//!
//! The ledger stores only raw lifecycle flags; everything time-dependent
//! (expiry, the settlement deadline, default detection) is derived here.
//! Both derivation functions are pure: given the same snapshots, caller
//! role, side and `now`, they always return the same result.
//!
//! Two layers of output:
//!
//! - [`RequestState`] / [`ResponseState`] - what the negotiation looks like
//!   right now
//! - [`RequestAction`] / [`ResponseAction`] - the single valid next step
//!   for the calling participant, or `None` when there is nothing to do
//!
//! "No valid action" is never an error; only genuinely inconsistent inputs
//! (a response paired with the wrong request snapshot) are.
//!
//! # Examples
//!
//! ```
//! use rfq_settle::domain::entities::negotiation_request::{Leg, NegotiationRequest};
//! use rfq_settle::domain::services::state_machine::{
//!     derive_request_state, RequestAction, RequestState,
//! };
//! use rfq_settle::domain::value_objects::{
//!     Address, LegSide, OrderDirection, Party, RequestLifecycle, RequestSize, Timestamp,
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
//! let now = Timestamp::from_secs(1_050).unwrap();
//! let (state, action) = derive_request_state(&request, Party::Maker, now);
//! assert_eq!(state, RequestState::Active);
//! assert_eq!(action, Some(RequestAction::Respond));
//! ```

use crate::domain::entities::negotiation_request::NegotiationRequest;
use crate::domain::entities::response::Response;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{
    Party, QuoteSide, RequestLifecycle, ResponseLifecycle, Timestamp,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Derived lifecycle state of a negotiation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestState {
    /// Created but not yet finalized.
    Constructed,
    /// Open for responses.
    Active,
    /// The active window has lapsed.
    Expired,
    /// Canceled by the taker.
    Cancelled,
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Constructed => "CONSTRUCTED",
            Self::Active => "ACTIVE",
            Self::Expired => "EXPIRED",
            Self::Cancelled => "CANCELLED",
        };
        write!(f, "{s}")
    }
}

/// The single valid next step a participant can take on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestAction {
    /// Taker: finalize construction so the request goes active.
    FinalizeConstruction,
    /// Taker: cancel the request.
    Cancel,
    /// Taker: responses are pending and must be processed first.
    NewResponses,
    /// Maker: submit a quote.
    Respond,
    /// Taker: unlock the collateral still held against the request.
    UnlockCollateral,
    /// Taker: reclaim the request account.
    Cleanup,
}

impl fmt::Display for RequestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::FinalizeConstruction => "FINALIZE_CONSTRUCTION",
            Self::Cancel => "CANCEL",
            Self::NewResponses => "NEW_RESPONSES",
            Self::Respond => "RESPOND",
            Self::UnlockCollateral => "UNLOCK_COLLATERAL",
            Self::Cleanup => "CLEANUP",
        };
        write!(f, "{s}")
    }
}

/// Derived lifecycle state of a response, for one evaluated side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseState {
    /// Standing quote inside the active window.
    Active,
    /// The request expired before the quote was confirmed.
    Expired,
    /// Canceled by the maker.
    Cancelled,
    /// Confirmed, awaiting the maker's last look.
    WaitingForLastLook,
    /// Both sides still escrowing settlement legs.
    SettlingPreparations,
    /// Only the maker has prepared every leg.
    OnlyMakerPrepared,
    /// Only the taker has prepared every leg.
    OnlyTakerPrepared,
    /// All legs prepared on both sides.
    ReadyForSettling,
    /// Settlement completed.
    Settled,
    /// A party failed to prepare within the settling window.
    Defaulted,
}

impl fmt::Display for ResponseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "ACTIVE",
            Self::Expired => "EXPIRED",
            Self::Cancelled => "CANCELLED",
            Self::WaitingForLastLook => "WAITING_FOR_LAST_LOOK",
            Self::SettlingPreparations => "SETTLING_PREPARATIONS",
            Self::OnlyMakerPrepared => "ONLY_MAKER_PREPARED",
            Self::OnlyTakerPrepared => "ONLY_TAKER_PREPARED",
            Self::ReadyForSettling => "READY_FOR_SETTLING",
            Self::Settled => "SETTLED",
            Self::Defaulted => "DEFAULTED",
        };
        write!(f, "{s}")
    }
}

/// The single valid next step a participant can take on a response.
///
/// Some variants are instructions to submit (`Cancel`, `Approve`, `Settle`,
/// `UnlockCollateral`, `Cleanup`); the rest are terminal markers telling
/// the caller how the evaluated side ended (`Rejected`, `Defaulted`,
/// `Expired`, `Cancelled`, `Settled`), mirroring the protocol client this
/// layer fronts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseAction {
    /// Maker: withdraw the standing quote.
    Cancel,
    /// Taker: confirm the evaluated side.
    Approve,
    /// Either party: prepare and execute settlement.
    Settle,
    /// Maker: unlock the collateral still held against the response.
    UnlockCollateral,
    /// Maker: reclaim the response account.
    Cleanup,
    /// The taker confirmed the other side; this one was rejected.
    Rejected,
    /// Settlement failed; a party defaulted.
    Defaulted,
    /// The quote lapsed with the request's active window.
    Expired,
    /// The quote was cancelled.
    Cancelled,
    /// Settlement already completed.
    Settled,
}

impl fmt::Display for ResponseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Cancel => "CANCEL",
            Self::Approve => "APPROVE",
            Self::Settle => "SETTLE",
            Self::UnlockCollateral => "UNLOCK_COLLATERAL",
            Self::Cleanup => "CLEANUP",
            Self::Rejected => "REJECTED",
            Self::Defaulted => "DEFAULTED",
            Self::Expired => "EXPIRED",
            Self::Cancelled => "CANCELLED",
            Self::Settled => "SETTLED",
        };
        write!(f, "{s}")
    }
}

/// Derives the current state of a request and the caller's valid action.
///
/// Pure and deterministic for fixed `(request, role, now)`.
///
/// # Arguments
///
/// * `request` - The request snapshot
/// * `role` - Who is asking (taker or maker)
/// * `now` - Current wall-clock time, supplied by the caller
#[must_use]
pub fn derive_request_state(
    request: &NegotiationRequest,
    role: Party,
    now: Timestamp,
) -> (RequestState, Option<RequestAction>) {
    let state = match request.lifecycle() {
        RequestLifecycle::Canceled => RequestState::Cancelled,
        RequestLifecycle::Active if request.is_expired(now) => RequestState::Expired,
        RequestLifecycle::Active => RequestState::Active,
        RequestLifecycle::Constructed => RequestState::Constructed,
    };

    let action = request_action(request, role, state);
    debug!(request = %request.address(), %role, %state, ?action, "derived request state");
    (state, action)
}

fn request_action(
    request: &NegotiationRequest,
    role: Party,
    state: RequestState,
) -> Option<RequestAction> {
    match (state, role) {
        (RequestState::Constructed, Party::Taker) => Some(RequestAction::FinalizeConstruction),
        (RequestState::Constructed, Party::Maker) => None,

        (RequestState::Active, Party::Taker) => {
            if request.pending_responses() > 0 {
                Some(RequestAction::NewResponses)
            } else {
                Some(RequestAction::Cancel)
            }
        }
        (RequestState::Active, Party::Maker) => Some(RequestAction::Respond),

        // Collateral can only be unlocked once every response has been
        // cleaned up, so pending responses take precedence here too.
        (RequestState::Expired | RequestState::Cancelled, Party::Taker) => {
            if request.pending_responses() > 0 {
                Some(RequestAction::NewResponses)
            } else if request.total_collateral_locked() > rust_decimal::Decimal::ZERO {
                Some(RequestAction::UnlockCollateral)
            } else {
                Some(RequestAction::Cleanup)
            }
        }
        (RequestState::Expired | RequestState::Cancelled, Party::Maker) => None,
    }
}

/// Determines the defaulting party, if any.
///
/// The explicit on-ledger flag is authoritative whenever present. Without
/// it, a default is inferred once the settlement deadline has passed
/// (inclusive) with either side's prepared-leg counter short of the leg
/// count; the under-prepared side is reported, taker checked first.
///
/// # Arguments
///
/// * `request` - The request snapshot (supplies legs and the deadline)
/// * `response` - The response snapshot
/// * `now` - Current wall-clock time
#[must_use]
pub fn defaulting_party(
    request: &NegotiationRequest,
    response: &Response,
    now: Timestamp,
) -> Option<Party> {
    if let Some(party) = response.defaulting_party() {
        return Some(party);
    }
    if !request.settlement_window_elapsed(now) {
        return None;
    }
    let legs = request.leg_count();
    if !response.fully_prepared(Party::Taker, legs) {
        Some(Party::Taker)
    } else if !response.fully_prepared(Party::Maker, legs) {
        Some(Party::Maker)
    } else {
        None
    }
}

/// Derives the current state of a response, and the valid action for the
/// calling participant evaluating the given quote side.
///
/// Pure and deterministic for fixed
/// `(request, response, role, side, now)`.
///
/// # Arguments
///
/// * `request` - The request the response belongs to
/// * `response` - The response snapshot
/// * `role` - Who is asking (taker or maker)
/// * `side` - The quote side the caller is evaluating
/// * `now` - Current wall-clock time
///
/// # Errors
///
/// Returns `DomainError::RequestMismatch` if the response references a
/// different request than the snapshot supplied.
pub fn derive_response_state(
    request: &NegotiationRequest,
    response: &Response,
    role: Party,
    side: QuoteSide,
    now: Timestamp,
) -> DomainResult<(ResponseState, Option<ResponseAction>)> {
    if response.request() != request.address() {
        return Err(DomainError::request_mismatch(
            response.request().clone(),
            request.address().clone(),
        ));
    }

    let state = response_state(request, response, now);
    let action = response_action(request, response, role, side, state, now);
    debug!(
        response = %response.address(),
        %role,
        %side,
        %state,
        ?action,
        "derived response state"
    );
    Ok((state, action))
}

fn response_state(
    request: &NegotiationRequest,
    response: &Response,
    now: Timestamp,
) -> ResponseState {
    match response.lifecycle() {
        ResponseLifecycle::Active if request.is_expired(now) => ResponseState::Expired,
        ResponseLifecycle::Active => ResponseState::Active,
        ResponseLifecycle::Canceled => ResponseState::Cancelled,
        ResponseLifecycle::WaitingForLastLook if request.is_expired(now) => ResponseState::Expired,
        ResponseLifecycle::WaitingForLastLook => ResponseState::WaitingForLastLook,
        ResponseLifecycle::SettlingPreparations => {
            if request.settlement_window_elapsed(now) {
                ResponseState::Defaulted
            } else {
                let legs = request.leg_count();
                let maker_done = response.fully_prepared(Party::Maker, legs);
                let taker_done = response.fully_prepared(Party::Taker, legs);
                match (maker_done, taker_done) {
                    (true, false) => ResponseState::OnlyMakerPrepared,
                    (false, true) => ResponseState::OnlyTakerPrepared,
                    _ => ResponseState::SettlingPreparations,
                }
            }
        }
        ResponseLifecycle::ReadyForSettling => ResponseState::ReadyForSettling,
        ResponseLifecycle::Settled => ResponseState::Settled,
        ResponseLifecycle::Defaulted => ResponseState::Defaulted,
    }
}

fn response_action(
    request: &NegotiationRequest,
    response: &Response,
    role: Party,
    side: QuoteSide,
    state: ResponseState,
    now: Timestamp,
) -> Option<ResponseAction> {
    let confirmed_here = response.is_confirmed_on(side);
    let confirmed_opposite = response.is_confirmed_on(side.opposite());
    let defaulted = defaulting_party(request, response, now).is_some();

    // A confirmed-and-defaulted response dominates every other outcome.
    if confirmed_here && defaulted {
        return Some(ResponseAction::Defaulted);
    }

    match role {
        Party::Maker => match state {
            ResponseState::Active => {
                if confirmed_opposite {
                    Some(ResponseAction::Rejected)
                } else if response.confirmed_side().is_none() {
                    Some(ResponseAction::Cancel)
                } else {
                    None
                }
            }
            ResponseState::Expired => {
                if confirmed_opposite {
                    Some(ResponseAction::Rejected)
                } else if response.confirmed_side().is_some() {
                    None
                } else if response.collateral_locked(Party::Maker) > rust_decimal::Decimal::ZERO {
                    Some(ResponseAction::UnlockCollateral)
                } else {
                    Some(ResponseAction::Cleanup)
                }
            }
            ResponseState::Cancelled => {
                if response.collateral_locked(Party::Maker) > rust_decimal::Decimal::ZERO {
                    Some(ResponseAction::UnlockCollateral)
                } else {
                    Some(ResponseAction::Cleanup)
                }
            }
            ResponseState::WaitingForLastLook => None,
            ResponseState::SettlingPreparations
            | ResponseState::OnlyMakerPrepared
            | ResponseState::OnlyTakerPrepared
            | ResponseState::ReadyForSettling => {
                settlement_phase_action(confirmed_here, confirmed_opposite)
            }
            ResponseState::Settled => {
                if confirmed_opposite {
                    Some(ResponseAction::Rejected)
                } else {
                    Some(ResponseAction::Settled)
                }
            }
            ResponseState::Defaulted => {
                if confirmed_opposite {
                    Some(ResponseAction::Rejected)
                } else {
                    None
                }
            }
        },
        Party::Taker => match state {
            ResponseState::Active => {
                if confirmed_opposite {
                    Some(ResponseAction::Rejected)
                } else if response.confirmed_side().is_none() {
                    Some(ResponseAction::Approve)
                } else {
                    None
                }
            }
            ResponseState::Expired => Some(ResponseAction::Expired),
            ResponseState::Cancelled => Some(ResponseAction::Cancelled),
            ResponseState::WaitingForLastLook => None,
            ResponseState::SettlingPreparations
            | ResponseState::OnlyMakerPrepared
            | ResponseState::OnlyTakerPrepared
            | ResponseState::ReadyForSettling => {
                settlement_phase_action(confirmed_here, confirmed_opposite)
            }
            ResponseState::Settled => {
                if confirmed_opposite {
                    Some(ResponseAction::Rejected)
                } else {
                    Some(ResponseAction::Settled)
                }
            }
            ResponseState::Defaulted => {
                if confirmed_opposite {
                    Some(ResponseAction::Rejected)
                } else {
                    None
                }
            }
        },
    }
}

// Shared by both roles: inside the settlement phase the evaluated side is
// either the confirmed one (settle it) or the rejected one.
fn settlement_phase_action(
    confirmed_here: bool,
    confirmed_opposite: bool,
) -> Option<ResponseAction> {
    if confirmed_here {
        Some(ResponseAction::Settle)
    } else if confirmed_opposite {
        Some(ResponseAction::Rejected)
    } else {
        None
    }
}
