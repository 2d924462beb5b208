//! # Settlement Calculator
//!
//! Computes who receives what once a negotiation is confirmed.
//!
//! A confirmed response settles as one quote-asset transfer plus one
//! transfer per leg. Each transfer is a [`PartyAmount`]: the receiving
//! party and a non-negative amount already rounded to the asset's
//! precision. Direction follows two independent parity rules and rounding
//! is asymmetric (up for the maker, down for the taker) so the computed
//! amounts never exceed what the counterparty escrowed.
//!
//! # Examples
//!
//! ```
//! use rfq_settle::domain::entities::negotiation_request::{Leg, NegotiationRequest};
//! use rfq_settle::domain::entities::response::{Confirmation, Quote, Response};
//! use rfq_settle::domain::services::settlement::compute_settlement;
//! use rfq_settle::domain::value_objects::{
//!     Address, LegSide, OrderDirection, Party, QuoteSide, RequestSize, Timestamp,
//! };
//! use rust_decimal::Decimal;
//!
//! let request = NegotiationRequest::builder(
//!     Address::new("rfq-1"),
//!     Address::new("taker-1"),
//!     OrderDirection::Buy,
//!     RequestSize::FixedBase {
//!         legs_multiplier: Decimal::from(2),
//!     },
//!     Timestamp::from_secs(1_000).unwrap(),
//! )
//! .with_leg(Leg::new(LegSide::Long, Decimal::from(5), 2))
//! .with_quote_decimals(2)
//! .build()
//! .unwrap();
//!
//! let response = Response::builder(
//!     Address::new("resp-1"),
//!     Address::new("maker-1"),
//!     Address::new("rfq-1"),
//!     Timestamp::from_secs(1_010).unwrap(),
//! )
//! .with_ask(Quote::new(Decimal::from(10), None))
//! .with_confirmation(Confirmation::new(QuoteSide::Ask, None))
//! .build()
//! .unwrap();
//!
//! let result = compute_settlement(&request, &response, None).unwrap();
//! assert_eq!(result.legs[0].receiver, Party::Taker);
//! assert_eq!(result.legs[0].amount.to_string(), "10.00");
//! assert_eq!(result.quote.receiver, Party::Maker);
//! assert_eq!(result.quote.amount.to_string(), "20.00");
//! ```

use crate::domain::entities::negotiation_request::NegotiationRequest;
use crate::domain::entities::response::{Confirmation, Quote, Response};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{
    round_dp, CheckedArithmetic, LegSide, Party, QuoteSide, RequestSize, Rounding,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single settlement transfer: the receiving party and the amount,
/// rounded to the asset's precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyAmount {
    /// Who receives the transfer.
    pub receiver: Party,
    /// Transfer amount, rounded up when the maker receives and down when
    /// the taker receives.
    pub amount: Decimal,
}

/// Full settlement breakdown for a confirmed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResult {
    /// The quote-asset transfer.
    pub quote: PartyAmount,
    /// One transfer per request leg, in leg order.
    pub legs: Vec<PartyAmount>,
}

/// Computes the settlement transfers for a confirmed response.
///
/// The confirmation can be supplied explicitly (a preview against a side
/// that is not yet recorded on the ledger) or taken from the response
/// itself; an explicit one wins.
///
/// # Arguments
///
/// * `request` - The request snapshot (legs, size type, quote precision)
/// * `response` - The response carrying the confirmed quote
/// * `confirmation` - Optional explicit confirmation overriding the
///   response's own
///
/// # Errors
///
/// * `DomainError::RequestMismatch` - the response references another
///   request
/// * `DomainError::UnconfirmedSettlement` - no confirmation was supplied
///   and the response carries none
/// * `DomainError::MissingQuote` - the confirmed side has no quote
/// * `DomainError::MissingLegsMultiplier` - open size without an explicit
///   multiplier on the confirmed quote
/// * `DomainError::Arithmetic` - overflow, or a fixed-quote size with a
///   zero price
pub fn compute_settlement(
    request: &NegotiationRequest,
    response: &Response,
    confirmation: Option<&Confirmation>,
) -> DomainResult<SettlementResult> {
    if response.request() != request.address() {
        return Err(DomainError::request_mismatch(
            response.request().clone(),
            request.address().clone(),
        ));
    }

    let confirmation = confirmation
        .or_else(|| response.confirmation())
        .ok_or(DomainError::UnconfirmedSettlement)?;
    let side = confirmation.side();
    let quote = response
        .quote(side)
        .ok_or(DomainError::MissingQuote(side))?;

    let multiplier = extract_multiplier(request, quote, confirmation)?;
    debug!(
        request = %request.address(),
        response = %response.address(),
        %side,
        %multiplier,
        "computing settlement"
    );

    let legs = request
        .legs()
        .iter()
        .map(|leg| {
            let receiver = leg_receiver(leg.side(), side);
            let amount = leg.amount().safe_mul(multiplier)?;
            Ok(PartyAmount {
                receiver,
                amount: round_dp(amount, leg.decimals(), Rounding::for_receiver(receiver)),
            })
        })
        .collect::<DomainResult<Vec<_>>>()?;

    let quote_transfer = quote_amount(request, quote, side, multiplier)?;

    Ok(SettlementResult {
        quote: quote_transfer,
        legs,
    })
}

/// Resolves the legs multiplier for the confirmed quote.
///
/// An explicit override on the confirmation always wins; otherwise the
/// size type decides where the multiplier comes from.
fn extract_multiplier(
    request: &NegotiationRequest,
    quote: &Quote,
    confirmation: &Confirmation,
) -> DomainResult<Decimal> {
    if let Some(multiplier) = confirmation.override_multiplier() {
        return Ok(multiplier);
    }
    match request.size() {
        RequestSize::FixedBase { legs_multiplier } => Ok(legs_multiplier),
        RequestSize::FixedQuote { quote_amount } => {
            Ok(quote_amount.safe_div(quote.price().abs())?)
        }
        RequestSize::Open => quote
            .legs_multiplier()
            .ok_or(DomainError::MissingLegsMultiplier),
    }
}

// Start with the taker, flip once for a short leg and once for a bid
// confirmation. The net receiver depends on the parity of the two flips.
fn leg_receiver(leg_side: LegSide, confirmed: QuoteSide) -> Party {
    let mut receiver = Party::Taker;
    if leg_side.is_short() {
        receiver = receiver.opposite();
    }
    if confirmed.is_bid() {
        receiver = receiver.opposite();
    }
    receiver
}

// Start with the maker, flip once for a bid confirmation and once for a
// negative price.
fn quote_receiver(confirmed: QuoteSide, price: Decimal) -> Party {
    let mut receiver = Party::Maker;
    if confirmed.is_bid() {
        receiver = receiver.opposite();
    }
    if price.is_sign_negative() && !price.is_zero() {
        receiver = receiver.opposite();
    }
    receiver
}

fn quote_amount(
    request: &NegotiationRequest,
    quote: &Quote,
    side: QuoteSide,
    multiplier: Decimal,
) -> DomainResult<PartyAmount> {
    let receiver = quote_receiver(side, quote.price());
    // A fixed-quote request settles exactly the requested amount; the
    // multiplier only drove the leg sizes.
    let amount = match request.size() {
        RequestSize::FixedQuote { quote_amount } => quote_amount,
        RequestSize::FixedBase { .. } | RequestSize::Open => {
            let raw = multiplier.safe_mul(quote.price().abs())?;
            round_dp(raw, request.quote_decimals(), Rounding::for_receiver(receiver))
        }
    };
    Ok(PartyAmount { receiver, amount })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Address, OrderDirection, Timestamp};

    fn request_with(size: RequestSize, legs: Vec<crate::domain::entities::Leg>) -> NegotiationRequest {
        NegotiationRequest::builder(
            Address::new("rfq-1"),
            Address::new("taker-1"),
            OrderDirection::TwoWay,
            size,
            Timestamp::from_secs(1_000).unwrap(),
        )
        .with_legs(legs)
        .with_quote_decimals(2)
        .build()
        .unwrap()
    }

    fn response_with(
        bid: Option<Quote>,
        ask: Option<Quote>,
        confirmation: Option<Confirmation>,
    ) -> Response {
        let mut builder = Response::builder(
            Address::new("resp-1"),
            Address::new("maker-1"),
            Address::new("rfq-1"),
            Timestamp::from_secs(1_010).unwrap(),
        );
        if let Some(quote) = bid {
            builder = builder.with_bid(quote);
        }
        if let Some(quote) = ask {
            builder = builder.with_ask(quote);
        }
        if let Some(confirmation) = confirmation {
            builder = builder.with_confirmation(confirmation);
        }
        builder.build().unwrap()
    }

    fn long_leg(amount: i64, decimals: u32) -> crate::domain::entities::Leg {
        crate::domain::entities::Leg::new(LegSide::Long, Decimal::from(amount), decimals)
    }

    fn short_leg(amount: i64, decimals: u32) -> crate::domain::entities::Leg {
        crate::domain::entities::Leg::new(LegSide::Short, Decimal::from(amount), decimals)
    }

    mod preconditions {
        use super::*;

        #[test]
        fn mismatched_request_is_fatal() {
            let request = request_with(RequestSize::Open, vec![long_leg(5, 2)]);
            let response = Response::builder(
                Address::new("resp-1"),
                Address::new("maker-1"),
                Address::new("other-rfq"),
                Timestamp::from_secs(1_010).unwrap(),
            )
            .with_ask(Quote::new(Decimal::TEN, Some(Decimal::ONE)))
            .build()
            .unwrap();

            assert!(matches!(
                compute_settlement(&request, &response, None),
                Err(DomainError::RequestMismatch { .. })
            ));
        }

        #[test]
        fn unconfirmed_settlement_is_fatal() {
            let request = request_with(RequestSize::Open, vec![long_leg(5, 2)]);
            let response = response_with(
                None,
                Some(Quote::new(Decimal::TEN, Some(Decimal::ONE))),
                None,
            );

            assert_eq!(
                compute_settlement(&request, &response, None),
                Err(DomainError::UnconfirmedSettlement)
            );
        }

        #[test]
        fn explicit_confirmation_enables_preview() {
            let request = request_with(RequestSize::Open, vec![long_leg(5, 2)]);
            let response = response_with(
                None,
                Some(Quote::new(Decimal::TEN, Some(Decimal::ONE))),
                None,
            );
            let confirmation = Confirmation::new(QuoteSide::Ask, None);

            let result = compute_settlement(&request, &response, Some(&confirmation)).unwrap();
            assert_eq!(result.legs.len(), 1);
        }

        #[test]
        fn explicit_confirmation_on_unquoted_side_is_fatal() {
            let request = request_with(RequestSize::Open, vec![long_leg(5, 2)]);
            let response = response_with(
                None,
                Some(Quote::new(Decimal::TEN, Some(Decimal::ONE))),
                None,
            );
            let confirmation = Confirmation::new(QuoteSide::Bid, None);

            assert_eq!(
                compute_settlement(&request, &response, Some(&confirmation)),
                Err(DomainError::MissingQuote(QuoteSide::Bid))
            );
        }

        #[test]
        fn open_size_without_multiplier_is_fatal() {
            let request = request_with(RequestSize::Open, vec![long_leg(5, 2)]);
            let response = response_with(
                None,
                Some(Quote::new(Decimal::TEN, None)),
                Some(Confirmation::new(QuoteSide::Ask, None)),
            );

            assert_eq!(
                compute_settlement(&request, &response, None),
                Err(DomainError::MissingLegsMultiplier)
            );
        }
    }

    mod worked_example {
        use super::*;

        #[test]
        fn fixed_base_ask_confirmation() {
            let request = request_with(
                RequestSize::FixedBase {
                    legs_multiplier: Decimal::from(2),
                },
                vec![long_leg(5, 2)],
            );
            let response = response_with(
                None,
                Some(Quote::new(Decimal::TEN, None)),
                Some(Confirmation::new(QuoteSide::Ask, None)),
            );

            let result = compute_settlement(&request, &response, None).unwrap();
            assert_eq!(result.legs[0].receiver, Party::Taker);
            assert_eq!(result.legs[0].amount.to_string(), "10.00");
            assert_eq!(result.quote.receiver, Party::Maker);
            assert_eq!(result.quote.amount.to_string(), "20.00");
        }
    }

    mod receivers {
        use super::*;

        #[test]
        fn short_leg_flips_receiver() {
            assert_eq!(leg_receiver(LegSide::Long, QuoteSide::Ask), Party::Taker);
            assert_eq!(leg_receiver(LegSide::Short, QuoteSide::Ask), Party::Maker);
        }

        #[test]
        fn bid_confirmation_flips_receiver() {
            assert_eq!(leg_receiver(LegSide::Long, QuoteSide::Bid), Party::Maker);
            assert_eq!(leg_receiver(LegSide::Short, QuoteSide::Bid), Party::Taker);
        }

        #[test]
        fn quote_receiver_flips_on_bid_and_negative_price() {
            assert_eq!(quote_receiver(QuoteSide::Ask, Decimal::TEN), Party::Maker);
            assert_eq!(quote_receiver(QuoteSide::Bid, Decimal::TEN), Party::Taker);
            assert_eq!(
                quote_receiver(QuoteSide::Ask, Decimal::from(-10)),
                Party::Taker
            );
            assert_eq!(
                quote_receiver(QuoteSide::Bid, Decimal::from(-10)),
                Party::Maker
            );
        }

        #[test]
        fn inverting_confirmed_side_inverts_every_receiver() {
            let request = request_with(
                RequestSize::FixedBase {
                    legs_multiplier: Decimal::ONE,
                },
                vec![long_leg(5, 2), short_leg(3, 2)],
            );
            let bid = response_with(
                Some(Quote::new(Decimal::TEN, None)),
                Some(Quote::new(Decimal::TEN, None)),
                Some(Confirmation::new(QuoteSide::Bid, None)),
            );
            let ask = response_with(
                Some(Quote::new(Decimal::TEN, None)),
                Some(Quote::new(Decimal::TEN, None)),
                Some(Confirmation::new(QuoteSide::Ask, None)),
            );

            let bid_result = compute_settlement(&request, &bid, None).unwrap();
            let ask_result = compute_settlement(&request, &ask, None).unwrap();

            assert_eq!(bid_result.quote.receiver, ask_result.quote.receiver.opposite());
            for (b, a) in bid_result.legs.iter().zip(&ask_result.legs) {
                assert_eq!(b.receiver, a.receiver.opposite());
            }
        }
    }

    mod rounding {
        use super::*;

        #[test]
        fn maker_receives_rounded_up_taker_rounded_down() {
            // 1 * 1/3 at 4 decimals, once per receiver.
            let third = Decimal::ONE / Decimal::from(3);
            let request = request_with(
                RequestSize::FixedBase {
                    legs_multiplier: third,
                },
                vec![long_leg(1, 4), short_leg(1, 4)],
            );
            let response = response_with(
                None,
                Some(Quote::new(Decimal::TEN, None)),
                Some(Confirmation::new(QuoteSide::Ask, None)),
            );

            let result = compute_settlement(&request, &response, None).unwrap();
            // Long leg goes to the taker (down), short leg to the maker (up).
            assert_eq!(result.legs[0].receiver, Party::Taker);
            assert_eq!(result.legs[0].amount.to_string(), "0.3333");
            assert_eq!(result.legs[1].receiver, Party::Maker);
            assert_eq!(result.legs[1].amount.to_string(), "0.3334");
        }

        #[test]
        fn quote_amount_rounds_for_its_receiver() {
            let third = Decimal::ONE / Decimal::from(3);
            let request = request_with(
                RequestSize::FixedBase {
                    legs_multiplier: third,
                },
                vec![long_leg(1, 2)],
            );
            // Ask confirmation, positive price: quote goes to the maker.
            let response = response_with(
                None,
                Some(Quote::new(Decimal::ONE, None)),
                Some(Confirmation::new(QuoteSide::Ask, None)),
            );

            let result = compute_settlement(&request, &response, None).unwrap();
            assert_eq!(result.quote.receiver, Party::Maker);
            assert_eq!(result.quote.amount.to_string(), "0.34");
        }
    }

    mod multipliers {
        use super::*;

        #[test]
        fn fixed_quote_derives_multiplier_from_price() {
            let request = request_with(
                RequestSize::FixedQuote {
                    quote_amount: Decimal::from(100),
                },
                vec![long_leg(4, 2)],
            );
            let response = response_with(
                None,
                Some(Quote::new(Decimal::from(25), None)),
                Some(Confirmation::new(QuoteSide::Ask, None)),
            );

            let result = compute_settlement(&request, &response, None).unwrap();
            // multiplier = 100 / 25 = 4; leg = 4 * 4 = 16.
            assert_eq!(result.legs[0].amount.to_string(), "16.00");
        }

        #[test]
        fn fixed_quote_amount_is_verbatim() {
            // 100.555 would round at 2 decimals, but fixed-quote settles
            // the requested amount untouched.
            let request = request_with(
                RequestSize::FixedQuote {
                    quote_amount: Decimal::new(100_555, 3),
                },
                vec![long_leg(4, 2)],
            );
            let response = response_with(
                None,
                Some(Quote::new(Decimal::from(25), None)),
                Some(Confirmation::new(QuoteSide::Ask, None)),
            );

            let result = compute_settlement(&request, &response, None).unwrap();
            assert_eq!(result.quote.amount.to_string(), "100.555");
        }

        #[test]
        fn fixed_quote_with_zero_price_is_fatal() {
            let request = request_with(
                RequestSize::FixedQuote {
                    quote_amount: Decimal::from(100),
                },
                vec![long_leg(4, 2)],
            );
            let response = response_with(
                None,
                Some(Quote::new(Decimal::ZERO, None)),
                Some(Confirmation::new(QuoteSide::Ask, None)),
            );

            assert!(matches!(
                compute_settlement(&request, &response, None),
                Err(DomainError::Arithmetic(_))
            ));
        }

        #[test]
        fn negative_price_uses_absolute_value() {
            let request = request_with(
                RequestSize::FixedQuote {
                    quote_amount: Decimal::from(100),
                },
                vec![long_leg(4, 2)],
            );
            let response = response_with(
                None,
                Some(Quote::new(Decimal::from(-25), None)),
                Some(Confirmation::new(QuoteSide::Ask, None)),
            );

            let result = compute_settlement(&request, &response, None).unwrap();
            assert_eq!(result.legs[0].amount.to_string(), "16.00");
            // Negative price flips the quote receiver back to the taker.
            assert_eq!(result.quote.receiver, Party::Taker);
        }

        #[test]
        fn confirmation_override_wins() {
            let request = request_with(
                RequestSize::FixedBase {
                    legs_multiplier: Decimal::from(2),
                },
                vec![long_leg(5, 2)],
            );
            let response = response_with(
                None,
                Some(Quote::new(Decimal::TEN, None)),
                Some(Confirmation::new(QuoteSide::Ask, Some(Decimal::from(3)))),
            );

            let result = compute_settlement(&request, &response, None).unwrap();
            assert_eq!(result.legs[0].amount.to_string(), "15.00");
        }

        #[test]
        fn open_size_uses_quote_multiplier() {
            let request = request_with(RequestSize::Open, vec![long_leg(5, 2)]);
            let response = response_with(
                Some(Quote::new(Decimal::from(9), Some(Decimal::from(2)))),
                None,
                Some(Confirmation::new(QuoteSide::Bid, None)),
            );

            let result = compute_settlement(&request, &response, None).unwrap();
            // Bid confirmation: long leg flips to the maker, rounded up.
            assert_eq!(result.legs[0].receiver, Party::Maker);
            assert_eq!(result.legs[0].amount.to_string(), "10.00");
            assert_eq!(result.quote.receiver, Party::Taker);
            assert_eq!(result.quote.amount.to_string(), "18.00");
        }
    }
}
