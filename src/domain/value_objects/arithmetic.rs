//! # Checked Arithmetic
//!
//! Traits and utilities for safe settlement arithmetic.
//!
//! This module provides:
//! - [`ArithmeticError`] - Error type for arithmetic failures
//! - [`CheckedArithmetic`] - Trait for safe arithmetic operations
//! - [`Rounding`] - Enum for explicit rounding direction
//! - [`round_dp`] - Fixed-precision rounding with explicit direction
//!
//! Settlement amounts are rounded asymmetrically (up for the maker, down
//! for the taker) so the ledger can never be asked to transfer more than
//! was escrowed; [`round_dp`] is the single primitive both rules go
//! through.
//!
//! # Examples
//!
//! ```
//! use rfq_settle::domain::value_objects::arithmetic::{round_dp, Rounding};
//! use rust_decimal::Decimal;
//!
//! let third = Decimal::ONE / Decimal::from(3);
//! assert_eq!(round_dp(third, 4, Rounding::Up).to_string(), "0.3334");
//! assert_eq!(round_dp(third, 4, Rounding::Down).to_string(), "0.3333");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error type for arithmetic operations.
///
/// Represents failures that can occur during checked arithmetic,
/// including overflow, underflow, division by zero, and invalid values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// Arithmetic operation resulted in overflow.
    #[error("arithmetic overflow")]
    Overflow,

    /// Arithmetic operation resulted in underflow.
    #[error("arithmetic underflow")]
    Underflow,

    /// Division by zero attempted.
    #[error("division by zero")]
    DivisionByZero,

    /// Invalid value provided (e.g., negative when positive required).
    #[error("invalid value: {0}")]
    InvalidValue(&'static str),
}

/// Result type for arithmetic operations.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Rounding direction for fixed-precision operations.
///
/// `Up` rounds away from zero, `Down` rounds towards zero. For the strictly
/// positive amounts settlement works with these coincide with ceiling and
/// floor.
///
/// # Examples
///
/// ```
/// use rfq_settle::domain::value_objects::arithmetic::Rounding;
/// use rfq_settle::domain::value_objects::Party;
///
/// assert_eq!(Rounding::for_receiver(Party::Maker), Rounding::Up);
/// assert_eq!(Rounding::for_receiver(Party::Taker), Rounding::Down);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rounding {
    /// Round towards zero (truncate).
    Down,
    /// Round away from zero (ceiling for positive values).
    Up,
}

impl Rounding {
    /// Returns the rounding direction for a settlement receiver.
    ///
    /// Amounts owed to the maker round up, amounts owed to the taker round
    /// down. The asymmetry keeps every rounded amount within what the
    /// counterparty escrowed.
    #[inline]
    #[must_use]
    pub const fn for_receiver(receiver: super::Party) -> Self {
        match receiver {
            super::Party::Maker => Self::Up,
            super::Party::Taker => Self::Down,
        }
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Down => write!(f, "Down"),
            Self::Up => write!(f, "Up"),
        }
    }
}

/// Rounds a decimal to a fixed number of decimal places with an explicit
/// direction.
///
/// The result carries exactly `decimals` fractional digits, so a rounded
/// amount always displays at the asset's precision.
///
/// # Arguments
///
/// * `value` - The value to round
/// * `decimals` - Number of decimal places to keep
/// * `rounding` - The rounding direction to apply
///
/// # Examples
///
/// ```
/// use rfq_settle::domain::value_objects::arithmetic::{round_dp, Rounding};
/// use rust_decimal::Decimal;
///
/// let v = Decimal::new(12345, 4); // 1.2345
/// assert_eq!(round_dp(v, 2, Rounding::Up), Decimal::new(124, 2));
/// assert_eq!(round_dp(v, 2, Rounding::Down), Decimal::new(123, 2));
/// ```
#[inline]
#[must_use = "this returns the rounded value, without modifying the original"]
pub fn round_dp(value: Decimal, decimals: u32, rounding: Rounding) -> Decimal {
    let strategy = match rounding {
        Rounding::Down => RoundingStrategy::ToZero,
        Rounding::Up => RoundingStrategy::AwayFromZero,
    };
    let mut rounded = value.round_dp_with_strategy(decimals, strategy);
    rounded.rescale(decimals);
    rounded
}

/// Trait for checked arithmetic operations.
///
/// Provides safe arithmetic methods that return `Result` instead of
/// panicking on overflow, underflow, or division by zero.
pub trait CheckedArithmetic: Sized {
    /// Safely add two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely subtract two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Underflow` if the result would underflow.
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely multiply two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely divide two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::DivisionByZero` if the divisor is zero.
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self>;
}

impl CheckedArithmetic for Decimal {
    #[inline]
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_sub(rhs).ok_or(ArithmeticError::Underflow)
    }

    #[inline]
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_mul(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        self.checked_div(rhs).ok_or(ArithmeticError::Overflow)
    }
}

impl CheckedArithmetic for u32 {
    #[inline]
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_sub(rhs).ok_or(ArithmeticError::Underflow)
    }

    #[inline]
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_mul(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_div(rhs).ok_or(ArithmeticError::DivisionByZero)
    }
}
