//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`Address`]: opaque ledger account identifier
//!
//! ## Domain Enums
//!
//! - [`Party`]: taker or maker
//! - [`QuoteSide`]: bid or ask
//! - [`LegSide`]: long or short
//! - [`OrderDirection`]: buy, sell or two-way
//! - [`RequestLifecycle`] / [`ResponseLifecycle`]: raw ledger flags
//!
//! ## Size & Ranges
//!
//! - [`RequestSize`]: open / fixed-base / fixed-quote
//! - [`LegRange`]: contiguous batch of leg indices
//!
//! ## Time & Arithmetic
//!
//! - [`Timestamp`]: UTC timestamp with inclusive deadline checks
//! - [`ArithmeticError`], [`CheckedArithmetic`], [`Rounding`], [`round_dp`]

pub mod address;
pub mod arithmetic;
pub mod enums;
pub mod leg_range;
pub mod lifecycle;
pub mod request_size;
pub mod timestamp;

pub use address::Address;
pub use arithmetic::{round_dp, ArithmeticError, ArithmeticResult, CheckedArithmetic, Rounding};
pub use enums::{LegSide, OrderDirection, ParseEnumError, Party, QuoteSide};
pub use leg_range::LegRange;
pub use lifecycle::{RequestLifecycle, ResponseLifecycle};
pub use request_size::RequestSize;
pub use timestamp::Timestamp;
