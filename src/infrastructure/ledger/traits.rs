//! # Ledger Ports
//!
//! Trait definitions for the external ledger.
//!
//! The decision layer never talks to the network itself; it goes through
//! [`LedgerClient`] for batch submission and [`SnapshotProvider`] for
//! read-only account state. Transaction assembly and signing live behind
//! the `LedgerClient` implementation.

use crate::domain::entities::{NegotiationRequest, Response};
use crate::domain::value_objects::{Address, LegRange, Timestamp};
use crate::infrastructure::ledger::error::LedgerResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction signature returned by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxSignature(pub String);

impl TxSignature {
    /// Creates a new signature.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the signature as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One batch of settlement-preparation operations for a single response.
///
/// The range must directly follow the legs the ledger has already
/// accepted; the on-ledger prepared-leg counter is the implicit offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementBatch {
    /// The response being prepared.
    pub response: Address,
    /// The contiguous legs covered by this batch.
    pub range: LegRange,
}

impl SettlementBatch {
    /// Creates a new batch descriptor.
    #[must_use]
    pub const fn new(response: Address, range: LegRange) -> Self {
        Self { response, range }
    }
}

impl fmt::Display for SettlementBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} legs {}", self.response, self.range)
    }
}

/// Confirmation that the ledger accepted a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerReceipt {
    /// Signature of the accepted transaction.
    pub signature: TxSignature,
    /// Ledger slot the transaction landed in.
    pub slot: u64,
    /// When the confirmation was observed.
    pub confirmed_at: Timestamp,
}

/// Port for submitting settlement batches.
#[async_trait]
pub trait LedgerClient: Send + Sync + fmt::Debug {
    /// Submits one batch and waits for the ledger's verdict.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::infrastructure::ledger::error::LedgerError`] on
    /// rejection, transport failure or timeout.
    async fn submit(&self, batch: &SettlementBatch) -> LedgerResult<LedgerReceipt>;
}

/// Port for reading negotiation account snapshots.
///
/// Read-only: nothing in this crate ever writes entity state back.
#[async_trait]
pub trait SnapshotProvider: Send + Sync + fmt::Debug {
    /// Fetches a request snapshot by address.
    ///
    /// # Errors
    ///
    /// Returns an error if the account exists but cannot be decoded, or
    /// the transport fails.
    async fn request(&self, address: &Address) -> LedgerResult<Option<NegotiationRequest>>;

    /// Fetches a response snapshot by address.
    ///
    /// # Errors
    ///
    /// Returns an error if the account exists but cannot be decoded, or
    /// the transport fails.
    async fn response(&self, address: &Address) -> LedgerResult<Option<Response>>;
}
