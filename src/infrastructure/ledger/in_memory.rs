//! # In-Memory Ledger
//!
//! In-memory implementations of the ledger ports for testing.
//!
//! [`InMemoryLedger`] replays a scripted sequence of submission outcomes
//! and records every batch it receives; [`InMemorySnapshots`] serves
//! request and response snapshots from maps. Both are thread-safe and
//! suitable for unit tests without a real ledger.

use crate::domain::entities::{NegotiationRequest, Response};
use crate::domain::value_objects::{Address, Timestamp};
use crate::infrastructure::ledger::error::{LedgerError, LedgerResult};
use crate::infrastructure::ledger::traits::{
    LedgerClient, LedgerReceipt, SettlementBatch, SnapshotProvider, TxSignature,
};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Scripted in-memory [`LedgerClient`].
///
/// Outcomes pushed with [`push_failure`](Self::push_failure) are consumed
/// in order; once the script is exhausted every submission succeeds with a
/// generated receipt.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    script: Arc<Mutex<VecDeque<LedgerError>>>,
    submitted: Arc<Mutex<Vec<SettlementBatch>>>,
}

impl InMemoryLedger {
    /// Creates a ledger that accepts every submission.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a failure for the next unscripted submission.
    pub async fn push_failure(&self, error: LedgerError) {
        self.script.lock().await.push_back(error);
    }

    /// Returns every batch submitted so far, in order.
    pub async fn submitted(&self) -> Vec<SettlementBatch> {
        self.submitted.lock().await.clone()
    }
}

#[async_trait]
impl LedgerClient for InMemoryLedger {
    async fn submit(&self, batch: &SettlementBatch) -> LedgerResult<LedgerReceipt> {
        let mut submitted = self.submitted.lock().await;
        submitted.push(batch.clone());
        let sequence = submitted.len();
        drop(submitted);

        if let Some(error) = self.script.lock().await.pop_front() {
            return Err(error);
        }
        Ok(LedgerReceipt {
            signature: TxSignature::new(format!("sig-{sequence}")),
            slot: sequence as u64,
            confirmed_at: Timestamp::now(),
        })
    }
}

/// Map-backed [`SnapshotProvider`].
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshots {
    requests: Arc<Mutex<HashMap<Address, NegotiationRequest>>>,
    responses: Arc<Mutex<HashMap<Address, Response>>>,
}

impl InMemorySnapshots {
    /// Creates an empty snapshot store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a request snapshot.
    pub async fn insert_request(&self, request: NegotiationRequest) {
        self.requests
            .lock()
            .await
            .insert(request.address().clone(), request);
    }

    /// Stores a response snapshot.
    pub async fn insert_response(&self, response: Response) {
        self.responses
            .lock()
            .await
            .insert(response.address().clone(), response);
    }
}

#[async_trait]
impl SnapshotProvider for InMemorySnapshots {
    async fn request(&self, address: &Address) -> LedgerResult<Option<NegotiationRequest>> {
        Ok(self.requests.lock().await.get(address).cloned())
    }

    async fn response(&self, address: &Address) -> LedgerResult<Option<Response>> {
        Ok(self.responses.lock().await.get(address).cloned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::negotiation_request::Leg;
    use crate::domain::value_objects::{LegRange, LegSide, OrderDirection, RequestSize};
    use rust_decimal::Decimal;

    fn batch(start: u32, count: u32) -> SettlementBatch {
        SettlementBatch::new(Address::new("resp-1"), LegRange::new(start, count))
    }

    #[tokio::test]
    async fn records_batches_and_succeeds_by_default() {
        let ledger = InMemoryLedger::new();
        let receipt = ledger.submit(&batch(0, 3)).await.unwrap();
        assert_eq!(receipt.signature.as_str(), "sig-1");

        let receipt = ledger.submit(&batch(3, 2)).await.unwrap();
        assert_eq!(receipt.signature.as_str(), "sig-2");

        let submitted = ledger.submitted().await;
        assert_eq!(submitted, vec![batch(0, 3), batch(3, 2)]);
    }

    #[tokio::test]
    async fn scripted_failures_are_consumed_in_order() {
        let ledger = InMemoryLedger::new();
        ledger
            .push_failure(LedgerError::rejected("stale counter"))
            .await;

        assert!(ledger.submit(&batch(0, 1)).await.is_err());
        assert!(ledger.submit(&batch(1, 1)).await.is_ok());
        // Failed submissions are still recorded.
        assert_eq!(ledger.submitted().await.len(), 2);
    }

    #[tokio::test]
    async fn snapshots_round_trip() {
        let store = InMemorySnapshots::new();
        let request = NegotiationRequest::builder(
            Address::new("rfq-1"),
            Address::new("taker-1"),
            OrderDirection::Buy,
            RequestSize::Open,
            Timestamp::from_secs(1_000).unwrap(),
        )
        .with_leg(Leg::new(LegSide::Long, Decimal::ONE, 6))
        .build()
        .unwrap();

        store.insert_request(request.clone()).await;
        let fetched = store.request(&Address::new("rfq-1")).await.unwrap();
        assert_eq!(fetched, Some(request));
        assert_eq!(store.request(&Address::new("rfq-2")).await.unwrap(), None);
        assert_eq!(store.response(&Address::new("resp-1")).await.unwrap(), None);
    }
}
