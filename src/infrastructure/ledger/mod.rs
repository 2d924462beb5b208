//! # Ledger Integration
//!
//! Ports and test doubles for the external settlement ledger.

pub mod error;
pub mod in_memory;
pub mod traits;

pub use error::{LedgerError, LedgerResult};
pub use in_memory::{InMemoryLedger, InMemorySnapshots};
pub use traits::{LedgerClient, LedgerReceipt, SettlementBatch, SnapshotProvider, TxSignature};
