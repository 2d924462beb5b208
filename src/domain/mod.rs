//! # Domain Layer
//!
//! Core negotiation model and the pure decision logic over it.
//!
//! Entities are read-only snapshots of on-ledger accounts; services derive
//! lifecycle states, valid actions and settlement amounts from them
//! without any I/O.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
