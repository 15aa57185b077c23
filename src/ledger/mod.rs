//! Ledger - append-only settlement audit log
//!
//! Records every balance change for complete auditability.

pub mod models;
pub mod store;

pub use models::{Direction, LedgerEntry, TxType};
pub use store::LedgerStore;
