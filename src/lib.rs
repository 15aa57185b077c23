//! PayWallet - custodial wallet core
//!
//! P2P transfers, bank on-ramp with idempotent settlement, and an
//! append-only ledger over PostgreSQL.
//!
//! # Modules
//!
//! - [`balance`] - Enforced balance type (available/locked)
//! - [`money`] - Minor-unit amount parsing and formatting
//! - [`engine`] - Row-locked balance mutations inside one transaction
//! - [`ledger`] - Append-only movement history
//! - [`account`] - Account records and lookup
//! - [`p2p`] - Wallet-to-wallet transfer protocol
//! - [`onramp`] - Bank deposit sessions and settlement callbacks
//! - [`risk`] - Pre-transfer decision gate
//! - [`gateway`] - HTTP API

pub mod account;
pub mod balance;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod ledger;
pub mod logging;
pub mod money;
pub mod onramp;
pub mod p2p;
pub mod risk;

// Convenient re-exports at crate root
pub use balance::Balance;
pub use db::Database;
pub use engine::TransferEngine;
pub use error::WalletError;
pub use ledger::{Direction, LedgerEntry, LedgerStore, TxType};
pub use onramp::{BankClient, OnRampService, OnRampStatus};
pub use p2p::{P2pService, P2pTransfer, TransferId, TransferStatus};
pub use risk::{Decision, RiskGate};
