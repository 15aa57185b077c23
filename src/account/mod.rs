//! Account management module
//!
//! PostgreSQL-based storage for wallet holders.

pub mod models;
pub mod repository;

// Re-export commonly used types
pub use models::{Account, AccountStatus};
pub use repository::AccountRepository;

// Re-export Database from top-level db module
pub use crate::db::Database;
