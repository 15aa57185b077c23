use std::sync::Arc;

use crate::account::Database;
use crate::config::AppConfig;
use crate::onramp::BankClient;

/// Shared gateway state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL balance/ledger store
    pub db: Arc<Database>,
    /// Loaded configuration (read-only)
    pub config: Arc<AppConfig>,
    /// External bank collaborator
    pub bank: Arc<dyn BankClient>,
}

impl AppState {
    pub fn new(db: Arc<Database>, config: Arc<AppConfig>, bank: Arc<dyn BankClient>) -> Self {
        Self { db, config, bank }
    }
}
