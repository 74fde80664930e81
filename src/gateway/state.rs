use std::sync::Arc;

use crate::account::AccountManager;
use crate::db::Database;
use crate::transfer::TransferEngine;

/// Gateway application state (shared across handlers)
#[derive(Clone)]
pub struct AppState {
    /// Account creation and reads
    pub accounts: Arc<AccountManager>,
    /// Transfers and operation lookups
    pub engine: Arc<TransferEngine>,
    /// PostgreSQL pool, pinged by the health check when the postgres backend is in use
    pub pg_db: Option<Arc<Database>>,
}

impl AppState {
    pub fn new(engine: Arc<TransferEngine>) -> Self {
        Self {
            accounts: engine.accounts().clone(),
            engine,
            pg_db: None,
        }
    }

    pub fn with_database(mut self, db: Arc<Database>) -> Self {
        self.pg_db = Some(db);
        self
    }
}
