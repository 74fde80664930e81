//! Storage contracts
//!
//! Account and operation persistence is an injected key-by-identifier store.
//! The core only relies on atomic single-record `save` / `find_by_id`; it
//! never assumes multi-record transactions and does its own rollback.
//!
//! Backends:
//! - [`memory`]: `DashMap`-based, the default
//! - [`postgres`]: `sqlx` PostgreSQL tables
//! - `mock` (tests only): in-memory with fault injection

pub mod memory;
pub mod postgres;

#[cfg(test)]
pub mod mock;

pub use memory::{InMemoryAccountStore, InMemoryOperationStore};
pub use postgres::{PgAccountStore, PgOperationStore};

#[cfg(test)]
pub use mock::{MockAccountStore, MockOperationStore};

use async_trait::async_trait;
use thiserror::Error;

use crate::account::Account;
use crate::core_types::{AccountId, OperationId};
use crate::operation::Operation;

/// Storage errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt record {id}: {reason}")]
    Corrupt { id: u64, reason: String },
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

/// Account persistence, keyed by [`AccountId`]
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// Reserve a fresh, never reused account id
    async fn next_id(&self) -> Result<AccountId, StoreError>;

    /// Insert or replace the record with `account.id()`
    async fn save(&self, account: &Account) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError>;
}

/// Operation persistence, keyed by [`OperationId`]
#[async_trait]
pub trait OperationStore: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// Reserve a fresh, never reused operation id
    async fn next_id(&self) -> Result<OperationId, StoreError>;

    async fn save(&self, operation: &Operation) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: OperationId) -> Result<Option<Operation>, StoreError>;
}
