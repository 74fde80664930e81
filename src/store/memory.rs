//! In-memory stores
//!
//! `DashMap` shards give atomic single-record reads and writes without a
//! global lock. Ids come from an `AtomicU64` sequence starting at 1.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use super::{AccountStore, OperationStore, StoreError};
use crate::account::Account;
use crate::core_types::{AccountId, OperationId};
use crate::operation::Operation;

/// In-memory account store
#[derive(Debug)]
pub struct InMemoryAccountStore {
    accounts: DashMap<AccountId, Account>,
    id_gen: AtomicU64,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            id_gen: AtomicU64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn next_id(&self) -> Result<AccountId, StoreError> {
        Ok(self.id_gen.fetch_add(1, Ordering::SeqCst))
    }

    async fn save(&self, account: &Account) -> Result<(), StoreError> {
        self.accounts.insert(account.id(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.get(&id).map(|entry| entry.value().clone()))
    }
}

/// In-memory operation store
#[derive(Debug)]
pub struct InMemoryOperationStore {
    operations: DashMap<OperationId, Operation>,
    id_gen: AtomicU64,
}

impl InMemoryOperationStore {
    pub fn new() -> Self {
        Self {
            operations: DashMap::new(),
            id_gen: AtomicU64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Default for InMemoryOperationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OperationStore for InMemoryOperationStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn next_id(&self) -> Result<OperationId, StoreError> {
        Ok(self.id_gen.fetch_add(1, Ordering::SeqCst))
    }

    async fn save(&self, operation: &Operation) -> Result<(), StoreError> {
        self.operations.insert(operation.id(), operation.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: OperationId) -> Result<Option<Operation>, StoreError> {
        Ok(self.operations.get(&id).map(|entry| entry.value().clone()))
    }
}
