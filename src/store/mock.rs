//! Mock stores for testing
//!
//! In-memory stores with switchable failures, used to drive the transfer
//! engine through its rollback paths.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::{AccountStore, InMemoryAccountStore, InMemoryOperationStore, OperationStore, StoreError};
use crate::account::Account;
use crate::core_types::{AccountId, OperationId};
use crate::operation::Operation;

pub struct MockAccountStore {
    inner: InMemoryAccountStore,
    save_count: AtomicUsize,
    save_attempts: AtomicUsize,
    /// Saves of these account ids fail
    fail_save_ids: Mutex<HashSet<AccountId>>,
    /// Fail every save once this many saves have succeeded
    fail_after_saves: Mutex<Option<usize>>,
    /// Fail exactly the save attempt with this index
    fail_attempt: Mutex<Option<usize>>,
    fail_find: AtomicBool,
    /// Every save sleeps this long first
    save_delay: Mutex<Option<Duration>>,
}

impl MockAccountStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryAccountStore::new(),
            save_count: AtomicUsize::new(0),
            save_attempts: AtomicUsize::new(0),
            fail_save_ids: Mutex::new(HashSet::new()),
            fail_after_saves: Mutex::new(None),
            fail_attempt: Mutex::new(None),
            fail_find: AtomicBool::new(false),
            save_delay: Mutex::new(None),
        }
    }

    pub fn set_save_delay(&self, delay: Option<Duration>) {
        *self.save_delay.lock().unwrap() = delay;
    }

    pub fn set_fail_save_for(&self, id: AccountId, fail: bool) {
        let mut ids = self.fail_save_ids.lock().unwrap();
        if fail {
            ids.insert(id);
        } else {
            ids.remove(&id);
        }
    }

    /// Let `n` more saves through, then fail all further saves
    pub fn fail_after_saves(&self, n: usize) {
        *self.fail_after_saves.lock().unwrap() = Some(self.save_count() + n);
    }

    /// Let `n` more save attempts through, fail the next one, then recover
    pub fn fail_once_after(&self, n: usize) {
        *self.fail_attempt.lock().unwrap() = Some(self.save_attempts.load(Ordering::SeqCst) + n);
    }

    pub fn heal(&self) {
        self.fail_save_ids.lock().unwrap().clear();
        *self.fail_after_saves.lock().unwrap() = None;
        *self.fail_attempt.lock().unwrap() = None;
        self.fail_find.store(false, Ordering::SeqCst);
    }

    pub fn set_fail_find(&self, fail: bool) {
        self.fail_find.store(fail, Ordering::SeqCst);
    }

    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountStore for MockAccountStore {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn next_id(&self) -> Result<AccountId, StoreError> {
        self.inner.next_id().await
    }

    async fn save(&self, account: &Account) -> Result<(), StoreError> {
        let delay = *self.save_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let attempt = self.save_attempts.fetch_add(1, Ordering::SeqCst);
        {
            let mut target = self.fail_attempt.lock().unwrap();
            if *target == Some(attempt) {
                *target = None;
                return Err(StoreError::Unavailable(format!(
                    "mock save failure at attempt {}",
                    attempt
                )));
            }
        }
        if self.fail_save_ids.lock().unwrap().contains(&account.id()) {
            return Err(StoreError::Unavailable(format!(
                "mock save failure for account {}",
                account.id()
            )));
        }
        let limit = *self.fail_after_saves.lock().unwrap();
        if let Some(limit) = limit
            && self.save_count() >= limit
        {
            return Err(StoreError::Unavailable("mock save failure".into()));
        }
        self.inner.save(account).await?;
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        if self.fail_find.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("mock find failure".into()));
        }
        self.inner.find_by_id(id).await
    }
}

pub struct MockOperationStore {
    inner: InMemoryOperationStore,
    save_count: AtomicUsize,
    fail_save: AtomicBool,
    fail_next_id: AtomicBool,
}

impl MockOperationStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryOperationStore::new(),
            save_count: AtomicUsize::new(0),
            fail_save: AtomicBool::new(false),
            fail_next_id: AtomicBool::new(false),
        }
    }

    pub fn set_fail_save(&self, fail: bool) {
        self.fail_save.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_next_id(&self, fail: bool) {
        self.fail_next_id.store(fail, Ordering::SeqCst);
    }

    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

#[async_trait]
impl OperationStore for MockOperationStore {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn next_id(&self) -> Result<OperationId, StoreError> {
        if self.fail_next_id.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("mock sequence failure".into()));
        }
        self.inner.next_id().await
    }

    async fn save(&self, operation: &Operation) -> Result<(), StoreError> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("mock operation save failure".into()));
        }
        self.inner.save(operation).await?;
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn find_by_id(&self, id: OperationId) -> Result<Option<Operation>, StoreError> {
        self.inner.find_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountName;
    use rust_decimal_macros::dec;

    fn account(id: AccountId) -> Account {
        Account::open(id, AccountName::new("Mock").unwrap(), dec!(1)).unwrap()
    }

    #[tokio::test]
    async fn test_mock_account_store_fail_for_id() {
        let store = MockAccountStore::new();
        store.set_fail_save_for(2, true);

        assert!(store.save(&account(1)).await.is_ok());
        assert!(store.save(&account(2)).await.is_err());
        assert_eq!(store.save_count(), 1);

        store.set_fail_save_for(2, false);
        assert!(store.save(&account(2)).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_account_store_fail_after() {
        let store = MockAccountStore::new();
        store.fail_after_saves(1);

        assert!(store.save(&account(1)).await.is_ok());
        assert!(store.save(&account(1)).await.is_err());

        store.heal();
        assert!(store.save(&account(1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_account_store_fail_once() {
        let store = MockAccountStore::new();
        store.fail_once_after(1);

        assert!(store.save(&account(1)).await.is_ok());
        assert!(store.save(&account(1)).await.is_err());
        assert!(store.save(&account(1)).await.is_ok());
        assert_eq!(store.save_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_operation_store_failure() {
        let store = MockOperationStore::new();
        store.set_fail_save(true);
        let op = Operation::new(1, dec!(1), 1, 2).unwrap();
        assert!(store.save(&op).await.is_err());
        assert_eq!(store.len(), 0);
    }
}
