//! Account Manager
//!
//! Owns every read and balance-affecting write to accounts. Mutations run
//! under the account's lock from [`AccountLocks`]; the `*_locked` variants are
//! for callers (the transfer engine) that already hold the rights through an
//! [`AccountGuard`].

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};

use super::lock::{AccountGuard, AccountLocks};
use super::models::Account;
use super::validation::{AccountName, validate_initial_balance};
use crate::core_types::{AccountId, OperationId};
use crate::error::WalletError;
use crate::money;
use crate::store::AccountStore;

pub struct AccountManager {
    store: Arc<dyn AccountStore>,
    locks: AccountLocks,
}

impl AccountManager {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self {
            store,
            locks: AccountLocks::new(),
        }
    }

    /// Backend name of the underlying store
    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }

    // ============================================================
    // READS
    // ============================================================

    /// Load an account or fail with `AccountNotFound`.
    ///
    /// Does not take the account lock.
    pub async fn get(&self, id: AccountId) -> Result<Account, WalletError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(WalletError::AccountNotFound(id))
    }

    /// Read path for the adapter: `None` instead of an error when missing.
    ///
    /// Takes the account lock for the duration of the read so a reader never
    /// sees an account in the middle of a transfer.
    pub async fn find(&self, id: AccountId) -> Result<Option<Account>, WalletError> {
        let _guard = self.locks.lock(id).await;
        Ok(self.store.find_by_id(id).await?)
    }

    // ============================================================
    // CREATE
    // ============================================================

    /// Open a new account.
    ///
    /// # Errors
    /// - `InvalidAccount` if `name` is empty or `initial_balance < 0`
    /// - `StorageFailure` if the id cannot be reserved or the record not written
    pub async fn create(
        &self,
        name: &str,
        initial_balance: Decimal,
    ) -> Result<Account, WalletError> {
        let name = AccountName::new(name).map_err(|e| WalletError::InvalidAccount(e.to_string()))?;
        let balance = validate_initial_balance(initial_balance)
            .map_err(|e| WalletError::InvalidAccount(e.to_string()))?;

        let id = self.store.next_id().await?;
        let account = Account::open(id, name, balance)?;
        self.store.save(&account).await?;

        info!(account_id = id, name = %account.name(), balance = %balance, "Account created");
        Ok(account)
    }

    // ============================================================
    // MUTATIONS (take the account lock)
    // ============================================================

    /// Decrease the balance of `id` by `amount`.
    ///
    /// # Errors
    /// - `InvalidAmount` if `amount <= 0`
    /// - `AccountNotFound` if `id` does not exist
    /// - `InsufficientFunds` if `amount > balance`
    pub async fn debit(&self, id: AccountId, amount: Decimal) -> Result<Account, WalletError> {
        let guard = self.locks.lock(id).await;
        self.debit_locked(&guard, id, amount).await
    }

    /// Increase the balance of `id` by `amount`.
    pub async fn credit(&self, id: AccountId, amount: Decimal) -> Result<Account, WalletError> {
        let guard = self.locks.lock(id).await;
        self.credit_locked(&guard, id, amount).await
    }

    /// Append `operation_id` to the account's operation references.
    pub async fn record_operation(
        &self,
        id: AccountId,
        operation_id: OperationId,
    ) -> Result<Account, WalletError> {
        let guard = self.locks.lock(id).await;
        self.record_operation_locked(&guard, id, operation_id).await
    }

    // ============================================================
    // MUTATIONS UNDER A HELD GUARD
    // ============================================================

    /// Acquire mutation rights on both accounts in ascending id order
    pub async fn lock_pair(&self, a: AccountId, b: AccountId) -> AccountGuard {
        self.locks.lock_pair(a, b).await
    }

    pub(crate) async fn debit_locked(
        &self,
        guard: &AccountGuard,
        id: AccountId,
        amount: Decimal,
    ) -> Result<Account, WalletError> {
        debug_assert!(guard.covers(id), "debit of account {} without its lock", id);
        money::ensure_positive(amount)?;

        let mut account = self.get(id).await?;
        account.withdraw(amount)?;
        self.store.save(&account).await?;

        debug!(account_id = id, amount = %amount, balance = %account.balance(), "Debited");
        Ok(account)
    }

    pub(crate) async fn credit_locked(
        &self,
        guard: &AccountGuard,
        id: AccountId,
        amount: Decimal,
    ) -> Result<Account, WalletError> {
        debug_assert!(guard.covers(id), "credit of account {} without its lock", id);
        money::ensure_positive(amount)?;

        let mut account = self.get(id).await?;
        account.deposit(amount)?;
        self.store.save(&account).await?;

        debug!(account_id = id, amount = %amount, balance = %account.balance(), "Credited");
        Ok(account)
    }

    pub(crate) async fn record_operation_locked(
        &self,
        guard: &AccountGuard,
        id: AccountId,
        operation_id: OperationId,
    ) -> Result<Account, WalletError> {
        debug_assert!(guard.covers(id), "record on account {} without its lock", id);

        let mut account = self.get(id).await?;
        if account.attach_operation(operation_id) {
            self.store.save(&account).await?;
        }
        Ok(account)
    }

    /// Write back a snapshot taken earlier under the same guard (rollback)
    pub(crate) async fn restore_locked(
        &self,
        guard: &AccountGuard,
        snapshot: &Account,
    ) -> Result<(), WalletError> {
        debug_assert!(
            guard.covers(snapshot.id()),
            "restore of account {} without its lock",
            snapshot.id()
        );
        self.store.save(snapshot).await?;
        Ok(())
    }
}
