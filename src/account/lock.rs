//! Per-account mutation locks
//!
//! Read-modify-write of one account's balance is serialized by an exclusive
//! lock keyed on the account id; there is no global lock. A caller touching
//! two accounts takes both locks in ascending id order, so two transfers
//! moving funds in opposite directions between the same pair cannot deadlock.
//!
//! A table entry lives only while some caller holds or waits on it, so probing
//! ids that do not exist leaves nothing behind.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::core_types::AccountId;

type LockTable = DashMap<AccountId, Arc<Mutex<()>>>;

/// Lock table: one async mutex per account id, created on demand
#[derive(Debug, Default)]
pub struct AccountLocks {
    locks: Arc<LockTable>,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, id: AccountId) -> Arc<Mutex<()>> {
        // Clone out of the shard before awaiting on the mutex
        self.locks.entry(id).or_default().value().clone()
    }

    /// Acquire mutation rights on a single account
    pub async fn lock(&self, id: AccountId) -> AccountGuard {
        let guard = self.slot(id).lock_owned().await;
        AccountGuard {
            table: self.locks.clone(),
            held: vec![(id, guard)],
        }
    }

    /// Acquire mutation rights on two accounts, lower id first.
    ///
    /// Locking the same id twice collapses to a single lock.
    pub async fn lock_pair(&self, a: AccountId, b: AccountId) -> AccountGuard {
        if a == b {
            return self.lock(a).await;
        }
        let (first, second) = if a < b { (a, b) } else { (b, a) };

        let first_guard = self.slot(first).lock_owned().await;
        let second_guard = self.slot(second).lock_owned().await;
        AccountGuard {
            table: self.locks.clone(),
            held: vec![(first, first_guard), (second, second_guard)],
        }
    }

    /// Entries currently held or awaited
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.locks.len()
    }
}

/// Proof of held mutation rights; released on drop
#[derive(Debug)]
pub struct AccountGuard {
    table: Arc<LockTable>,
    held: Vec<(AccountId, OwnedMutexGuard<()>)>,
}

impl AccountGuard {
    /// Whether this guard holds the lock for `id`
    pub fn covers(&self, id: AccountId) -> bool {
        self.held.iter().any(|(held, _)| *held == id)
    }

    /// Locked ids in acquisition order
    pub fn ids(&self) -> Vec<AccountId> {
        self.held.iter().map(|(id, _)| *id).collect()
    }
}

impl Drop for AccountGuard {
    fn drop(&mut self) {
        for (id, guard) in self.held.drain(..) {
            drop(guard);
            // Only the table's own reference left: no holder, no waiter.
            // `slot` clones under the same shard lock, so this cannot race it.
            self.table
                .remove_if(&id, |_, mutex| Arc::strong_count(mutex) == 1);
        }
    }
}
