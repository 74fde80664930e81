//! Transfer Engine
//!
//! Moves funds between two accounts as one all-or-nothing unit.
//! Both account locks are held from validation until the transfer either
//! commits or is compensated, so the intermediate states are never
//! visible to readers going through [`AccountManager::find`].
//!
//! Everything from taking the locks to the final commit or compensation runs
//! on its own task. Dropping the caller's future (client disconnect, request
//! timeout) does not stop the writes halfway; the transfer still finishes or
//! rolls back, only the result goes unobserved.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{Instrument, debug, error, info, warn};

use super::state::TransferState;
use crate::account::{Account, AccountGuard, AccountManager};
use crate::core_types::{AccountId, OperationId};
use crate::error::WalletError;
use crate::money;
use crate::operation::Operation;
use crate::store::OperationStore;

/// Tracks how far a transfer got, and what to undo if it fails
struct TransferProgress {
    source: AccountId,
    destination: AccountId,
    state: TransferState,
}

impl TransferProgress {
    fn new(source: AccountId, destination: AccountId) -> Self {
        Self {
            source,
            destination,
            state: TransferState::Validated,
        }
    }

    fn advance(&mut self, to: TransferState) {
        debug_assert!(
            self.state.can_transition_to(to),
            "illegal transfer transition {} -> {}",
            self.state,
            to
        );
        debug!(
            source = self.source,
            destination = self.destination,
            "[{} -> {}]",
            self.state,
            to
        );
        self.state = to;
    }
}

#[derive(Clone)]
pub struct TransferEngine {
    accounts: Arc<AccountManager>,
    operations: Arc<dyn OperationStore>,
}

impl TransferEngine {
    pub fn new(accounts: Arc<AccountManager>, operations: Arc<dyn OperationStore>) -> Self {
        Self {
            accounts,
            operations,
        }
    }

    pub fn accounts(&self) -> &Arc<AccountManager> {
        &self.accounts
    }

    /// Backend name of the operation store
    pub fn store_name(&self) -> &'static str {
        self.operations.name()
    }

    /// Transfer `amount` from `source` to `destination`.
    ///
    /// On success both balances, both accounts' operation references and the
    /// new operation record are persisted. On failure no externally visible
    /// change remains, except a skipped operation id.
    ///
    /// # Errors
    /// - `SelfTransfer` if `source == destination`
    /// - `InvalidAmount` if `amount <= 0`
    /// - `AccountNotFound` for whichever account is missing (source checked first)
    /// - `InsufficientFunds` if the source balance is below `amount`
    /// - `StorageFailure` if any write fails; prior writes are rolled back
    pub async fn transfer(
        &self,
        source: AccountId,
        destination: AccountId,
        amount: Decimal,
    ) -> Result<Operation, WalletError> {
        if source == destination {
            warn!(account_id = source, "Transfer rejected: same source and destination");
            return Err(WalletError::SelfTransfer(source));
        }
        if let Err(e) = money::ensure_positive(amount) {
            warn!(source, destination, amount = %amount, "Transfer rejected: {}", e);
            return Err(e.into());
        }

        let engine = self.clone();
        let task = tokio::spawn(
            async move { engine.execute(source, destination, amount).await }.in_current_span(),
        );
        match task.await {
            Ok(result) => result,
            Err(e) => {
                error!(source, destination, amount = %amount, "Transfer task aborted: {}", e);
                Err(WalletError::StorageFailure(format!("transfer task aborted: {}", e)))
            }
        }
    }

    /// Locked section of a transfer: check, apply, compensate on failure
    async fn execute(
        &self,
        source: AccountId,
        destination: AccountId,
        amount: Decimal,
    ) -> Result<Operation, WalletError> {
        let guard = self.accounts.lock_pair(source, destination).await;

        let source_snapshot = self.accounts.get(source).await?;
        let destination_snapshot = self.accounts.get(destination).await?;
        if source_snapshot.balance() < amount {
            warn!(
                source,
                destination,
                balance = %source_snapshot.balance(),
                amount = %amount,
                "Transfer rejected: insufficient funds"
            );
            return Err(WalletError::InsufficientFunds {
                account: source,
                balance: source_snapshot.balance(),
                requested: amount,
            });
        }

        let mut progress = TransferProgress::new(source, destination);
        match self.apply(&guard, &mut progress, amount).await {
            Ok(operation) => {
                info!(
                    operation_id = operation.id(),
                    source,
                    destination,
                    amount = %amount,
                    "Transfer committed"
                );
                Ok(operation)
            }
            Err(e) => {
                warn!(
                    source,
                    destination,
                    amount = %amount,
                    state = %progress.state,
                    "Transfer failed: {}", e
                );
                self.rollback(&guard, &mut progress, &source_snapshot, &destination_snapshot, e)
                    .await
            }
        }
    }

    /// Forward path. Each step persists before `progress` advances, so on
    /// error `progress.state` names the last write that landed.
    async fn apply(
        &self,
        guard: &AccountGuard,
        progress: &mut TransferProgress,
        amount: Decimal,
    ) -> Result<Operation, WalletError> {
        let (source, destination) = (progress.source, progress.destination);

        self.accounts.debit_locked(guard, source, amount).await?;
        progress.advance(TransferState::Debited);

        self.accounts.credit_locked(guard, destination, amount).await?;
        progress.advance(TransferState::Credited);

        let operation_id: OperationId = self.operations.next_id().await?;
        let operation = Operation::new(operation_id, amount, source, destination)?;

        self.accounts
            .record_operation_locked(guard, source, operation_id)
            .await?;
        self.accounts
            .record_operation_locked(guard, destination, operation_id)
            .await?;
        progress.advance(TransferState::Recorded);

        // Commit point: the operation record only exists for completed transfers
        self.operations.save(&operation).await?;
        progress.advance(TransferState::Committed);

        Ok(operation)
    }

    /// Undo every account write, newest first, then return `cause`.
    ///
    /// A failed restore leaves the pair inconsistent; it is logged and folded
    /// into the returned `StorageFailure`.
    async fn rollback(
        &self,
        guard: &AccountGuard,
        progress: &mut TransferProgress,
        source_snapshot: &Account,
        destination_snapshot: &Account,
        cause: WalletError,
    ) -> Result<Operation, WalletError> {
        let mut failures = Vec::new();

        // Recorded failures can leave a reference on the source only, which
        // the snapshot also clears.
        if progress.state.destination_written()
            && let Err(e) = self.accounts.restore_locked(guard, destination_snapshot).await
        {
            failures.push((destination_snapshot.id(), e));
        }
        if progress.state.source_written()
            && let Err(e) = self.accounts.restore_locked(guard, source_snapshot).await
        {
            failures.push((source_snapshot.id(), e));
        }

        if failures.is_empty() {
            if progress.state != TransferState::Validated {
                info!(
                    source = progress.source,
                    destination = progress.destination,
                    from_state = %progress.state,
                    "Transfer rolled back"
                );
            }
            progress.advance(TransferState::RolledBack);
            return Err(cause);
        }

        for (account_id, e) in &failures {
            error!(
                account_id,
                source = progress.source,
                destination = progress.destination,
                state = %progress.state,
                "CRITICAL: rollback restore failed: {} - manual intervention required", e
            );
        }
        let detail = failures
            .iter()
            .map(|(id, e)| format!("account {}: {}", id, e))
            .collect::<Vec<_>>()
            .join("; ");
        Err(WalletError::StorageFailure(format!(
            "{}; rollback incomplete ({})",
            cause, detail
        )))
    }

    /// Look up a committed operation
    pub async fn find_operation(&self, id: OperationId) -> Result<Option<Operation>, WalletError> {
        Ok(self.operations.find_by_id(id).await?)
    }

    /// Look up an account under its lock
    pub async fn find_account(&self, id: AccountId) -> Result<Option<Account>, WalletError> {
        self.accounts.find(id).await
    }
}
