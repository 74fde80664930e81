//! Account data model
//!
//! # Invariants (ENFORCED by private fields):
//! - `balance >= 0` at all times
//! - `id` never changes after the account is opened
//! - `operations` is a back-reference index; the Operation Store owns the records

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::validation::AccountName;
use crate::core_types::{AccountId, OperationId};
use crate::error::WalletError;
use crate::money;

/// Wallet account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    name: String,
    balance: Decimal,
    operations: BTreeSet<OperationId>,
}

impl Account {
    /// Open a new account with a validated name and a non-negative balance.
    pub fn open(id: AccountId, name: AccountName, balance: Decimal) -> Result<Self, WalletError> {
        if money::ensure_non_negative(balance).is_err() {
            return Err(WalletError::InvalidAccount(format!(
                "initial balance cannot be negative: {}",
                balance
            )));
        }
        Ok(Self {
            id,
            name: name.into_string(),
            balance,
            operations: BTreeSet::new(),
        })
    }

    /// Rebuild an account from a storage row.
    ///
    /// Storage is trusted to only contain accounts written through [`Account::open`]
    /// and the mutators below.
    pub fn restore(
        id: AccountId,
        name: String,
        balance: Decimal,
        operations: impl IntoIterator<Item = OperationId>,
    ) -> Self {
        Self {
            id,
            name,
            balance,
            operations: operations.into_iter().collect(),
        }
    }

    // ============================================================
    // READ-ONLY GETTERS
    // ============================================================

    #[inline]
    pub fn id(&self) -> AccountId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Operation ids this account participated in, ascending
    pub fn operations(&self) -> impl Iterator<Item = OperationId> + '_ {
        self.operations.iter().copied()
    }

    pub fn has_operation(&self, operation_id: OperationId) -> bool {
        self.operations.contains(&operation_id)
    }

    // ============================================================
    // VALIDATED MUTATIONS
    // ============================================================

    /// Decrease balance by `amount`.
    ///
    /// # Errors
    /// - `InvalidAmount` if `amount <= 0`
    /// - `InsufficientFunds` if `amount > balance` (balance untouched)
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), WalletError> {
        money::ensure_positive(amount)?;
        self.balance = money::checked_debit(self.balance, amount).ok_or(
            WalletError::InsufficientFunds {
                account: self.id,
                balance: self.balance,
                requested: amount,
            },
        )?;
        Ok(())
    }

    /// Increase balance by `amount`.
    ///
    /// # Errors
    /// - `InvalidAmount` if `amount <= 0` or the sum overflows
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), WalletError> {
        money::ensure_positive(amount)?;
        self.balance = money::checked_credit(self.balance, amount)?;
        Ok(())
    }

    /// Attach an operation back-reference. Returns false if already present.
    pub fn attach_operation(&mut self, operation_id: OperationId) -> bool {
        self.operations.insert(operation_id)
    }
}
