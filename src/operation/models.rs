//! Operation data model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core_types::{AccountId, OperationId};
use crate::error::WalletError;
use crate::money;

/// Immutable record of a committed transfer
///
/// No setters: once built, an operation is never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    id: OperationId,
    amount: Decimal,
    source_account: AccountId,
    destination_account: AccountId,
    created_at: DateTime<Utc>,
}

impl Operation {
    /// Build a new operation record.
    ///
    /// # Errors
    /// - `SelfTransfer` if source and destination are the same account
    /// - `InvalidAmount` if `amount <= 0`
    pub fn new(
        id: OperationId,
        amount: Decimal,
        source_account: AccountId,
        destination_account: AccountId,
    ) -> Result<Self, WalletError> {
        if source_account == destination_account {
            return Err(WalletError::SelfTransfer(source_account));
        }
        money::ensure_positive(amount)?;
        Ok(Self {
            id,
            amount,
            source_account,
            destination_account,
            created_at: Utc::now(),
        })
    }

    /// Rebuild an operation from a storage row.
    pub fn restore(
        id: OperationId,
        amount: Decimal,
        source_account: AccountId,
        destination_account: AccountId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            amount,
            source_account,
            destination_account,
            created_at,
        }
    }

    #[inline]
    pub fn id(&self) -> OperationId {
        self.id
    }

    #[inline]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    #[inline]
    pub fn source_account(&self) -> AccountId {
        self.source_account
    }

    #[inline]
    pub fn destination_account(&self) -> AccountId {
        self.destination_account
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
