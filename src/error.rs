//! Wallet Error Types
//!
//! One taxonomy shared by the account manager and the transfer engine.
//! Business-rule failures are never retried internally; `StorageFailure` is
//! surfaced after any partial mutation has been rolled back.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::core_types::AccountId;
use crate::money::MoneyError;
use crate::store::StoreError;

/// Wallet error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Insufficient funds on account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account: AccountId,
        balance: Decimal,
        requested: Decimal,
    },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid account: {0}")]
    InvalidAccount(String),

    #[error("Source and destination account cannot be the same: {0}")]
    SelfTransfer(AccountId),

    #[error("Storage failure: {0}")]
    StorageFailure(String),
}

impl WalletError {
    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            WalletError::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            WalletError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            WalletError::InvalidAmount(_) => "INVALID_AMOUNT",
            WalletError::InvalidAccount(_) => "INVALID_ACCOUNT",
            WalletError::SelfTransfer(_) => "SELF_TRANSFER",
            WalletError::StorageFailure(_) => "STORAGE_FAILURE",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            WalletError::AccountNotFound(_) => 404,
            WalletError::InsufficientFunds { .. }
            | WalletError::InvalidAmount(_)
            | WalletError::InvalidAccount(_)
            | WalletError::SelfTransfer(_) => 400,
            WalletError::StorageFailure(_) => 500,
        }
    }
}

impl From<StoreError> for WalletError {
    fn from(e: StoreError) -> Self {
        WalletError::StorageFailure(e.to_string())
    }
}

impl From<MoneyError> for WalletError {
    fn from(e: MoneyError) -> Self {
        WalletError::InvalidAmount(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(WalletError::SelfTransfer(1).code(), "SELF_TRANSFER");
        assert_eq!(WalletError::AccountNotFound(7).code(), "ACCOUNT_NOT_FOUND");
        assert_eq!(
            WalletError::InsufficientFunds {
                account: 1,
                balance: dec!(0),
                requested: dec!(1),
            }
            .code(),
            "INSUFFICIENT_FUNDS"
        );
    }

    #[test]
    fn test_http_status() {
        assert_eq!(WalletError::AccountNotFound(1).http_status(), 404);
        assert_eq!(WalletError::InvalidAmount("x".into()).http_status(), 400);
        assert_eq!(WalletError::InvalidAccount("x".into()).http_status(), 400);
        assert_eq!(WalletError::StorageFailure("x".into()).http_status(), 500);
    }

    #[test]
    fn test_store_error_maps_to_storage_failure() {
        let err: WalletError = StoreError::Unavailable("down".into()).into();
        assert!(matches!(err, WalletError::StorageFailure(_)));
    }

    #[test]
    fn test_display() {
        let err = WalletError::InsufficientFunds {
            account: 3,
            balance: dec!(10),
            requested: dec!(11),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds on account 3: balance 10, requested 11"
        );
    }
}
