//! Account management module
//!
//! Accounts hold a non-negative decimal balance and a back-reference set of
//! the operations they took part in.

pub mod lock;
pub mod manager;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use lock::{AccountGuard, AccountLocks};
pub use manager::AccountManager;
pub use models::Account;
pub use validation::{AccountName, ValidationError};
