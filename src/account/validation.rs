//! Input validation for account creation
//!
//! `AccountName` is a validated type: fields are private, so an account can
//! only be opened with a name that passed these rules.

use std::fmt;

use rust_decimal::Decimal;

use crate::money;

/// Longest accepted display label, in characters
pub const MAX_NAME_LEN: usize = 128;

// ============================================================================
// Validation Errors
// ============================================================================

/// Validation errors for account creation input
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Account name cannot be empty")]
    EmptyName,

    #[error("Account name too long: expected at most {max} characters, got {actual}")]
    NameTooLong { max: usize, actual: usize },

    #[error("Account name contains control characters: '{0}'")]
    ControlCharacters(String),

    #[error("Initial balance cannot be negative: {0}")]
    NegativeBalance(Decimal),
}

// ============================================================================
// AccountName - Validated Display Label (Private Fields)
// ============================================================================

/// Validated account name (non-empty after trimming, printable)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountName(String);

impl AccountName {
    /// Create a new validated AccountName
    ///
    /// # Validation Rules
    /// - Surrounding whitespace is trimmed
    /// - Length: 1-128 characters after trimming
    /// - No control characters
    ///
    /// # Examples
    /// ```
    /// use wallet::account::validation::AccountName;
    ///
    /// let oleg = AccountName::new("  Oleg ").unwrap();
    /// assert_eq!(oleg.as_str(), "Oleg");
    ///
    /// assert!(AccountName::new("   ").is_err());
    /// ```
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let len = name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(ValidationError::NameTooLong {
                max: MAX_NAME_LEN,
                actual: len,
            });
        }

        if name.chars().any(char::is_control) {
            return Err(ValidationError::ControlCharacters(name.escape_debug().to_string()));
        }

        Ok(Self(name.to_string()))
    }

    /// Get the validated name as &str
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into owned String
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opening balance must be `>= 0`
pub fn validate_initial_balance(balance: Decimal) -> Result<Decimal, ValidationError> {
    money::ensure_non_negative(balance).map_err(|_| ValidationError::NegativeBalance(balance))
}
