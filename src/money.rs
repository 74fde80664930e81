//! Money Module
//!
//! All balances and transfer amounts are `rust_decimal::Decimal`: exact
//! base-10 arithmetic, never binary floating point. Every amount that enters
//! the core should pass through one of the checks below.
//!
//! ## Usage
//! ```rust
//! use rust_decimal::Decimal;
//! use wallet::money::{format_amount, parse_amount};
//!
//! let amount = parse_amount("1.50").unwrap();
//! assert_eq!(amount, Decimal::new(150, 2));
//! assert_eq!(format_amount(amount), "1.5");
//! ```

use rust_decimal::prelude::*;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Money validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Amount must be greater than zero")]
    NotPositive,

    #[error("Amount cannot be negative")]
    Negative,

    #[error("Amount too large, would overflow")]
    Overflow,

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

// ============================================================================
// Parse: Client → Decimal
// ============================================================================

/// Parse a client-provided amount string.
///
/// Strict format: rejects `.5`, `5.`, scientific notation, explicit `+` sign
/// and empty strings. Sign is NOT checked here; callers decide between
/// [`ensure_positive`] and [`ensure_non_negative`].
pub fn parse_amount(amount_str: &str) -> Result<Decimal, MoneyError> {
    let s = amount_str.trim();
    if s.is_empty() {
        return Err(MoneyError::InvalidFormat("empty string".into()));
    }
    if s.starts_with('+') {
        return Err(MoneyError::InvalidFormat("+ prefix not allowed".into()));
    }

    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.starts_with('.') {
        return Err(MoneyError::InvalidFormat(
            "missing leading zero (e.g., use 0.5 instead of .5)".into(),
        ));
    }
    if digits.ends_with('.') {
        return Err(MoneyError::InvalidFormat(
            "missing fractional part (e.g., use 5.0 instead of 5.)".into(),
        ));
    }
    if digits.contains(['e', 'E']) {
        return Err(MoneyError::InvalidFormat(
            "scientific notation not allowed".into(),
        ));
    }

    Decimal::from_str(s).map_err(|e| MoneyError::InvalidFormat(e.to_string()))
}

// ============================================================================
// Checks
// ============================================================================

/// Transfer/debit/credit amounts must be strictly positive.
#[inline]
pub fn ensure_positive(amount: Decimal) -> Result<Decimal, MoneyError> {
    if amount <= Decimal::ZERO {
        return Err(MoneyError::NotPositive);
    }
    Ok(amount)
}

/// Balances (including an account's opening balance) must be `>= 0`.
#[inline]
pub fn ensure_non_negative(amount: Decimal) -> Result<Decimal, MoneyError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(MoneyError::Negative);
    }
    Ok(amount)
}

/// `balance + amount` with overflow detection.
#[inline]
pub fn checked_credit(balance: Decimal, amount: Decimal) -> Result<Decimal, MoneyError> {
    balance.checked_add(amount).ok_or(MoneyError::Overflow)
}

/// `balance - amount`; `None` when the result would go below zero.
#[inline]
pub fn checked_debit(balance: Decimal, amount: Decimal) -> Option<Decimal> {
    if amount > balance {
        return None;
    }
    balance.checked_sub(amount)
}

// ============================================================================
// Format: Decimal → Client
// ============================================================================

/// Format an amount for API output.
///
/// Trailing zeros are dropped (`100.00` → `100`), the value is never rendered
/// in scientific notation.
pub fn format_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}
