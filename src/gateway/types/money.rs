//! Money types for API boundary enforcement
//!
//! - `StrictDecimal`: Format-validated input type
//! - `DisplayAmount`: Type-safe output formatting

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::money;

// ============================================================================
// StrictDecimal: Format-Validated Decimal at Serde Layer
// ============================================================================

/// Strict format Decimal - validates format during deserialization
///
/// Only JSON strings (`"100.5"`) are accepted. A JSON number would be read
/// through `f64` and rounded before any check could see it. The string must:
/// - Rejects `.5` (must be `0.5`)
/// - Rejects `5.` (must be `5.0` or `5`)
/// - Rejects negative numbers
/// - Rejects empty strings
/// - Rejects scientific notation
///
/// Business validation (zero amounts, sufficient funds) happens in the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[schema(value_type = String, example = "100.00")]
pub struct StrictDecimal(Decimal);

impl StrictDecimal {
    /// Get the inner Decimal value
    pub fn inner(self) -> Decimal {
        self.0
    }

    /// Create from Decimal (for testing)
    #[cfg(test)]
    pub fn from_decimal(d: Decimal) -> Self {
        Self(d)
    }

    /// Apply the textual format rules and parse
    fn parse_strict(s: &str) -> Result<Self, String> {
        if s.is_empty() {
            return Err("Amount cannot be empty".into());
        }

        // Reject .5 format (must be 0.5)
        if s.starts_with('.') {
            return Err("Invalid format: use 0.5 not .5".into());
        }

        // Reject 5. format (must be 5.0 or 5)
        if s.ends_with('.') {
            return Err("Invalid format: use 5.0 not 5.".into());
        }

        if s.contains('e') || s.contains('E') {
            return Err("Invalid format: scientific notation not allowed".into());
        }

        if s.starts_with('+') {
            return Err("Invalid format: + prefix not allowed".into());
        }

        let d = Decimal::from_str(s).map_err(|e| format!("Invalid decimal: {}", e))?;

        if d.is_sign_negative() && !d.is_zero() {
            return Err("Amount cannot be negative".into());
        }

        Ok(StrictDecimal(d))
    }
}

impl std::ops::Deref for StrictDecimal {
    type Target = Decimal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for StrictDecimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let text = String::deserialize(deserializer).map_err(|_| {
            D::Error::custom("Amount must be a decimal string, e.g. \"100.50\"")
        })?;
        StrictDecimal::parse_strict(&text).map_err(D::Error::custom)
    }
}

impl Serialize for StrictDecimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Serialize as string to preserve precision
        serializer.serialize_str(&self.0.to_string())
    }
}

// ============================================================================
// DisplayAmount: Type-Safe Output for API Responses
// ============================================================================

/// Display amount for API responses - all monetary output goes through
/// [`money::format_amount`].
///
/// Always serializes as a JSON string to preserve precision.
#[derive(Debug, Clone, PartialEq, Eq, ToSchema)]
#[schema(value_type = String, example = "150.5")]
pub struct DisplayAmount(String);

impl DisplayAmount {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Decimal> for DisplayAmount {
    fn from(amount: Decimal) -> Self {
        Self(money::format_amount(amount))
    }
}

impl std::fmt::Display for DisplayAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for DisplayAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
