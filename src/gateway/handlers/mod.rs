//! HTTP handlers
//!
//! Thin adapters: decode the request, call the account manager or the
//! transfer engine, map [`WalletError`](crate::error::WalletError) onto the
//! response envelope.

pub mod account;
pub mod health;
pub mod operation;

pub use account::{create_account, show_account};
pub use health::{HealthResponse, health_check};
pub use operation::{send_operation, show_operation};

use super::types::ApiError;

/// Parse a path id so malformed ids get the envelope, not axum's plain-text rejection
pub(crate) fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse::<u64>()
        .map_err(|_| ApiError::bad_request(format!("Invalid id: {}", raw)))
}
