//! API Response types and error codes
//!
//! - `ApiResponse<T>`: Unified response wrapper
//! - `ApiError` / `ApiResult<T>`: Handler error plumbing
//! - `error_codes`: Standard error code constants
//! - Account / operation response DTOs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::money::DisplayAmount;
use crate::account::Account;
use crate::error::WalletError;
use crate::operation::Operation;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or absent (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

// ============================================================================
// Handler Errors
// ============================================================================

/// Error returned by handlers, rendered as `(status, ApiResponse<()>)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER, msg)
    }

    pub fn not_found(code: i32, msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, msg)
    }

    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::SERVICE_UNAVAILABLE,
            msg,
        )
    }

    /// Shorthand for early returns: `return ApiError::...(..).into_err();`
    pub fn into_err<T>(self) -> Result<T, ApiError> {
        Err(self)
    }
}

impl From<WalletError> for ApiError {
    fn from(e: WalletError) -> Self {
        let status = StatusCode::from_u16(e.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = match &e {
            WalletError::AccountNotFound(_) => error_codes::ACCOUNT_NOT_FOUND,
            WalletError::InsufficientFunds { .. } => error_codes::INSUFFICIENT_FUNDS,
            WalletError::InvalidAmount(_) => error_codes::INVALID_AMOUNT,
            WalletError::InvalidAccount(_) => error_codes::INVALID_ACCOUNT,
            WalletError::SelfTransfer(_) => error_codes::SELF_TRANSFER,
            WalletError::StorageFailure(_) => error_codes::STORAGE_FAILURE,
        };
        Self::new(status, code, format!("{}: {}", e.code(), e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ApiResponse::<()>::error(self.code, self.msg)),
        )
            .into_response()
    }
}

/// 200 with the success envelope
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

/// 201 with the success envelope
pub fn created<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Account response data
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountData {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "Oleg")]
    pub name: String,
    pub balance: DisplayAmount,
    /// Ids of the operations this account took part in, ascending
    #[schema(example = json!([1, 2]))]
    pub operations: Vec<u64>,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id(),
            name: account.name().to_string(),
            balance: account.balance().into(),
            operations: account.operations().collect(),
        }
    }
}

/// Operation response data
#[derive(Debug, Serialize, ToSchema)]
pub struct OperationData {
    #[schema(example = 1)]
    pub id: u64,
    pub amount: DisplayAmount,
    #[schema(example = 1)]
    pub source_account: u64,
    #[schema(example = 2)]
    pub destination_account: u64,
    pub created_at: DateTime<Utc>,
}

impl From<&Operation> for OperationData {
    fn from(operation: &Operation) -> Self {
        Self {
            id: operation.id(),
            amount: operation.amount().into(),
            source_account: operation.source_account(),
            destination_account: operation.destination_account(),
            created_at: operation.created_at(),
        }
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const INSUFFICIENT_FUNDS: i32 = 1002;
    pub const INVALID_AMOUNT: i32 = 1003;
    pub const INVALID_ACCOUNT: i32 = 1004;
    pub const SELF_TRANSFER: i32 = 1005;

    // Resource errors (4xxx)
    pub const ACCOUNT_NOT_FOUND: i32 = 4001;
    pub const OPERATION_NOT_FOUND: i32 = 4002;

    // Server errors (5xxx)
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
    pub const STORAGE_FAILURE: i32 = 5002;
}
