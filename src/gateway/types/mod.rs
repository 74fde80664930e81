//! Gateway types module
//!
//! This module provides type-safe types for API boundary enforcement:
//!
//! ## Input Types
//! - [`StrictDecimal`]: Format-validated decimal for API input
//! - [`CreateAccountRequest`], [`SendOperationRequest`]: request bodies
//! - [`JsonBody`]: Axum extractor with envelope-shaped rejections
//!
//! ## Output Types
//! - [`DisplayAmount`]: Type-safe formatted amount for API responses
//! - [`ApiResponse<T>`]: Unified API response wrapper
//! - [`ApiError`] / [`ApiResult`]: handler error plumbing

pub mod money;
pub mod request;
pub mod response;

pub use money::{DisplayAmount, StrictDecimal};
pub use request::{CreateAccountRequest, JsonBody, SendOperationRequest};
pub use response::{
    AccountData, ApiError, ApiResponse, ApiResult, OperationData, created, error_codes, ok,
};
