//! Operation handlers (transfers and lookups)

use std::sync::Arc;

use axum::extract::{Path, State};

use super::super::state::AppState;
use super::super::types::{
    ApiError, ApiResult, JsonBody, OperationData, SendOperationRequest, created, error_codes, ok,
};

/// Show operation
///
/// GET /api/operation/show/{id}
#[utoipa::path(
    get,
    path = "/api/operation/show/{id}",
    params(("id" = u64, Path, description = "Operation id")),
    responses(
        (status = 200, description = "Operation found", body = OperationData, content_type = "application/json"),
        (status = 400, description = "Malformed operation id"),
        (status = 404, description = "Operation not found"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Operation"
)]
pub async fn show_operation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<OperationData> {
    let id = super::parse_id(&id)?;

    match state.engine.find_operation(id).await? {
        Some(operation) => ok(OperationData::from(&operation)),
        None => ApiError::not_found(
            error_codes::OPERATION_NOT_FOUND,
            format!("Operation {} not found", id),
        )
        .into_err(),
    }
}

/// Send money between two accounts
///
/// POST /api/operation/send
#[utoipa::path(
    post,
    path = "/api/operation/send",
    request_body = SendOperationRequest,
    responses(
        (status = 201, description = "Transfer committed", body = OperationData, content_type = "application/json"),
        (status = 400, description = "Invalid amount, self transfer or insufficient funds"),
        (status = 404, description = "Source or destination account not found"),
        (status = 500, description = "Storage failure, transfer rolled back")
    ),
    tag = "Operation"
)]
pub async fn send_operation(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<SendOperationRequest>,
) -> ApiResult<OperationData> {
    let operation = state
        .engine
        .transfer(
            req.source_account,
            req.destination_account,
            req.amount.inner(),
        )
        .await?;
    created(OperationData::from(&operation))
}
