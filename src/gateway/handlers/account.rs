//! Account handlers

use std::sync::Arc;

use axum::extract::{Path, State};

use super::super::state::AppState;
use super::super::types::{
    AccountData, ApiError, ApiResult, CreateAccountRequest, JsonBody, created, error_codes, ok,
};

/// Show account
///
/// GET /api/account/show/{id}
#[utoipa::path(
    get,
    path = "/api/account/show/{id}",
    params(("id" = u64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account found", body = AccountData, content_type = "application/json"),
        (status = 400, description = "Malformed account id"),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Account"
)]
pub async fn show_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<AccountData> {
    let id = super::parse_id(&id)?;

    match state.engine.find_account(id).await? {
        Some(account) => ok(AccountData::from(&account)),
        None => ApiError::not_found(
            error_codes::ACCOUNT_NOT_FOUND,
            format!("Account {} not found", id),
        )
        .into_err(),
    }
}

/// Create account
///
/// POST /api/account/create
#[utoipa::path(
    post,
    path = "/api/account/create",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = AccountData, content_type = "application/json"),
        (status = 400, description = "Empty name or invalid balance"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Account"
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateAccountRequest>,
) -> ApiResult<AccountData> {
    let account = state.accounts.create(&req.name, req.balance.inner()).await?;
    created(AccountData::from(&account))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::handlers::tests::test_state;
    use crate::gateway::types::StrictDecimal;
    use axum::http::StatusCode;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_create_then_show() {
        let state = test_state();
        let (status, body) = create_account(
            State(state.clone()),
            JsonBody(CreateAccountRequest {
                name: "Oleg".into(),
                balance: StrictDecimal::from_decimal(dec!(100)),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        let created = body.0.data.unwrap();
        assert_eq!(created.name, "Oleg");
        assert_eq!(created.balance.as_str(), "100");

        let (status, body) = show_account(State(state), Path(created.id.to_string()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.0.data.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let err = create_account(
            State(test_state()),
            JsonBody(CreateAccountRequest {
                name: "   ".into(),
                balance: StrictDecimal::from_decimal(dec!(1)),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, error_codes::INVALID_ACCOUNT);
    }

    #[tokio::test]
    async fn test_show_missing_and_malformed() {
        let state = test_state();
        let err = show_account(State(state.clone()), Path("77".into()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, error_codes::ACCOUNT_NOT_FOUND);

        let err = show_account(State(state), Path("abc".into()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, error_codes::INVALID_PARAMETER);
    }
}
