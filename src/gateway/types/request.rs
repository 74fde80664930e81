//! Request bodies and the JSON extractor
//!
//! Inbound amounts are [`StrictDecimal`], so malformed numbers are rejected
//! before a handler runs. [`JsonBody`] turns every body rejection (bad JSON,
//! wrong content type, field validation) into a 400 with the API envelope
//! instead of axum's plain-text default.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use utoipa::ToSchema;

use super::money::StrictDecimal;
use super::response::ApiError;

/// POST /api/account/create
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    #[schema(example = "Oleg")]
    pub name: String,
    /// Opening balance, `>= 0`
    pub balance: StrictDecimal,
}

/// POST /api/operation/send
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendOperationRequest {
    #[schema(example = 1)]
    pub source_account: u64,
    #[schema(example = 2)]
    pub destination_account: u64,
    /// Amount to move, `> 0`
    pub amount: StrictDecimal,
}

/// `Json<T>` with envelope-shaped rejections
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e.body_text())))?;
        Ok(JsonBody(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{StatusCode, header};
    use rust_decimal_macros::dec;

    fn json_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn test_send_request_amount_is_string_only() {
        let req: SendOperationRequest = serde_json::from_str(
            r#"{"source_account": 1, "destination_account": 2, "amount": "100.5"}"#,
        )
        .unwrap();
        assert_eq!(req.amount.inner(), dec!(100.5));

        let err = serde_json::from_str::<SendOperationRequest>(
            r#"{"source_account": 1, "destination_account": 2, "amount": 7}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("decimal string"));
    }

    #[tokio::test]
    async fn test_json_body_extracts() {
        let JsonBody(req) = JsonBody::<CreateAccountRequest>::from_request(
            json_request(r#"{"name": "Oleg", "balance": "100"}"#),
            &(),
        )
        .await
        .unwrap();
        assert_eq!(req.name, "Oleg");
        assert_eq!(*req.balance, dec!(100));
    }

    #[tokio::test]
    async fn test_json_body_rejects_bad_amount() {
        let err = JsonBody::<CreateAccountRequest>::from_request(
            json_request(r#"{"name": "Oleg", "balance": ".5"}"#),
            &(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.msg.contains("use 0.5 not .5"));
    }

    #[tokio::test]
    async fn test_json_body_rejects_malformed_json() {
        let err = JsonBody::<SendOperationRequest>::from_request(json_request("{not json"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.msg.starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn test_json_body_rejects_missing_content_type() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"name": "Oleg", "balance": "1"}"#))
            .unwrap();
        let err = JsonBody::<CreateAccountRequest>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
