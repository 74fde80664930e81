//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{
    AccountData, CreateAccountRequest, DisplayAmount, OperationData, SendOperationRequest,
    StrictDecimal,
};

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wallet API",
        version = "1.0.0",
        description = "Accounts with decimal balances and atomic money transfers between them.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::account::show_account,
        crate::gateway::handlers::account::create_account,
        crate::gateway::handlers::operation::show_operation,
        crate::gateway::handlers::operation::send_operation,
    ),
    components(
        schemas(
            HealthResponse,
            AccountData,
            OperationData,
            CreateAccountRequest,
            SendOperationRequest,
            StrictDecimal,
            DisplayAmount,
        )
    ),
    tags(
        (name = "Account", description = "Account creation and lookup"),
        (name = "Operation", description = "Money transfers and their records"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;
