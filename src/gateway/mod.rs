//! HTTP Gateway
//!
//! REST adapter over the account manager and the transfer engine.

pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

/// Build the complete router
pub fn router(state: Arc<AppState>) -> Router {
    let account_routes = Router::new()
        .route("/show/{id}", get(handlers::show_account))
        .route("/create", post(handlers::create_account));

    let operation_routes = Router::new()
        .route("/show/{id}", get(handlers::show_operation))
        .route("/send", post(handlers::send_operation));

    Router::new()
        .route("/api/health", get(handlers::health_check))
        .nest("/api/account", account_routes)
        .nest("/api/operation", operation_routes)
        .with_state(state)
        // OpenAPI / Swagger UI (stateless, added after with_state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Serve the gateway on `host:port` until `shutdown` resolves
pub async fn run_server<F>(
    host: &str,
    port: u16,
    state: Arc<AppState>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {} (port may already be in use)", addr))?;

    serve(listener, state, shutdown).await
}

/// Serve on an already bound listener
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().context("listener has no local address")?;
    tracing::info!(
        store = state.accounts.store_name(),
        "Gateway listening on http://{}",
        addr
    );
    tracing::info!("API Docs: http://{}/docs", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    tracing::info!("Gateway stopped");
    Ok(())
}
