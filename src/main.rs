//! Wallet - account balances and money transfers over HTTP
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │  Config  │───▶│ Gateway  │───▶│ Transfer │───▶│  Stores  │
//! │  (YAML)  │    │  (axum)  │    │  Engine  │    │ (mem/pg) │
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘
//! ```
//!
//! Usage: `wallet [--env dev] [--port 8080]`

use std::sync::Arc;

use anyhow::Context;

use wallet::account::AccountManager;
use wallet::config::{AppConfig, StorageBackend};
use wallet::db::Database;
use wallet::gateway::{self, state::AppState};
use wallet::store::{
    AccountStore, InMemoryAccountStore, InMemoryOperationStore, OperationStore, PgAccountStore,
    PgOperationStore,
};
use wallet::transfer::TransferEngine;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> anyhow::Result<Option<u16>> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            let port = args[i + 1]
                .parse()
                .with_context(|| format!("Invalid --port value: {}", args[i + 1]))?;
            return Ok(Some(port));
        }
    }
    Ok(None)
}

/// Wire stores, account manager and transfer engine per the configured backend
async fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    match config.storage.backend {
        StorageBackend::Memory => {
            let accounts: Arc<dyn AccountStore> = Arc::new(InMemoryAccountStore::new());
            let operations: Arc<dyn OperationStore> = Arc::new(InMemoryOperationStore::new());
            let manager = Arc::new(AccountManager::new(accounts));
            Ok(AppState::new(Arc::new(TransferEngine::new(manager, operations))))
        }
        StorageBackend::Postgres => {
            let url = config
                .postgres_url
                .as_deref()
                .context("postgres_url is required for the postgres backend")?;
            let db = Database::connect(url)
                .await
                .context("Failed to connect to PostgreSQL")?;
            db.init_schema()
                .await
                .context("Failed to initialize database schema")?;
            tracing::info!("PostgreSQL connected, schema ready");

            let accounts: Arc<dyn AccountStore> = Arc::new(PgAccountStore::new(db.pool().clone()));
            let operations: Arc<dyn OperationStore> =
                Arc::new(PgOperationStore::new(db.pool().clone()));
            let manager = Arc::new(AccountManager::new(accounts));
            let engine = Arc::new(TransferEngine::new(manager, operations));
            Ok(AppState::new(engine).with_database(Arc::new(db)))
        }
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Ctrl-C received, shutting down"),
        Err(e) => tracing::error!("Failed to listen for Ctrl-C: {}", e),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env)?;
    let _log_guard = wallet::logging::init_logging(&app_config);

    tracing::info!("Starting wallet in {} mode", env);

    // Get Gateway config from YAML, allow --port override
    let gateway_config = &app_config.gateway;
    let port = get_port_override()?.unwrap_or(gateway_config.port);

    let state = Arc::new(build_state(&app_config).await?);
    gateway::run_server(&gateway_config.host, port, state, shutdown_signal()).await
}
