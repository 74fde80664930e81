//! Database connection management

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Wallet tables. Every statement is idempotent.
const SCHEMA: &[&str] = &[
    "CREATE SEQUENCE IF NOT EXISTS accounts_id_seq",
    "CREATE SEQUENCE IF NOT EXISTS operations_id_seq",
    r#"CREATE TABLE IF NOT EXISTS accounts (
        id            BIGINT PRIMARY KEY,
        name          TEXT NOT NULL CHECK (length(name) > 0),
        balance       NUMERIC NOT NULL CHECK (balance >= 0),
        operation_ids BIGINT[] NOT NULL DEFAULT '{}'
    )"#,
    r#"CREATE TABLE IF NOT EXISTS operations (
        id                  BIGINT PRIMARY KEY,
        amount              NUMERIC NOT NULL CHECK (amount > 0),
        source_account      BIGINT NOT NULL,
        destination_account BIGINT NOT NULL,
        created_at          TIMESTAMPTZ NOT NULL,
        CHECK (source_account <> destination_account)
    )"#,
];

/// PostgreSQL database connection pool
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(50)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        tracing::info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create sequences and tables if missing
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::info!("Wallet schema initialized");
        Ok(())
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
