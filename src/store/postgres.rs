//! PostgreSQL stores
//!
//! One row per record, written with an upsert so `save` stays a single
//! atomic statement. Ids come from the `accounts_id_seq` / `operations_id_seq`
//! sequences created by [`crate::db::Database::init_schema`].

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::{AccountStore, OperationStore, StoreError};
use crate::account::Account;
use crate::core_types::{AccountId, OperationId};
use crate::operation::Operation;

/// Postgres BIGINT → u64 id, rejecting negatives
fn to_id(raw: i64) -> Result<u64, StoreError> {
    u64::try_from(raw).map_err(|_| StoreError::Corrupt {
        id: 0,
        reason: format!("negative id {}", raw),
    })
}

/// u64 id → Postgres BIGINT
fn to_db_id(id: u64) -> Result<i64, StoreError> {
    i64::try_from(id).map_err(|_| StoreError::Corrupt {
        id,
        reason: "id exceeds BIGINT range".into(),
    })
}

/// Account rows in `accounts`
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_account(row: &PgRow) -> Result<Account, StoreError> {
        let id = to_id(row.try_get("id")?)?;
        let operation_ids: Vec<i64> = row.try_get("operation_ids")?;
        let operations = operation_ids
            .into_iter()
            .map(to_id)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Account::restore(
            id,
            row.try_get("name")?,
            row.try_get("balance")?,
            operations,
        ))
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn next_id(&self) -> Result<AccountId, StoreError> {
        let raw = sqlx::query_scalar::<_, i64>("SELECT nextval('accounts_id_seq')")
            .fetch_one(&self.pool)
            .await?;
        to_id(raw)
    }

    async fn save(&self, account: &Account) -> Result<(), StoreError> {
        let operation_ids = account
            .operations()
            .map(to_db_id)
            .collect::<Result<Vec<_>, _>>()?;

        sqlx::query(
            r#"
            INSERT INTO accounts (id, name, balance, operation_ids)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                balance = EXCLUDED.balance,
                operation_ids = EXCLUDED.operation_ids
            "#,
        )
        .bind(to_db_id(account.id())?)
        .bind(account.name())
        .bind(account.balance())
        .bind(operation_ids)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, balance, operation_ids
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(to_db_id(id)?)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_account).transpose()
    }
}

/// Operation rows in `operations`
pub struct PgOperationStore {
    pool: PgPool,
}

impl PgOperationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_operation(row: &PgRow) -> Result<Operation, StoreError> {
        Ok(Operation::restore(
            to_id(row.try_get("id")?)?,
            row.try_get("amount")?,
            to_id(row.try_get("source_account")?)?,
            to_id(row.try_get("destination_account")?)?,
            row.try_get("created_at")?,
        ))
    }
}

#[async_trait]
impl OperationStore for PgOperationStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn next_id(&self) -> Result<OperationId, StoreError> {
        let raw = sqlx::query_scalar::<_, i64>("SELECT nextval('operations_id_seq')")
            .fetch_one(&self.pool)
            .await?;
        to_id(raw)
    }

    async fn save(&self, operation: &Operation) -> Result<(), StoreError> {
        // Operations are immutable: a second save of the same id is a no-op
        sqlx::query(
            r#"
            INSERT INTO operations (id, amount, source_account, destination_account, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(to_db_id(operation.id())?)
        .bind(operation.amount())
        .bind(to_db_id(operation.source_account())?)
        .bind(to_db_id(operation.destination_account())?)
        .bind(operation.created_at())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: OperationId) -> Result<Option<Operation>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, amount, source_account, destination_account, created_at
            FROM operations
            WHERE id = $1
            "#,
        )
        .bind(to_db_id(id)?)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_operation).transpose()
    }
}
