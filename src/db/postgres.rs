use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::db::models::{Account, NewAccount};
use crate::db::storage::Storage;
use crate::error::{AppError, DatabaseError};

const ACCOUNT_COLUMNS: &str =
    "id, first_name, last_name, number, encrypted_password, balance, created_at";

pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        info!("Connected to database");
        Ok(Self { pool })
    }

    /// Creates the `account` table when it does not exist yet.
    pub async fn init(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS account (
                id BIGSERIAL PRIMARY KEY,
                first_name VARCHAR(50) NOT NULL,
                last_name VARCHAR(50) NOT NULL,
                number BIGINT NOT NULL UNIQUE,
                encrypted_password VARCHAR(500) NOT NULL,
                balance BIGINT NOT NULL DEFAULT 0,
                created_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn create_account(&self, account: &NewAccount) -> Result<Account, AppError> {
        let query = format!(
            r#"
            INSERT INTO account (first_name, last_name, number, encrypted_password, balance, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );
        let created = sqlx::query_as::<_, Account>(&query)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(account.number)
            .bind(&account.encrypted_password)
            .bind(account.balance)
            .bind(account.created_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn delete_account(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM account WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound.into());
        }
        Ok(())
    }

    async fn update_account(&self, _account: &Account) -> Result<(), AppError> {
        Err(AppError::NotImplemented("account update".into()))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AppError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM account ORDER BY id");
        let accounts = sqlx::query_as::<_, Account>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(accounts)
    }

    async fn get_account_by_id(&self, id: i64) -> Result<Account, AppError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM account WHERE id = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound.into())
    }

    async fn get_account_by_number(&self, number: i64) -> Result<Account, AppError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM account WHERE number = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(number)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound.into())
    }
}
