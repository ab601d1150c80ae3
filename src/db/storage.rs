use async_trait::async_trait;

use crate::db::models::{Account, NewAccount};
use crate::error::AppError;

/// Persistence operations for account records.
///
/// Lookups that miss return `DatabaseError::NotFound`; everything else the
/// backend reports is surfaced as another `AppError::DatabaseError`.
/// Implementations must tolerate concurrent calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persists a new account and returns it with its assigned id.
    /// A clashing account number yields `DatabaseError::Duplicate`.
    async fn create_account(&self, account: &NewAccount) -> Result<Account, AppError>;

    async fn delete_account(&self, id: i64) -> Result<(), AppError>;

    /// Not supported by any backend yet; always `AppError::NotImplemented`.
    async fn update_account(&self, account: &Account) -> Result<(), AppError>;

    async fn list_accounts(&self) -> Result<Vec<Account>, AppError>;

    async fn get_account_by_id(&self, id: i64) -> Result<Account, AppError>;

    async fn get_account_by_number(&self, number: i64) -> Result<Account, AppError>;
}
