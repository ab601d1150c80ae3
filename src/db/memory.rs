use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::db::models::{Account, NewAccount};
use crate::db::storage::Storage;
use crate::error::{AppError, DatabaseError};

/// Process-local `Storage` used by tests and local runs without PostgreSQL.
pub struct InMemoryStorage {
    accounts: RwLock<HashMap<i64, Account>>,
    next_id: AtomicI64,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_account(&self, account: &NewAccount) -> Result<Account, AppError> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.number == account.number) {
            return Err(DatabaseError::Duplicate.into());
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let created = account.clone().into_account(id);
        accounts.insert(id, created.clone());
        Ok(created)
    }

    async fn delete_account(&self, id: i64) -> Result<(), AppError> {
        self.accounts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DatabaseError::NotFound.into())
    }

    async fn update_account(&self, _account: &Account) -> Result<(), AppError> {
        Err(AppError::NotImplemented("account update".into()))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AppError> {
        let mut accounts: Vec<Account> = self.accounts.read().await.values().cloned().collect();
        accounts.sort_by_key(|a| a.id);
        Ok(accounts)
    }

    async fn get_account_by_id(&self, id: i64) -> Result<Account, AppError> {
        self.accounts
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound.into())
    }

    async fn get_account_by_number(&self, number: i64) -> Result<Account, AppError> {
        self.accounts
            .read()
            .await
            .values()
            .find(|a| a.number == number)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(number: i64) -> NewAccount {
        let mut account = NewAccount::new("Ada".into(), "Lovelace".into(), "hash".into());
        account.number = number;
        account
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = InMemoryStorage::new();
        let first = store.create_account(&new_account(11)).await.unwrap();
        let second = store.create_account(&new_account(22)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_duplicate_number_rejected() {
        let store = InMemoryStorage::new();
        store.create_account(&new_account(42)).await.unwrap();

        let err = store.create_account(&new_account(42)).await.unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(DatabaseError::Duplicate)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_lookups() {
        let store = InMemoryStorage::new();
        let created = store.create_account(&new_account(99)).await.unwrap();

        assert_eq!(store.get_account_by_id(created.id).await.unwrap(), created);
        assert_eq!(store.get_account_by_number(99).await.unwrap(), created);

        assert!(matches!(
            store.get_account_by_id(1234).await,
            Err(AppError::DatabaseError(DatabaseError::NotFound))
        ));
        assert!(matches!(
            store.get_account_by_number(1234).await,
            Err(AppError::DatabaseError(DatabaseError::NotFound))
        ));
    }

    #[tokio::test]
    async fn test_delete_and_list() {
        let store = InMemoryStorage::new();
        let a = store.create_account(&new_account(1)).await.unwrap();
        let b = store.create_account(&new_account(2)).await.unwrap();

        store.delete_account(a.id).await.unwrap();
        assert_eq!(store.list_accounts().await.unwrap(), vec![b]);

        assert!(matches!(
            store.delete_account(a.id).await,
            Err(AppError::DatabaseError(DatabaseError::NotFound))
        ));
    }

    #[tokio::test]
    async fn test_update_is_not_implemented() {
        let store = InMemoryStorage::new();
        let created = store.create_account(&new_account(5)).await.unwrap();

        assert!(matches!(
            store.update_account(&created).await,
            Err(AppError::NotImplemented(_))
        ));
    }
}
