use std::sync::{Arc, OnceLock};

use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::TokenIssuer;
use crate::db::models::{Account, CreateAccountRequest, LoginResponse, NewAccount};
use crate::db::storage::Storage;
use crate::error::{AppError, AuthError, DatabaseError};

const MAX_NAME_LEN: usize = 50;
const ACCOUNT_NUMBER_ATTEMPTS: usize = 5;

pub struct AuthService {
    storage: Arc<dyn Storage>,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(storage: Arc<dyn Storage>, tokens: TokenIssuer) -> Self {
        Self { storage, tokens }
    }

    pub async fn create_account(&self, req: CreateAccountRequest) -> Result<Account, AppError> {
        let first_name = validate_name("firstName", &req.first_name)?;
        let last_name = validate_name("lastName", &req.last_name)?;

        let password = req.password;
        let encrypted_password = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

        let mut new_account = NewAccount::new(first_name, last_name, encrypted_password);
        let mut attempt = 1;
        loop {
            match self.storage.create_account(&new_account).await {
                Ok(account) => {
                    info!("Created account {} (id {})", account.number, account.id);
                    return Ok(account);
                }
                Err(AppError::DatabaseError(DatabaseError::Duplicate)) if attempt < ACCOUNT_NUMBER_ATTEMPTS => {
                    warn!("Account number {} already taken, retrying", new_account.number);
                    new_account.number = crate::db::models::generate_account_number();
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Exchanges an account number and password for a token. Unknown
    /// numbers and wrong passwords fail identically and take one argon2
    /// verification each.
    pub async fn login(&self, number: i64, password: String) -> Result<LoginResponse, AppError> {
        let account = match self.storage.get_account_by_number(number).await {
            Ok(account) => Some(account),
            Err(AppError::DatabaseError(DatabaseError::NotFound)) => None,
            Err(e) => return Err(e),
        };

        let stored_hash = account.as_ref().map(|a| a.encrypted_password.clone());
        let verified = verify_login_secret(password, stored_hash).await?;
        let account = match account {
            Some(account) if verified => account,
            _ => {
                warn!("Login failed for account {}", number);
                return Err(AuthError::NotAuthenticated.into());
            }
        };

        let token = self.tokens.issue(&account)?;
        info!("Login successful for account {}", number);
        Ok(LoginResponse { number: account.number, token })
    }

    /// Decides whether `token` grants access to the account stored under
    /// `raw_id`. Performs one directory read and never writes.
    pub async fn authorize(&self, token: Option<&str>, raw_id: &str) -> Result<Account, AuthError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::PermissionDenied)?;

        let claims = self.tokens.decode(token)?;
        let id = parse_account_id(raw_id).ok_or(AuthError::InvalidId)?;

        let account = self.storage.get_account_by_id(id).await.map_err(|e| {
            warn!("Authorization lookup for id {} failed: {}", id, e);
            AuthError::InvalidAccount
        })?;

        if claims.account_number != account.number {
            warn!("Token for account {} presented for id {}", claims.account_number, id);
            return Err(AuthError::PermissionDenied);
        }

        Ok(account)
    }
}

/// Hash checked when the account number is unknown. Computed on first use.
fn placeholder_hash() -> Option<&'static str> {
    static HASH: OnceLock<Option<String>> = OnceLock::new();
    HASH.get_or_init(|| hash_password("placeholder secret for unknown accounts").ok())
        .as_deref()
}

/// Verifies `password` on the blocking pool. Without a stored hash the
/// placeholder is verified instead and the result is always `false`.
async fn verify_login_secret(password: String, stored_hash: Option<String>) -> Result<bool, AppError> {
    let verified = tokio::task::spawn_blocking(move || match stored_hash {
        Some(hash) => verify_password(&password, &hash),
        None => {
            if let Some(hash) = placeholder_hash() {
                let _ = verify_password(&password, hash);
            }
            false
        }
    })
    .await?;
    Ok(verified)
}

/// Internal ids are non-negative integers.
pub fn parse_account_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id >= 0)
}

fn validate_name(field: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::ValidationError(format!("{field} must not be empty")));
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(AppError::ValidationError(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(value.to_string())
}
