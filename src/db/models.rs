use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Upper bound (exclusive) for generated account numbers.
pub const ACCOUNT_NUMBER_RANGE: i64 = 1_000_000;

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    #[serde(skip_serializing)]
    pub encrypted_password: String,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

/// An account that has not been persisted yet, so it has no id.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    pub encrypted_password: String,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

impl NewAccount {
    pub fn new(first_name: String, last_name: String, encrypted_password: String) -> Self {
        Self {
            first_name,
            last_name,
            number: generate_account_number(),
            encrypted_password,
            balance: 0,
            created_at: Utc::now(),
        }
    }

    pub fn into_account(self, id: i64) -> Account {
        Account {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            number: self.number,
            encrypted_password: self.encrypted_password,
            balance: self.balance,
            created_at: self.created_at,
        }
    }
}

pub fn generate_account_number() -> i64 {
    rand::thread_rng().gen_range(1..ACCOUNT_NUMBER_RANGE)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub number: i64,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub number: i64,
    pub token: String,
}
