use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::db::models::Account;
use crate::error::{AppError, AuthError};

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    #[serde(rename = "accountNumber")]
    pub account_number: i64,
    pub iat: i64,
    pub exp: i64,
}

/// Mints and checks HS256 tokens with the server's signing secret.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Result<Self, AppError> {
        if secret.is_empty() {
            return Err(AppError::ConfigError("token signing secret is not configured".into()));
        }
        if ttl <= Duration::zero() {
            return Err(AppError::ConfigError("token lifetime must be positive".into()));
        }

        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }

    pub fn issue(&self, account: &Account) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            account_number: account.number,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AuthError::SigningError(e.to_string()).into())
    }

    /// Verifies signature, algorithm and expiry before any claim is read.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("token rejected: {}", e);
                AuthError::PermissionDenied
            })
    }
}
