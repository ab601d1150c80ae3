use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

/// Hashes `secret` with argon2id and a fresh random salt, returning the PHC
/// string (algorithm, parameters and salt travel inside it).
pub fn hash_password(secret: &str) -> Result<String, AppError> {
    if secret.is_empty() {
        return Err(AppError::ValidationError("password must not be empty".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| AppError::InternalError(format!("password hashing failed: {e}")))?;

    Ok(hash.to_string())
}

/// Checks `secret` against a stored PHC hash. A hash that does not parse
/// is treated as a mismatch.
pub fn verify_password(secret: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok()
}
