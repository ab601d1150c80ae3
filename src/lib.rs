pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;

use std::sync::Arc;
use actix_web::HttpResponse;

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use api::configure;
pub use auth::{AuthService, TokenIssuer};
pub use db::{Account, InMemoryStorage, PgStorage, Storage};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Application state shared across all workers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub storage: Arc<dyn Storage>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Builds state over any `Storage`. Fails when the auth settings cannot
    /// produce a token issuer, so a missing secret stops startup.
    pub fn new(config: Settings, storage: Arc<dyn Storage>) -> Result<Self> {
        config.validate()?;
        let tokens = TokenIssuer::new(
            &config.auth.jwt_secret,
            chrono::Duration::seconds(config.auth.token_expiry_secs),
        )?;
        let auth = AuthService::new(storage.clone(), tokens);

        Ok(Self {
            config: Arc::new(config),
            storage,
            auth: Arc::new(auth),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let config = Settings::new_for_test().expect("Failed to load test config");
        let state = AppState::new(config, Arc::new(InMemoryStorage::new()));
        assert!(state.is_ok());
    }

    #[test]
    fn test_app_state_requires_secret() {
        let mut config = Settings::new_for_test().expect("Failed to load test config");
        config.auth.jwt_secret = String::new();

        let state = AppState::new(config, Arc::new(InMemoryStorage::new()));
        assert!(matches!(state, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_app_state_clone() {
        let config = Settings::new_for_test().expect("Failed to load test config");
        let state = AppState::new(config, Arc::new(InMemoryStorage::new())).unwrap();

        let cloned = state.clone();

        assert!(Arc::ptr_eq(&state.config, &cloned.config));
        assert!(Arc::ptr_eq(&state.storage, &cloned.storage));
        assert!(Arc::ptr_eq(&state.auth, &cloned.auth));
    }
}
