#![allow(dead_code)]

use std::sync::Arc;

use bank_server::config::{AuthConfig, CorsConfig, DatabaseConfig, ServerConfig};
use bank_server::{AppState, InMemoryStorage, Settings};

pub const TEST_SECRET: &str = "integration_secret";

pub fn test_settings() -> Settings {
    Settings {
        environment: "test".to_string(),
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            workers: 1,
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            acquire_timeout_secs: 1,
        },
        auth: AuthConfig {
            jwt_secret: TEST_SECRET.to_string(),
            token_expiry_secs: 60,
        },
        cors: CorsConfig {
            enabled: false,
            allow_any_origin: false,
            max_age: 0,
        },
    }
}

pub fn test_state() -> (AppState, Arc<InMemoryStorage>) {
    let storage = Arc::new(InMemoryStorage::new());
    let state = AppState::new(test_settings(), storage.clone()).expect("Failed to build test state");
    (state, storage)
}
