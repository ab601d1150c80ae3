use thiserror::Error;
use actix_web::{ResponseError, HttpResponse, http::StatusCode};
use serde_json::json;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    AuthError(#[from] AuthError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{0} is not implemented")]
    NotImplemented(String),
}

impl AppError {
    /// Message rendered to clients. Auth failures carry only their short
    /// reason and upstream details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::AuthError(e) => e.to_string(),
            AppError::ValidationError(msg) => msg.clone(),
            AppError::DatabaseError(DatabaseError::NotFound) => "record not found".to_string(),
            AppError::DatabaseError(DatabaseError::Duplicate) => "duplicate record".to_string(),
            AppError::DatabaseError(_) => "database error".to_string(),
            AppError::ConfigError(_) => "configuration error".to_string(),
            AppError::InternalError(_) => "internal server error".to_string(),
            AppError::NotImplemented(_) => self.to_string(),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return AppError::DatabaseError(DatabaseError::Duplicate);
            }
        }
        match err {
            sqlx::Error::RowNotFound => AppError::DatabaseError(DatabaseError::NotFound),
            _ => AppError::DatabaseError(DatabaseError::QueryError(err.to_string())),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }
        HttpResponse::build(status).json(json!({ "error": self.public_message() }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::AuthError(AuthError::SigningError(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::AuthError(_) => StatusCode::FORBIDDEN,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DatabaseError(DatabaseError::NotFound) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(DatabaseError::Duplicate) => StatusCode::CONFLICT,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Authentication and authorization failures. The display strings are sent
/// to clients verbatim, so none of them say which check failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("permission denied")]
    PermissionDenied,

    #[error("invalid id")]
    InvalidId,

    #[error("invalid account")]
    InvalidAccount,

    #[error("token signing failed")]
    SigningError(String),
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Record not found")]
    NotFound,

    #[error("Duplicate record")]
    Duplicate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::InternalError(_)));

        let config_err = config::ConfigError::NotFound(String::from("key not found"));
        let app_err: AppError = config_err.into();
        assert!(matches!(app_err, AppError::ConfigError(_)));

        let db_err = sqlx::Error::RowNotFound;
        let app_err: AppError = db_err.into();
        assert!(matches!(app_err, AppError::DatabaseError(DatabaseError::NotFound)));

        let db_err = sqlx::Error::PoolTimedOut;
        let app_err: AppError = db_err.into();
        assert!(matches!(app_err, AppError::DatabaseError(DatabaseError::QueryError(_))));
    }

    #[test]
    fn test_error_status_codes() {
        let err = AppError::AuthError(AuthError::NotAuthenticated);
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let err = AppError::AuthError(AuthError::PermissionDenied);
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let err = AppError::AuthError(AuthError::InvalidId);
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let err = AppError::AuthError(AuthError::SigningError("no key".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = AppError::ValidationError("invalid input".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = AppError::DatabaseError(DatabaseError::NotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = AppError::DatabaseError(DatabaseError::Duplicate);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err = AppError::NotImplemented("account update".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_IMPLEMENTED);
    }

    #[test]
    fn test_public_messages_hide_internals() {
        let err = AppError::AuthError(AuthError::PermissionDenied);
        assert_eq!(err.public_message(), "permission denied");

        let err = AppError::DatabaseError(DatabaseError::QueryError("relation \"account\" does not exist".into()));
        assert_eq!(err.public_message(), "database error");

        let err = AppError::ConfigError("auth.jwt_secret missing".into());
        assert_eq!(err.public_message(), "configuration error");

        let err = AppError::NotImplemented("account update".to_string());
        assert_eq!(err.public_message(), "account update is not implemented");
    }

    #[actix_web::test]
    async fn test_error_body_shape() {
        let err = AppError::AuthError(AuthError::InvalidAccount);
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, json!({ "error": "invalid account" }));
    }
}
