//! HTTP route table.

pub mod handlers;

use actix_web::{error::JsonPayloadError, middleware::from_fn, web, HttpRequest};

use crate::auth::handlers::{create_account, login};
use crate::auth::require_account_token;
use crate::error::AppError;
use crate::health_check;

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("invalid request body: {err}")).into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .route("/health", web::get().to(health_check))
        .route("/login", web::post().to(login))
        .service(
            web::resource("/account")
                .route(web::get().to(handlers::list_accounts))
                .route(web::post().to(create_account)),
        )
        .service(
            web::resource("/account/{id}")
                .wrap(from_fn(require_account_token))
                .route(web::get().to(handlers::get_account))
                .route(web::delete().to(handlers::delete_account)),
        );
}
