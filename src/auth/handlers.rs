use actix_web::{web, HttpResponse};
use tracing::info;

use crate::db::models::{CreateAccountRequest, LoginRequest};
use crate::error::AppError;
use crate::AppState;

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received login request for account: {}", req.number);
    let LoginRequest { number, password } = req.into_inner();
    let response = state.auth.login(number, password).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub async fn create_account(
    req: web::Json<CreateAccountRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received account creation request for {} {}", req.first_name, req.last_name);
    let account = state.auth.create_account(req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(account))
}
