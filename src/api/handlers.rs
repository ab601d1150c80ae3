use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::info;

use crate::db::models::Account;
use crate::error::AppError;
use crate::AppState;

pub async fn list_accounts(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let accounts = state.storage.list_accounts().await?;
    Ok(HttpResponse::Ok().json(accounts))
}

/// Runs behind `require_account_token`, which already loaded the account.
pub async fn get_account(account: web::ReqData<Account>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(account.into_inner()))
}

pub async fn delete_account(
    account: web::ReqData<Account>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = account.id;
    state.storage.delete_account(id).await?;
    info!("Deleted account {} (id {})", account.number, id);
    Ok(HttpResponse::Ok().json(json!({ "deleted": id })))
}
