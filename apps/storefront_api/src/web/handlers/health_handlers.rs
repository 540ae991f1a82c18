// apps/storefront_api/src/web/handlers/health_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;

use crate::db;
use crate::errors::AppError;
use crate::state::AppState;

/// Round-trips to the store so a broken pool reports 500 instead of "ok".
#[instrument(name = "handler::health_check", skip(app_state))]
pub async fn health_check_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  db::ping(&app_state.db_pool).await?;
  Ok(HttpResponse::Ok().json(json!({ "status": "ok" })))
}
