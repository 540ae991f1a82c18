// apps/storefront_api/src/pipelines/common_steps.rs
use crate::db;
use crate::errors::{AppError, Result as AppResult};
use sqlx::SqlitePool;
use tracing::{info, instrument, warn};

/// Unknown categories are a 404, not a validation failure.
#[instrument(name = "common_step::ensure_category_exists", skip(db_pool), err(Display))]
pub async fn ensure_category_exists(db_pool: &SqlitePool, category_id: i64) -> AppResult<()> {
  if db::categories::category_exists(db_pool, category_id).await? {
    info!("Category {} exists.", category_id);
    Ok(())
  } else {
    warn!("Category {} does not exist.", category_id);
    Err(AppError::NotFound(format!("Category with ID {} not found.", category_id)))
  }
}

/// Maps constraint violations raised by a write to the error the client should see.
pub fn map_write_error(err: sqlx::Error) -> AppError {
  if let sqlx::Error::Database(db_err) = &err {
    if db_err.is_foreign_key_violation() {
      return AppError::NotFound("Referenced category not found.".to_string());
    }
    if db_err.is_unique_violation() {
      return AppError::Conflict("A record with the same unique value already exists.".to_string());
    }
  }
  AppError::Sqlx(err)
}
