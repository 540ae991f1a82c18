// apps/storefront_api/src/state.rs
use crate::config::AppConfig;
use crate::errors::AppError;
use sqlx::SqlitePool;
use std::sync::Arc;
use storefront_flow::FlowRegistry;

#[derive(Clone)]
pub struct AppState {
  pub db_pool: SqlitePool,
  pub flows: Arc<FlowRegistry<AppError>>,
  pub config: Arc<AppConfig>,
}
