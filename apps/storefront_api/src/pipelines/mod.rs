// apps/storefront_api/src/pipelines/mod.rs

//! Write workflows (create/update) run as step pipelines.

use crate::errors::AppError;
use crate::state::AppState;
use std::sync::Arc;
use storefront_flow::FlowRegistry;

pub mod common_steps;
pub mod contexts;

pub mod category_pipeline;
pub mod product_pipeline;
pub mod product_update_pipeline;

/// Registers every pipeline the HTTP handlers dispatch to. Called once at startup.
pub fn register_all_pipelines(flows: &Arc<FlowRegistry<AppError>>, app_state: &AppState) {
  tracing::info!("Registering pipelines...");

  product_pipeline::register_create_product_pipeline(flows, app_state);
  product_update_pipeline::register_update_product_pipeline(flows, app_state);
  category_pipeline::register_create_category_pipeline(flows, app_state);

  tracing::info!("All application pipelines registered.");
}
