// apps/storefront_api/src/pipelines/category_pipeline.rs

use crate::db;
use crate::errors::AppError;
use crate::pipelines::common_steps;
use crate::pipelines::contexts::CreateCategoryCtxData;
use crate::state::AppState;
use std::sync::Arc;
use storefront_flow::{ContextData, FlowRegistry, Pipeline, PipelineControl};
use tracing::{info, warn};

pub fn create_category_pipeline() -> Pipeline<CreateCategoryCtxData, AppError> {
  let mut p = Pipeline::<CreateCategoryCtxData, AppError>::new(&[
    ("validate_category_input", false, None),
    ("check_category_name_available", false, None),
    ("insert_category", false, None),
  ]);

  p.on_step("validate_category_input", |ctx_data: ContextData<CreateCategoryCtxData>| {
    Box::pin(async move {
      let payload = ctx_data.read().payload.clone();
      let validated = payload.validate()?;
      ctx_data.write().validated = Some(validated);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  // Names compare case-insensitively.
  p.on_step("check_category_name_available", |ctx_data: ContextData<CreateCategoryCtxData>| {
    Box::pin(async move {
      let (name, db_pool) = {
        let guard = ctx_data.read();
        let name = guard
          .validated
          .as_ref()
          .map(|v| v.name.clone())
          .ok_or_else(|| AppError::Internal("Validated category input missing from context.".to_string()))?;
        (name, guard.app_state.db_pool.clone())
      };

      if db::categories::category_name_taken(&db_pool, &name).await? {
        warn!(category_name = %name, "Category name already taken.");
        return Err(AppError::Conflict(format!("Category '{}' already exists.", name)));
      }
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  p.on_step("insert_category", |ctx_data: ContextData<CreateCategoryCtxData>| {
    Box::pin(async move {
      let (new_category, db_pool) = {
        let guard = ctx_data.read();
        let new_category = guard
          .validated
          .clone()
          .ok_or_else(|| AppError::Internal("Validated category input missing from context.".to_string()))?;
        (new_category, guard.app_state.db_pool.clone())
      };

      let category = db::categories::insert_category(&db_pool, &new_category)
        .await
        .map_err(common_steps::map_write_error)?;
      info!(category_id = category.id, name = %category.name, "Category created.");
      ctx_data.write().created_category = Some(category);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  p
}

pub fn register_create_category_pipeline(flows: &Arc<FlowRegistry<AppError>>, _app_state: &AppState) {
  flows.register_pipeline(create_category_pipeline());
  tracing::info!("Category creation pipeline registered.");
}
