// apps/storefront_api/src/pipelines/product_pipeline.rs

use crate::db;
use crate::errors::AppError;
use crate::pipelines::common_steps;
use crate::pipelines::contexts::CreateProductCtxData;
use crate::state::AppState;
use std::sync::Arc;
use storefront_flow::{ContextData, FlowRegistry, Pipeline, PipelineControl};
use tracing::{event, info, Level};

/// Builds the product creation pipeline. Validation runs before the category
/// lookup, so a body missing fields is a 400 even when its category is unknown.
pub fn create_product_pipeline() -> Pipeline<CreateProductCtxData, AppError> {
  let mut p = Pipeline::<CreateProductCtxData, AppError>::new(&[
    ("validate_product_input", false, None),
    ("check_category_exists", false, None),
    ("insert_product", false, None),
  ]);

  p.on_step("validate_product_input", |ctx_data: ContextData<CreateProductCtxData>| {
    Box::pin(async move {
      let payload = ctx_data.read().payload.clone();
      event!(Level::DEBUG, ?payload, "Validating product input.");

      let validated = payload.validate()?;
      ctx_data.write().validated = Some(validated);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  p.on_step("check_category_exists", |ctx_data: ContextData<CreateProductCtxData>| {
    Box::pin(async move {
      let (category_id, db_pool) = {
        let guard = ctx_data.read();
        let category_id = guard
          .validated
          .as_ref()
          .map(|v| v.category_id)
          .ok_or_else(|| AppError::Internal("Validated product input missing from context.".to_string()))?;
        (category_id, guard.app_state.db_pool.clone())
      };

      common_steps::ensure_category_exists(&db_pool, category_id).await?;
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  p.on_step("insert_product", |ctx_data: ContextData<CreateProductCtxData>| {
    Box::pin(async move {
      let (new_product, db_pool) = {
        let guard = ctx_data.read();
        let new_product = guard
          .validated
          .clone()
          .ok_or_else(|| AppError::Internal("Validated product input missing from context.".to_string()))?;
        (new_product, guard.app_state.db_pool.clone())
      };

      let product_id = db::products::insert_product(&db_pool, &new_product)
        .await
        .map_err(common_steps::map_write_error)?;
      let created = db::products::find_product_by_id(&db_pool, product_id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("Product {} vanished right after insert.", product_id)))?;

      info!(product_id, name = %created.product.name, "Product created.");
      ctx_data.write().created_product = Some(created);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  p
}

pub fn register_create_product_pipeline(flows: &Arc<FlowRegistry<AppError>>, _app_state: &AppState) {
  flows.register_pipeline(create_product_pipeline());
  tracing::info!("Product creation pipeline registered.");
}
