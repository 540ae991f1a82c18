// apps/storefront_api/src/pipelines/product_update_pipeline.rs

use crate::db;
use crate::errors::AppError;
use crate::pipelines::common_steps;
use crate::pipelines::contexts::UpdateProductCtxData;
use crate::state::AppState;
use std::sync::Arc;
use storefront_flow::{ContextData, FlowRegistry, Pipeline, PipelineControl, SkipCondition};
use tracing::{event, info, Level};

fn missing(what: &str) -> AppError {
  AppError::Internal(format!("{} missing from update context.", what))
}

/// Patches one product. The category check only runs when the patch moves
/// the product to another category.
pub fn update_product_pipeline() -> Pipeline<UpdateProductCtxData, AppError> {
  let category_unchanged: SkipCondition<UpdateProductCtxData> =
    Arc::new(|data: &UpdateProductCtxData| data.patch.category_id.is_none());

  let mut p = Pipeline::<UpdateProductCtxData, AppError>::new(&[
    ("fetch_existing_product", false, None),
    ("validate_product_changes", false, None),
    ("check_new_category_exists", false, Some(category_unchanged)),
    ("apply_product_changes", false, None),
  ]);

  p.on_step("fetch_existing_product", |ctx_data: ContextData<UpdateProductCtxData>| {
    Box::pin(async move {
      let (product_id, db_pool) = {
        let guard = ctx_data.read();
        (guard.product_id, guard.app_state.db_pool.clone())
      };

      let existing = db::products::find_product_by_id(&db_pool, product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found.", product_id)))?;
      ctx_data.write().existing = Some(existing);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  p.on_step("validate_product_changes", |ctx_data: ContextData<UpdateProductCtxData>| {
    Box::pin(async move {
      let patch = ctx_data.read().patch.clone();
      event!(Level::DEBUG, ?patch, "Validating product changes.");

      let changes = patch.validate()?;
      ctx_data.write().changes = Some(changes);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  p.on_step("check_new_category_exists", |ctx_data: ContextData<UpdateProductCtxData>| {
    Box::pin(async move {
      let (category_id, db_pool) = {
        let guard = ctx_data.read();
        let category_id = guard
          .changes
          .as_ref()
          .and_then(|c| c.category_id)
          .ok_or_else(|| missing("Target category"))?;
        (category_id, guard.app_state.db_pool.clone())
      };

      common_steps::ensure_category_exists(&db_pool, category_id).await?;
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  p.on_step("apply_product_changes", |ctx_data: ContextData<UpdateProductCtxData>| {
    Box::pin(async move {
      let (product_id, changes, db_pool) = {
        let guard = ctx_data.read();
        let changes = guard.changes.clone().ok_or_else(|| missing("Validated changes"))?;
        (guard.product_id, changes, guard.app_state.db_pool.clone())
      };

      let updated = db::products::update_product(&db_pool, product_id, &changes)
        .await
        .map_err(common_steps::map_write_error)?;
      if !updated {
        return Err(AppError::NotFound(format!("Product with ID {} not found.", product_id)));
      }

      let product = db::products::find_product_by_id(&db_pool, product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found.", product_id)))?;
      info!(product_id, "Product updated.");
      ctx_data.write().updated_product = Some(product);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  p
}

pub fn register_update_product_pipeline(flows: &Arc<FlowRegistry<AppError>>, _app_state: &AppState) {
  flows.register_pipeline(update_product_pipeline());
  tracing::info!("Product update pipeline registered.");
}
