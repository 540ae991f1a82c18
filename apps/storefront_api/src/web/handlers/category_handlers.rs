// apps/storefront_api/src/web/handlers/category_handlers.rs

use actix_web::{web, HttpResponse};
use storefront_flow::{ContextData, PipelineResult};
use tracing::{info, instrument, warn};

use crate::db;
use crate::errors::AppError;
use crate::models::{CategoryWithProducts, CreateCategoryPayload};
use crate::pipelines::contexts::CreateCategoryCtxData;
use crate::state::AppState;

#[instrument(name = "handler::list_categories", skip(app_state))]
pub async fn list_categories_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let categories = db::categories::list_categories(&app_state.db_pool).await?;
  info!("Fetched {} categories.", categories.len());
  Ok(HttpResponse::Ok().json(categories))
}

#[instrument(name = "handler::get_category", skip(app_state, path), fields(category_id = %path.as_ref()))]
pub async fn get_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let category_id = path.into_inner();

  let category = db::categories::find_category_by_id(&app_state.db_pool, category_id)
    .await?
    .ok_or_else(|| {
      warn!("Category with ID {} not found.", category_id);
      AppError::NotFound(format!("Category with ID {} not found.", category_id))
    })?;
  let products = db::products::products_in_category(&app_state.db_pool, category_id).await?;

  Ok(HttpResponse::Ok().json(CategoryWithProducts { category, products }))
}

#[instrument(name = "handler::create_category", skip(app_state, payload))]
pub async fn create_category_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CreateCategoryPayload>,
) -> Result<HttpResponse, AppError> {
  let ctx_data = ContextData::new(CreateCategoryCtxData::new(
    app_state.get_ref().clone(),
    payload.into_inner(),
  ));

  match app_state.flows.run(ctx_data.clone()).await? {
    PipelineResult::Completed => {
      let created = ctx_data.read().created_category.clone().ok_or_else(|| {
        AppError::Internal("Category pipeline completed without a created category.".to_string())
      })?;
      Ok(HttpResponse::Created().json(created))
    }
    PipelineResult::Stopped => {
      warn!("Category creation pipeline was stopped by a handler.");
      Err(AppError::PipelineHaltedByHandler)
    }
  }
}
