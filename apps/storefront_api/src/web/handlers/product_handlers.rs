// apps/storefront_api/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use storefront_flow::{ContextData, PipelineResult};
use tracing::{info, instrument, warn};

use crate::db;
use crate::db::products::ProductFilter;
use crate::errors::AppError;
use crate::models::{CreateProductPayload, ProductPatchPayload};
use crate::pipelines::contexts::{CreateProductCtxData, UpdateProductCtxData};
use crate::state::AppState;

/// Query string of `GET /products`. Unsigned pagination fields reject negative input at extraction.
#[derive(Deserialize, Debug, Default)]
pub struct ListProductsQuery {
  pub limit: Option<u32>,
  pub offset: Option<u32>,
  pub price: Option<i64>,
  pub price_min: Option<i64>,
  pub price_max: Option<i64>,
}

impl TryFrom<ListProductsQuery> for ProductFilter {
  type Error = AppError;

  fn try_from(query: ListProductsQuery) -> Result<Self, AppError> {
    for (field, value) in [
      ("price", query.price),
      ("price_min", query.price_min),
      ("price_max", query.price_max),
    ] {
      if matches!(value, Some(v) if v < 0) {
        return Err(AppError::Validation(format!("'{}' must not be negative.", field)));
      }
    }
    if let (Some(min), Some(max)) = (query.price_min, query.price_max) {
      if min > max {
        return Err(AppError::Validation(
          "'price_min' must not be greater than 'price_max'.".to_string(),
        ));
      }
    }

    Ok(ProductFilter {
      limit: query.limit,
      offset: query.offset,
      price: query.price,
      price_min: query.price_min,
      price_max: query.price_max,
    })
  }
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ListProductsQuery>,
) -> Result<HttpResponse, AppError> {
  let filter = ProductFilter::try_from(query_params.into_inner())?;
  let products = db::products::list_products(&app_state.db_pool, &filter).await?;

  info!("Fetched {} products.", products.len());
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();

  match db::products::find_product_by_id(&app_state.db_pool, product_id).await? {
    Some(product) => Ok(HttpResponse::Ok().json(product)),
    None => {
      warn!("Product with ID {} not found.", product_id);
      Err(AppError::NotFound(format!("Product with ID {} not found.", product_id)))
    }
  }
}

#[instrument(name = "handler::create_product", skip(app_state, payload))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CreateProductPayload>,
) -> Result<HttpResponse, AppError> {
  let ctx_data = ContextData::new(CreateProductCtxData::new(
    app_state.get_ref().clone(),
    payload.into_inner(),
  ));

  match app_state.flows.run(ctx_data.clone()).await? {
    PipelineResult::Completed => {
      let created = ctx_data.read().created_product.clone().ok_or_else(|| {
        AppError::Internal("Product pipeline completed without a created product.".to_string())
      })?;
      info!(product_id = created.product.id, "Product creation completed.");
      Ok(HttpResponse::Created().json(created))
    }
    PipelineResult::Stopped => {
      warn!("Product creation pipeline was stopped by a handler.");
      Err(AppError::PipelineHaltedByHandler)
    }
  }
}

#[instrument(name = "handler::update_product", skip(app_state, path, payload), fields(product_id = %path.as_ref()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  payload: web::Json<ProductPatchPayload>,
) -> Result<HttpResponse, AppError> {
  let ctx_data = ContextData::new(UpdateProductCtxData::new(
    app_state.get_ref().clone(),
    path.into_inner(),
    payload.into_inner(),
  ));

  match app_state.flows.run(ctx_data.clone()).await? {
    PipelineResult::Completed => {
      let updated = ctx_data.read().updated_product.clone().ok_or_else(|| {
        AppError::Internal("Product update pipeline completed without a result.".to_string())
      })?;
      Ok(HttpResponse::Ok().json(updated))
    }
    PipelineResult::Stopped => {
      warn!("Product update pipeline was stopped by a handler.");
      Err(AppError::PipelineHaltedByHandler)
    }
  }
}

#[instrument(name = "handler::delete_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();

  if !db::products::delete_product(&app_state.db_pool, product_id).await? {
    warn!("Product with ID {} not found for deletion.", product_id);
    return Err(AppError::NotFound(format!("Product with ID {} not found.", product_id)));
  }

  info!("Product {} deleted.", product_id);
  Ok(HttpResponse::Ok().json(json!({ "id": product_id })))
}
