// apps/storefront_api/src/pipelines/contexts.rs

//! Data each pipeline run works on. Handlers get these wrapped in `ContextData`.

use crate::models::{
  Category, CreateCategoryPayload, CreateProductPayload, NewCategory, NewProduct, ProductChanges,
  ProductPatchPayload, ProductWithCategory,
};
use crate::state::AppState;

#[derive(Clone)]
pub struct CreateProductCtxData {
  pub app_state: AppState,
  pub payload: CreateProductPayload,
  pub validated: Option<NewProduct>,
  pub created_product: Option<ProductWithCategory>,
}

impl CreateProductCtxData {
  pub fn new(app_state: AppState, payload: CreateProductPayload) -> Self {
    Self {
      app_state,
      payload,
      validated: None,
      created_product: None,
    }
  }
}

#[derive(Clone)]
pub struct UpdateProductCtxData {
  pub app_state: AppState,
  pub product_id: i64,
  pub patch: ProductPatchPayload,
  pub existing: Option<ProductWithCategory>,
  pub changes: Option<ProductChanges>,
  pub updated_product: Option<ProductWithCategory>,
}

impl UpdateProductCtxData {
  pub fn new(app_state: AppState, product_id: i64, patch: ProductPatchPayload) -> Self {
    Self {
      app_state,
      product_id,
      patch,
      existing: None,
      changes: None,
      updated_product: None,
    }
  }
}

#[derive(Clone)]
pub struct CreateCategoryCtxData {
  pub app_state: AppState,
  pub payload: CreateCategoryPayload,
  pub validated: Option<NewCategory>,
  pub created_category: Option<Category>,
}

impl CreateCategoryCtxData {
  pub fn new(app_state: AppState, payload: CreateCategoryPayload) -> Self {
    Self {
      app_state,
      payload,
      validated: None,
      created_category: None,
    }
  }
}
