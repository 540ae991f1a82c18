// apps/storefront_api/src/models/mod.rs

//! Catalog entities as stored, plus the request payloads that create or change them.

pub mod category;
pub mod product;

pub use category::{Category, CategoryWithProducts, CreateCategoryPayload, NewCategory};
pub use product::{
  CreateProductPayload, NewProduct, Product, ProductChanges, ProductPatchPayload, ProductWithCategory,
};

use crate::errors::{AppError, Result};

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn non_blank(field: &str, value: String) -> Result<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(AppError::Validation(format!("'{}' must not be blank.", field)));
  }
  Ok(trimmed.to_string())
}

/// Accepts absolute http(s) URLs only.
pub(crate) fn image_url(field: &str, value: String) -> Result<String> {
  let value = non_blank(field, value)?;
  match url::Url::parse(&value) {
    Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(value),
    _ => Err(AppError::Validation(format!("'{}' must be an absolute http(s) URL.", field))),
  }
}

/// Builds the 400 message listing every missing field at once.
pub(crate) fn missing_fields_error(missing: &[&str]) -> AppError {
  AppError::Validation(format!("Missing required field(s): {}.", missing.join(", ")))
}
