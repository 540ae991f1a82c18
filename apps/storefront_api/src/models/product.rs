// apps/storefront_api/src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{image_url, missing_fields_error, non_blank, Category};
use crate::errors::{AppError, Result};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: i64,
  pub name: String,
  pub price: i64,
  pub description: String,
  pub image: String,
  pub category_id: i64,
  pub created_at: DateTime<Utc>,
}

/// A product together with the category its `category_id` points at.
#[derive(Debug, Clone, Serialize)]
pub struct ProductWithCategory {
  #[serde(flatten)]
  pub product: Product,
  pub category: Category,
}

/// Body of `POST /products`. Every field is optional here so that missing
/// ones surface as a validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
  pub name: Option<String>,
  pub price: Option<i64>,
  pub description: Option<String>,
  pub category_id: Option<i64>,
  pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
  pub name: String,
  pub price: i64,
  pub description: String,
  pub image: String,
  pub category_id: i64,
}

/// Body of `PATCH /products/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatchPayload {
  pub name: Option<String>,
  pub price: Option<i64>,
  pub description: Option<String>,
  pub category_id: Option<i64>,
  pub image: Option<String>,
}

/// Validated subset of product columns to overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChanges {
  pub name: Option<String>,
  pub price: Option<i64>,
  pub description: Option<String>,
  pub image: Option<String>,
  pub category_id: Option<i64>,
}

fn positive_price(price: i64) -> Result<i64> {
  if price <= 0 {
    return Err(AppError::Validation("'price' must be a positive integer.".to_string()));
  }
  Ok(price)
}

impl CreateProductPayload {
  /// Checks presence first, then the shape of each field. Whether
  /// `category_id` exists is not decided here.
  pub fn validate(self) -> Result<NewProduct> {
    let mut missing = Vec::new();
    if self.name.is_none() {
      missing.push("name");
    }
    if self.price.is_none() {
      missing.push("price");
    }
    if self.description.is_none() {
      missing.push("description");
    }
    if self.category_id.is_none() {
      missing.push("categoryId");
    }
    if self.image.is_none() {
      missing.push("image");
    }

    match (self.name, self.price, self.description, self.category_id, self.image) {
      (Some(name), Some(price), Some(description), Some(category_id), Some(image)) => Ok(NewProduct {
        name: non_blank("name", name)?,
        price: positive_price(price)?,
        description: non_blank("description", description)?,
        image: image_url("image", image)?,
        category_id,
      }),
      _ => Err(missing_fields_error(&missing)),
    }
  }
}

impl ProductPatchPayload {
  pub fn validate(self) -> Result<ProductChanges> {
    let changes = ProductChanges {
      name: self.name.map(|n| non_blank("name", n)).transpose()?,
      price: self.price.map(positive_price).transpose()?,
      description: self.description.map(|d| non_blank("description", d)).transpose()?,
      image: self.image.map(|i| image_url("image", i)).transpose()?,
      category_id: self.category_id,
    };
    if changes.is_empty() {
      return Err(AppError::Validation("No product fields to update.".to_string()));
    }
    Ok(changes)
  }
}

impl ProductChanges {
  pub fn is_empty(&self) -> bool {
    self.name.is_none()
      && self.price.is_none()
      && self.description.is_none()
      && self.image.is_none()
      && self.category_id.is_none()
  }
}
