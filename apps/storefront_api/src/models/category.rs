// apps/storefront_api/src/models/category.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{image_url, missing_fields_error, non_blank, Product};
use crate::errors::Result;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
  pub id: i64,
  pub name: String,
  pub image: String,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithProducts {
  #[serde(flatten)]
  pub category: Category,
  pub products: Vec<Product>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCategoryPayload {
  pub name: Option<String>,
  pub image: Option<String>,
}

/// A category that passed validation and can be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
  pub name: String,
  pub image: String,
}

impl CreateCategoryPayload {
  pub fn validate(self) -> Result<NewCategory> {
    match (self.name, self.image) {
      (Some(name), Some(image)) => Ok(NewCategory {
        name: non_blank("name", name)?,
        image: image_url("image", image)?,
      }),
      (name, image) => {
        let mut missing = Vec::new();
        if name.is_none() {
          missing.push("name");
        }
        if image.is_none() {
          missing.push("image");
        }
        Err(missing_fields_error(&missing))
      }
    }
  }
}
