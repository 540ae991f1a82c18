// apps/storefront_api/src/db/categories.rs

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;

use crate::models::{Category, NewCategory};

pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<Category>, sqlx::Error> {
  sqlx::query_as::<_, Category>("SELECT id, name, image, created_at FROM categories ORDER BY id ASC")
    .fetch_all(pool)
    .await
}

pub async fn find_category_by_id(pool: &SqlitePool, category_id: i64) -> Result<Option<Category>, sqlx::Error> {
  sqlx::query_as::<_, Category>("SELECT id, name, image, created_at FROM categories WHERE id = ?")
    .bind(category_id)
    .fetch_optional(pool)
    .await
}

#[instrument(name = "db::category_exists", skip(pool))]
pub async fn category_exists(pool: &SqlitePool, category_id: i64) -> Result<bool, sqlx::Error> {
  let found = sqlx::query_scalar::<_, i64>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?)")
    .bind(category_id)
    .fetch_one(pool)
    .await?;
  Ok(found != 0)
}

/// Case-insensitive, so "Games" and "games" cannot both exist.
pub async fn category_name_taken(pool: &SqlitePool, name: &str) -> Result<bool, sqlx::Error> {
  let found = sqlx::query_scalar::<_, i64>("SELECT EXISTS(SELECT 1 FROM categories WHERE name = ? COLLATE NOCASE)")
    .bind(name)
    .fetch_one(pool)
    .await?;
  Ok(found != 0)
}

#[instrument(name = "db::insert_category", skip(pool, category), fields(category_name = %category.name))]
pub async fn insert_category(pool: &SqlitePool, category: &NewCategory) -> Result<Category, sqlx::Error> {
  let result = sqlx::query("INSERT INTO categories (name, image, created_at) VALUES (?, ?, ?)")
    .bind(&category.name)
    .bind(&category.image)
    .bind(Utc::now())
    .execute(pool)
    .await?;

  sqlx::query_as::<_, Category>("SELECT id, name, image, created_at FROM categories WHERE id = ?")
    .bind(result.last_insert_rowid())
    .fetch_one(pool)
    .await
}

pub async fn count_categories(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
  sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
    .fetch_one(pool)
    .await
}
