// apps/storefront_api/src/db/products.rs

use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, instrument};

use crate::models::{Category, NewProduct, Product, ProductChanges, ProductWithCategory};

const PRODUCT_WITH_CATEGORY_SELECT: &str = "SELECT p.id, p.name, p.price, p.description, p.image, p.category_id, \
   p.created_at, c.name AS category_name, c.image AS category_image, c.created_at AS category_created_at \
   FROM products p INNER JOIN categories c ON c.id = p.category_id";

const PRODUCT_COLUMNS: &str = "id, name, price, description, image, category_id, created_at";

/// Listing filters. `None` means "not constrained".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductFilter {
  pub limit: Option<u32>,
  pub offset: Option<u32>,
  pub price: Option<i64>,
  pub price_min: Option<i64>,
  pub price_max: Option<i64>,
}

#[derive(FromRow)]
struct ProductCategoryRow {
  id: i64,
  name: String,
  price: i64,
  description: String,
  image: String,
  category_id: i64,
  created_at: DateTime<Utc>,
  category_name: String,
  category_image: String,
  category_created_at: DateTime<Utc>,
}

impl From<ProductCategoryRow> for ProductWithCategory {
  fn from(row: ProductCategoryRow) -> Self {
    ProductWithCategory {
      category: Category {
        id: row.category_id,
        name: row.category_name,
        image: row.category_image,
        created_at: row.category_created_at,
      },
      product: Product {
        id: row.id,
        name: row.name,
        price: row.price,
        description: row.description,
        image: row.image,
        category_id: row.category_id,
        created_at: row.created_at,
      },
    }
  }
}

/// Products in insertion order, each joined with its category.
#[instrument(name = "db::list_products", skip(pool))]
pub async fn list_products(pool: &SqlitePool, filter: &ProductFilter) -> Result<Vec<ProductWithCategory>, sqlx::Error> {
  let mut qb = QueryBuilder::<Sqlite>::new(PRODUCT_WITH_CATEGORY_SELECT);
  if filter.price.is_some() || filter.price_min.is_some() || filter.price_max.is_some() {
    qb.push(" WHERE ");
    let mut conditions = qb.separated(" AND ");
    if let Some(price) = filter.price {
      conditions.push("p.price = ").push_bind_unseparated(price);
    }
    if let Some(min) = filter.price_min {
      conditions.push("p.price >= ").push_bind_unseparated(min);
    }
    if let Some(max) = filter.price_max {
      conditions.push("p.price <= ").push_bind_unseparated(max);
    }
  }
  qb.push(" ORDER BY p.id ASC");

  // SQLite only accepts OFFSET after a LIMIT; -1 means unbounded.
  match (filter.limit, filter.offset) {
    (Some(limit), offset) => {
      qb.push(" LIMIT ").push_bind(i64::from(limit));
      if let Some(offset) = offset {
        qb.push(" OFFSET ").push_bind(i64::from(offset));
      }
    }
    (None, Some(offset)) => {
      qb.push(" LIMIT -1 OFFSET ").push_bind(i64::from(offset));
    }
    (None, None) => {}
  }

  let rows = qb.build_query_as::<ProductCategoryRow>().fetch_all(pool).await?;
  debug!(count = rows.len(), "Fetched product rows.");
  Ok(rows.into_iter().map(ProductWithCategory::from).collect())
}

#[instrument(name = "db::find_product_by_id", skip(pool))]
pub async fn find_product_by_id(pool: &SqlitePool, product_id: i64) -> Result<Option<ProductWithCategory>, sqlx::Error> {
  let sql = format!("{} WHERE p.id = ?", PRODUCT_WITH_CATEGORY_SELECT);
  let row = sqlx::query_as::<_, ProductCategoryRow>(&sql)
    .bind(product_id)
    .fetch_optional(pool)
    .await?;
  Ok(row.map(ProductWithCategory::from))
}

pub async fn products_in_category(pool: &SqlitePool, category_id: i64) -> Result<Vec<Product>, sqlx::Error> {
  let sql = format!(
    "SELECT {} FROM products WHERE category_id = ? ORDER BY id ASC",
    PRODUCT_COLUMNS
  );
  sqlx::query_as::<_, Product>(&sql).bind(category_id).fetch_all(pool).await
}

pub async fn count_products(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
  sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
    .fetch_one(pool)
    .await
}

/// Inserts the row and returns its new id.
#[instrument(name = "db::insert_product", skip(pool, product), fields(product_name = %product.name))]
pub async fn insert_product(pool: &SqlitePool, product: &NewProduct) -> Result<i64, sqlx::Error> {
  let result = sqlx::query(
    "INSERT INTO products (name, price, description, image, category_id, created_at) VALUES (?, ?, ?, ?, ?, ?)",
  )
  .bind(&product.name)
  .bind(product.price)
  .bind(&product.description)
  .bind(&product.image)
  .bind(product.category_id)
  .bind(Utc::now())
  .execute(pool)
  .await?;
  Ok(result.last_insert_rowid())
}

/// Overwrites the columns present in `changes`, which must not be empty.
/// Returns `false` when no row has `product_id`.
#[instrument(name = "db::update_product", skip(pool, changes))]
pub async fn update_product(pool: &SqlitePool, product_id: i64, changes: &ProductChanges) -> Result<bool, sqlx::Error> {
  let mut qb = QueryBuilder::<Sqlite>::new("UPDATE products SET ");
  {
    let mut assignments = qb.separated(", ");
    if let Some(name) = &changes.name {
      assignments.push("name = ").push_bind_unseparated(name.clone());
    }
    if let Some(price) = changes.price {
      assignments.push("price = ").push_bind_unseparated(price);
    }
    if let Some(description) = &changes.description {
      assignments.push("description = ").push_bind_unseparated(description.clone());
    }
    if let Some(image) = &changes.image {
      assignments.push("image = ").push_bind_unseparated(image.clone());
    }
    if let Some(category_id) = changes.category_id {
      assignments.push("category_id = ").push_bind_unseparated(category_id);
    }
  }
  qb.push(" WHERE id = ").push_bind(product_id);

  let result = qb.build().execute(pool).await?;
  Ok(result.rows_affected() > 0)
}

/// Returns `false` when there was nothing to delete.
#[instrument(name = "db::delete_product", skip(pool))]
pub async fn delete_product(pool: &SqlitePool, product_id: i64) -> Result<bool, sqlx::Error> {
  let result = sqlx::query("DELETE FROM products WHERE id = ?")
    .bind(product_id)
    .execute(pool)
    .await?;
  Ok(result.rows_affected() > 0)
}
