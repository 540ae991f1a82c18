// apps/storefront_api/src/db/seed.rs

//! Fixture catalog loaded before test runs (and at startup when `SEED_DB=true`).

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, instrument};

/// `(name, image)`
pub const SEED_CATEGORIES: &[(&str, &str)] = &[
  ("Games", "https://api.lorem.space/image/game?w=640&h=480"),
  ("Clothes", "https://api.lorem.space/image/fashion?w=640&h=480"),
  ("Electronics", "https://api.lorem.space/image/watch?w=640&h=480"),
];

/// `(name, price, description, image, category index into SEED_CATEGORIES)`
pub const SEED_PRODUCTS: &[(&str, i64, &str, &str, usize)] = &[
  (
    "Racing Wheel",
    1899,
    "Force-feedback wheel with pedals.",
    "https://api.lorem.space/image/game?w=150&h=220&r=1",
    0,
  ),
  (
    "Strategy Board Game",
    450,
    "Two to four players, ninety minutes.",
    "https://api.lorem.space/image/game?w=150&h=220&r=2",
    0,
  ),
  (
    "Denim Jacket",
    990,
    "Classic fit, washed blue.",
    "https://api.lorem.space/image/fashion?w=150&h=220&r=3",
    1,
  ),
  (
    "Running Shoes",
    1250,
    "Lightweight trainers for road running.",
    "https://api.lorem.space/image/shoes?w=150&h=220&r=4",
    1,
  ),
  (
    "Smart Watch",
    2999,
    "Heart-rate tracking and GPS.",
    "https://api.lorem.space/image/watch?w=150&h=220&r=5",
    2,
  ),
];

/// Inserts the fixture categories and products in one transaction.
#[instrument(name = "seed::up", skip(pool))]
pub async fn up_seed(pool: &SqlitePool) -> Result<(), sqlx::Error> {
  let now = Utc::now();
  let mut tx = pool.begin().await?;

  let mut category_ids = Vec::with_capacity(SEED_CATEGORIES.len());
  for (name, image) in SEED_CATEGORIES {
    let result = sqlx::query("INSERT INTO categories (name, image, created_at) VALUES (?, ?, ?)")
      .bind(*name)
      .bind(*image)
      .bind(now)
      .execute(&mut *tx)
      .await?;
    category_ids.push(result.last_insert_rowid());
  }

  for (name, price, description, image, category_idx) in SEED_PRODUCTS {
    sqlx::query(
      "INSERT INTO products (name, price, description, image, category_id, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(*name)
    .bind(*price)
    .bind(*description)
    .bind(*image)
    .bind(category_ids[*category_idx])
    .bind(now)
    .execute(&mut *tx)
    .await?;
  }

  tx.commit().await?;
  info!(
    categories = SEED_CATEGORIES.len(),
    products = SEED_PRODUCTS.len(),
    "Fixture data seeded."
  );
  Ok(())
}

/// Removes every product and category and resets the id sequences.
#[instrument(name = "seed::down", skip(pool))]
pub async fn down_seed(pool: &SqlitePool) -> Result<(), sqlx::Error> {
  let mut tx = pool.begin().await?;
  sqlx::query("DELETE FROM products").execute(&mut *tx).await?;
  sqlx::query("DELETE FROM categories").execute(&mut *tx).await?;
  sqlx::query("DELETE FROM sqlite_sequence WHERE name IN ('products', 'categories')")
    .execute(&mut *tx)
    .await?;
  tx.commit().await?;
  info!("Fixture data removed.");
  Ok(())
}
