// apps/storefront_api/src/db/mod.rs

//! SQLite access: pool setup, schema and the per-entity queries.

pub mod categories;
pub mod products;
pub mod seed;

use crate::config::AppConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument};

const SCHEMA: &[&str] = &[
  r#"
  CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE COLLATE NOCASE,
    image TEXT NOT NULL,
    created_at TEXT NOT NULL
  )
  "#,
  r#"
  CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    price INTEGER NOT NULL,
    description TEXT NOT NULL,
    image TEXT NOT NULL,
    category_id INTEGER NOT NULL REFERENCES categories(id) ON UPDATE CASCADE ON DELETE CASCADE,
    created_at TEXT NOT NULL
  )
  "#,
  "CREATE INDEX IF NOT EXISTS idx_products_category ON products(category_id)",
];

/// In-memory databases live and die with their connection.
pub fn is_in_memory(database_url: &str) -> bool {
  database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Opens the pool described by `config`.
///
/// An in-memory URL gets exactly one connection that is never closed, so
/// every query sees the same database. Should that connection still be lost,
/// its replacement starts from an empty database; the schema is reapplied
/// on connect but rows (fixtures included) are gone.
#[instrument(name = "db::connect", skip(config), fields(database_url = %config.database_url))]
pub async fn connect(config: &AppConfig) -> Result<SqlitePool, sqlx::Error> {
  let options = SqliteConnectOptions::from_str(&config.database_url)?
    .create_if_missing(true)
    .foreign_keys(true);

  let pool_options = if is_in_memory(&config.database_url) {
    SqlitePoolOptions::new()
      .max_connections(1)
      .min_connections(1)
      .idle_timeout(None::<Duration>)
      .max_lifetime(None::<Duration>)
      .after_connect(|conn, _meta| {
        Box::pin(async move {
          for statement in SCHEMA {
            sqlx::query(statement).execute(&mut *conn).await?;
          }
          Ok(())
        })
      })
  } else {
    SqlitePoolOptions::new().max_connections(config.db_max_connections)
  };

  let pool = pool_options.connect_with(options).await?;
  info!("Successfully connected to the database.");
  Ok(pool)
}

/// Creates tables and indexes that do not exist yet.
#[instrument(name = "db::initialize_schema", skip(pool))]
pub async fn initialize_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
  let mut tx = pool.begin().await?;
  for statement in SCHEMA {
    sqlx::query(statement).execute(&mut *tx).await?;
  }
  tx.commit().await?;
  info!("Database schema ready.");
  Ok(())
}

pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
  sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(pool).await?;
  Ok(())
}
