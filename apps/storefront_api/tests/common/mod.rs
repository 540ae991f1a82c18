// apps/storefront_api/tests/common/mod.rs
#![allow(dead_code, unused_macros)]

use storefront_api::config::AppConfig;
use storefront_api::db;
use storefront_api::startup;
use storefront_api::state::AppState;

pub const PRODUCT_IMAGE: &str = "https://api.lorem.space/image/game?w=150&h=220";

/// Defaults only: in-memory SQLite, no startup seeding.
pub fn test_config() -> AppConfig {
  AppConfig::from_lookup(|_| None).expect("default config should be valid")
}

/// Fresh in-memory store with schema, pipelines and the fixture catalog.
/// Every call gets its own database.
pub async fn seeded_state() -> AppState {
  let state = startup::build_state(test_config())
    .await
    .expect("application state should build");
  db::seed::up_seed(&state.db_pool).await.expect("fixtures should load");
  state
}

/// Builds the in-process service for `$state`, mounted exactly like the real server.
macro_rules! init_app {
  ($state:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($state.clone()))
        .configure(storefront_api::web::configure_app_routes),
    )
    .await
  };
}
