// apps/storefront_api/src/startup.rs

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use storefront_flow::FlowRegistry;
use tracing::{info, instrument};

use crate::config::AppConfig;
use crate::db;
use crate::errors::{AppError, Result as AppResult};
use crate::pipelines;
use crate::state::AppState;
use crate::web::configure_app_routes;

/// Connects the store, prepares the schema (and fixtures when `SEED_DB` is
/// set) and registers the write pipelines.
#[instrument(name = "startup::build_state", skip(config))]
pub async fn build_state(config: AppConfig) -> AppResult<AppState> {
  let db_pool = db::connect(&config).await?;
  db::initialize_schema(&db_pool).await?;

  if config.seed_db {
    db::seed::up_seed(&db_pool).await?;
    info!("Database seeded with fixture catalog.");
  }

  let flows = Arc::new(FlowRegistry::<AppError>::new());
  let app_state = AppState {
    db_pool,
    flows: flows.clone(),
    config: Arc::new(config),
  };
  pipelines::register_all_pipelines(&flows, &app_state);

  Ok(app_state)
}

/// Starts serving on an already bound listener. The returned server must be awaited or spawned.
pub fn run(listener: TcpListener, app_state: AppState) -> std::io::Result<Server> {
  let address = listener.local_addr()?;
  info!("Serving catalog API on http://{}", address);

  let server = HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .listen(listener)?
  .run();

  Ok(server)
}
