// apps/storefront_api/src/main.rs

use std::io;
use std::net::TcpListener;

use storefront_api::config::AppConfig;
use storefront_api::{startup, telemetry};

#[actix_web::main]
async fn main() -> io::Result<()> {
  let app_config = AppConfig::from_env().map_err(io::Error::other)?;
  telemetry::init_tracing(app_config.log_format).map_err(io::Error::other)?;

  tracing::info!("Starting storefront catalog server...");

  let server_address = app_config.server_address();
  tracing::info!("Attempting to bind server to {}...", server_address);
  let listener = TcpListener::bind(&server_address)?;

  let app_state = startup::build_state(app_config).await.map_err(|e| {
    tracing::error!(error = %e, "Failed to initialize application state.");
    io::Error::other(e)
  })?;

  startup::run(listener, app_state)?.await
}
