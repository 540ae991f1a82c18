// apps/storefront_api/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
  #[default]
  Pretty,
  Json,
}

impl FromStr for LogFormat {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "pretty" | "text" => Ok(LogFormat::Pretty),
      "json" => Ok(LogFormat::Json),
      other => Err(AppError::Config(format!("Invalid LOG_FORMAT '{}', expected 'pretty' or 'json'", other))),
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub db_max_connections: u32,
  /// Load the fixture catalog at startup.
  pub seed_db: bool,
  pub log_format: LogFormat,
}

impl AppConfig {
  /// Reads the process environment, after loading `.env` if one is present.
  pub fn from_env() -> Result<Self> {
    dotenv().ok();
    Self::from_lookup(|var_name| env::var(var_name).ok())
  }

  /// Builds the config from any key/value source; unset keys take their defaults.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_or = |var_name: &str, default: &str| lookup(var_name).unwrap_or_else(|| default.to_string());

    let server_host = get_or("SERVER_HOST", "127.0.0.1");
    let server_port = parse_var("SERVER_PORT", &get_or("SERVER_PORT", "8080"))?;
    let database_url = get_or("DATABASE_URL", "sqlite::memory:");
    if database_url.trim().is_empty() {
      return Err(AppError::Config("DATABASE_URL must not be empty".to_string()));
    }
    let db_max_connections: u32 = parse_var("DB_MAX_CONNECTIONS", &get_or("DB_MAX_CONNECTIONS", "5"))?;
    if db_max_connections == 0 {
      return Err(AppError::Config("DB_MAX_CONNECTIONS must be at least 1".to_string()));
    }
    let seed_db = parse_var("SEED_DB", &get_or("SEED_DB", "false"))?;
    let log_format = get_or("LOG_FORMAT", "pretty").parse()?;

    Ok(Self {
      server_host,
      server_port,
      database_url,
      db_max_connections,
      seed_db,
      log_format,
    })
  }

  pub fn server_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

fn parse_var<T>(var_name: &str, raw: &str) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  raw
    .trim()
    .parse::<T>()
    .map_err(|e| AppError::Config(format!("Invalid {}: {}", var_name, e)))
}
