// apps/storefront_api/src/web/extractors.rs

//! Extractor configs that turn actix's own rejections into `AppError::Validation`,
//! so malformed bodies, query strings and path ids get the usual `{"error": ...}` 400.

use actix_web::web;

use crate::errors::AppError;

pub fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req| {
    AppError::Validation(format!("Invalid JSON body: {}", err)).into()
  })
}

pub fn query_config() -> web::QueryConfig {
  web::QueryConfig::default().error_handler(|err, _req| {
    AppError::Validation(format!("Invalid query string: {}", err)).into()
  })
}

pub fn path_config() -> web::PathConfig {
  web::PathConfig::default().error_handler(|err, _req| {
    AppError::Validation(format!("Invalid path parameter: {}", err)).into()
  })
}
