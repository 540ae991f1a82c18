// apps/storefront_api/src/web/routes.rs

use actix_web::web;

use crate::web::extractors::{json_config, path_config, query_config};
use crate::web::handlers::{category_handlers, health_handlers, product_handlers};

/// Mounts every API route under `/api/v1`. Used by the server and by the
/// in-process test service alike.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(json_config())
    .app_data(query_config())
    .app_data(path_config())
    .service(
      web::scope("/api/v1")
        .route("/health", web::get().to(health_handlers::health_check_handler))
        .service(
          web::scope("/products")
            .route("", web::get().to(product_handlers::list_products_handler))
            .route("", web::post().to(product_handlers::create_product_handler))
            .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
            .route("/{product_id}", web::patch().to(product_handlers::update_product_handler))
            .route("/{product_id}", web::delete().to(product_handlers::delete_product_handler)),
        )
        .service(
          web::scope("/categories")
            .route("", web::get().to(category_handlers::list_categories_handler))
            .route("", web::post().to(category_handlers::create_category_handler))
            .route("/{category_id}", web::get().to(category_handlers::get_category_handler)),
        ),
    );
}
