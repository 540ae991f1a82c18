// apps/storefront_api/src/web/handlers/mod.rs

pub mod category_handlers;
pub mod health_handlers;
pub mod product_handlers;
