// apps/storefront_api/src/lib.rs

//! Product catalog HTTP service: products and categories over a SQLite store,
//! with writes running as `storefront_flow` pipelines.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod pipelines;
pub mod startup;
pub mod state;
pub mod telemetry;
pub mod web;
