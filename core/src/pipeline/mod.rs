// core/src/pipeline/mod.rs

//! `Pipeline<TData, Err>`: step layout, handler registration and execution.

pub mod definition;
pub mod execution;
pub mod hooks;

pub use definition::Pipeline;
