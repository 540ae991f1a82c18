// core/src/lib.rs

//! Step pipelines for the storefront's write workflows.
//!
//! A [`Pipeline`] is an ordered list of named steps. Each step can carry
//! `before`, `on` and `after` async handlers that all receive the same shared
//! [`ContextData`]. Handlers return [`PipelineControl::Continue`] to move on or
//! [`PipelineControl::Stop`] to halt; any error aborts the run and is returned
//! to the caller unchanged.
//!
//! Pipelines are registered in a [`FlowRegistry`], keyed by the type of the
//! data they operate on, so request handlers only need to build the context
//! and call `registry.run(ctx)`.

pub mod core;
pub mod error;
pub mod pipeline;
pub mod registry;

pub use crate::core::context::Handler;
pub use crate::core::context_data::ContextData;
pub use crate::core::control::{PipelineControl, PipelineResult};
pub use crate::core::step::{SkipCondition, StepDef};

pub use crate::pipeline::definition::Pipeline;

pub use crate::error::{FlowError, FlowResult};

pub use crate::registry::FlowRegistry;
