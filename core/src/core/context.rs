// core/src/core/context.rs

//! The boxed handler type stored for every step phase.

use crate::core::context_data::ContextData;
use crate::core::control::PipelineControl;
use std::future::Future;
use std::pin::Pin;

/// A step handler.
///
/// Receives a clone of the run's `ContextData<TData>` and resolves to the
/// control signal for the pipeline. Lock guards taken inside a handler must be
/// dropped before the next `.await`.
pub type Handler<TData, Err> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<PipelineControl, Err>> + Send>>
    + Send
    + Sync,
>;
