// tests/common/mod.rs
#![allow(dead_code)]

use once_cell::sync::Lazy;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use storefront_flow::{ContextData, FlowError, Handler, PipelineControl};
use tracing::Level;

/// Records what the handlers did so tests can assert on order and effects.
#[derive(Clone, Debug, Default)]
pub struct TraceContext {
  pub counter: i32,
  pub log: String,
  pub visited: Vec<String>,
  pub stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  /// Engine errors, kept as their `Debug` text so the enum stays `Eq`.
  #[error("Flow error: {0}")]
  Flow(String),

  #[error("Handler failed: {0}")]
  Handler(String),
}

impl From<FlowError> for TestError {
  fn from(fe: FlowError) -> Self {
    TestError::Flow(format!("{:?}", fe))
  }
}

/// Appends `fragment` to the log and records `label`; stops when `stop_at == label`.
pub fn recording_handler(label: &'static str, fragment: &'static str) -> Handler<TraceContext, TestError> {
  Box::new(move |ctx: ContextData<TraceContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.log.push_str(fragment);
      guard.visited.push(label.to_string());
      tracing::debug!(target: "test_handlers", label, counter = guard.counter, "recorded");
      if guard.stop_at.as_deref() == Some(label) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  })
}

pub fn failing_handler(label: &'static str, message: &'static str) -> Handler<TraceContext, TestError> {
  Box::new(move |ctx: ContextData<TraceContext>| {
    Box::pin(async move {
      ctx.write().visited.push(label.to_string());
      Err(TestError::Handler(message.to_string()))
    })
  })
}

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub static HANDLER_CALLS: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  HANDLER_CALLS.store(0, Ordering::SeqCst);
}
