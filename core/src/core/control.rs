// core/src/core/control.rs

//! Flow signals returned by handlers and the outcome of a whole run.

/// Returned by a handler to say whether the run goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  Continue,
  /// Halt the run. Remaining handlers of this step and all later steps are skipped.
  Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
  /// Every step either ran or was skipped.
  Completed,
  /// A handler returned `PipelineControl::Stop`.
  Stopped,
}
