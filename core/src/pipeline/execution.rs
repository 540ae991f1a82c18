// core/src/pipeline/execution.rs

//! `Pipeline::run()`: walks the steps and drives their handlers.

use crate::core::context::Handler;
use crate::core::context_data::ContextData;
use crate::core::control::{PipelineControl, PipelineResult};
use crate::error::FlowError;
use crate::pipeline::definition::Pipeline;
use tracing::{event, instrument, Instrument, Level};

/// What a phase ended with.
enum PhaseOutcome {
  Finished,
  Stopped,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Runs every step in order against `ctx_data`.
  ///
  /// For each step the `before`, `on` and `after` handlers run in that order.
  /// A step whose skip condition holds is passed over. An optional step with
  /// no handlers is passed over; a non-optional one fails the run with
  /// `FlowError::HandlerMissing`. The first handler error is returned as is.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(
      context_type = %std::any::type_name::<TData>(),
      num_steps = self.steps.len(),
    ),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<PipelineResult, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();
      let step_span = tracing::info_span!(
        "pipeline_step",
        step_name = step_name,
        step_index = step_idx,
        optional = step_def.optional
      );

      if step_def.should_skip(&ctx_data) {
        step_span.in_scope(|| event!(Level::INFO, "Step skipped by its skip condition."));
        continue;
      }

      let before = self.before.get(step_name).map(Vec::as_slice).unwrap_or_default();
      let on = self.on.get(step_name).map(Vec::as_slice).unwrap_or_default();
      let after = self.after.get(step_name).map(Vec::as_slice).unwrap_or_default();

      if before.is_empty() && on.is_empty() && after.is_empty() {
        if step_def.optional {
          step_span.in_scope(|| event!(Level::DEBUG, "Optional step has no handlers, skipping."));
          continue;
        }
        step_span.in_scope(|| event!(Level::ERROR, "Non-optional step has no handlers."));
        return Err(Err::from(FlowError::HandlerMissing {
          step_name: step_def.name.clone(),
        }));
      }

      for (phase, handlers) in [("before", before), ("on", on), ("after", after)] {
        let outcome = Self::run_phase(phase, handlers, &ctx_data)
          .instrument(step_span.clone())
          .await?;
        if let PhaseOutcome::Stopped = outcome {
          return Ok(PipelineResult::Stopped);
        }
      }

      step_span.in_scope(|| event!(Level::DEBUG, "Step finished."));
    }

    event!(Level::DEBUG, "Pipeline execution completed.");
    Ok(PipelineResult::Completed)
  }

  async fn run_phase(
    phase: &'static str,
    handlers: &[Handler<TData, Err>],
    ctx_data: &ContextData<TData>,
  ) -> Result<PhaseOutcome, Err> {
    for (handler_idx, handler_fn) in handlers.iter().enumerate() {
      let handler_span = tracing::debug_span!("step_handler", phase, handler_index = handler_idx);
      match handler_fn(ctx_data.clone()).instrument(handler_span).await {
        Ok(PipelineControl::Continue) => {}
        Ok(PipelineControl::Stop) => {
          event!(Level::INFO, phase, "Pipeline stopped by a handler.");
          return Ok(PhaseOutcome::Stopped);
        }
        Err(e) => {
          event!(Level::ERROR, phase, error = %e, "Handler failed.");
          return Err(e);
        }
      }
    }
    Ok(PhaseOutcome::Finished)
  }
}
