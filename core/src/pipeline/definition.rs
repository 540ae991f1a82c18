// core/src/pipeline/definition.rs

//! The `Pipeline<TData, Err>` struct and its step layout.

use crate::core::context::Handler;
use crate::core::step::{SkipCondition, StepDef};
use crate::error::FlowError;
use std::collections::HashMap;

/// An ordered set of named steps over the data type `TData`.
///
/// Handlers fail with `Err`, which must be able to carry the engine's own
/// `FlowError` (e.g. a non-optional step left without handlers).
pub struct Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub(crate) steps: Vec<StepDef<TData>>,

  pub(crate) before: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) after: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Creates a pipeline from `(name, optional, skip_if)` tuples, in run order.
  pub fn new(step_defs: &[(&str, bool, Option<SkipCondition<TData>>)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(name, optional, skip_if)| StepDef {
        name: (*name).to_string(),
        optional: *optional,
        skip_if: skip_if.clone(),
      })
      .collect();

    Self {
      steps,
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  pub fn has_step(&self, step_name: &str) -> bool {
    self.steps.iter().any(|s| s.name == step_name)
  }

  /// # Panics
  ///
  /// Panics when `step_name` is not part of the pipeline. Registering against
  /// an unknown step is a wiring mistake, not a runtime condition.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) {
    if !self.has_step(step_name) {
      panic!("Pipeline setup error: step '{}' is not defined.", step_name);
    }
  }

  /// Appends a step at the end of the pipeline.
  ///
  /// # Panics
  ///
  /// Panics when a step with the same name already exists.
  pub fn push_step<S: Into<String>>(&mut self, step_name: S, optional: bool, skip_if: Option<SkipCondition<TData>>) {
    let name: String = step_name.into();
    if self.has_step(&name) {
      panic!("Pipeline setup error: step '{}' is already defined.", name);
    }
    self.steps.push(StepDef { name, optional, skip_if });
  }

  fn step_mut(&mut self, step_name: &str) -> Result<&mut StepDef<TData>, FlowError> {
    self
      .steps
      .iter_mut()
      .find(|s| s.name == step_name)
      .ok_or_else(|| FlowError::StepNotFound {
        step_name: step_name.to_string(),
      })
  }

  /// Fails with `FlowError::StepNotFound` when `step_name` is not in the layout.
  pub fn set_optional(&mut self, step_name: &str, optional: bool) -> Result<(), FlowError> {
    self.step_mut(step_name)?.optional = optional;
    Ok(())
  }

  pub fn set_skip_condition(&mut self, step_name: &str, skip_if: Option<SkipCondition<TData>>) -> Result<(), FlowError> {
    self.step_mut(step_name)?.skip_if = skip_if;
    Ok(())
  }
}
