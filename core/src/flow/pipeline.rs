// core/src/flow/pipeline.rs

//! `Pipeline<TData, Err>`: an ordered list of named steps plus the `on` and
//! `after` handlers registered against them.

use super::context_data::ContextData;
use super::control::PipelineControl;
use super::step::{Handler, StepDef};
use crate::error::{FlowError, ShopError};
use std::collections::HashMap;
use std::future::Future;

pub struct Pipeline<TData, Err = ShopError>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub(crate) steps: Vec<StepDef>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) after: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Builds a pipeline from `(step_name, optional)` pairs, run in the given order.
  pub fn new(step_defs: &[(&str, bool)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(name, optional)| StepDef {
        name: (*name).to_string(),
        optional: *optional,
      })
      .collect();

    Self {
      steps,
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  /// # Panics
  /// When `step_name` was not declared in `new`. Handler registration happens at
  /// startup, so a typo here is a wiring bug rather than a runtime condition.
  fn ensure_step_exists(&self, step_name: &str) {
    if !self.steps.iter().any(|s| s.name == step_name) {
      panic!("pipeline setup error: step '{}' is not declared", step_name);
    }
  }

  fn box_handler<F, UserErr>(
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) -> Handler<TData, Err>
  where
    F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    Box::new(move |ctx_data| {
      let user_fut = handler_fn(ctx_data);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    })
  }

  /// Registers the main handler(s) of a step. Several may be registered; they run in order.
  pub fn on_root<F, UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    self
      .on
      .entry(step_name.to_string())
      .or_default()
      .push(Self::box_handler(handler_fn));
  }

  /// Registers a handler that runs once all `on` handlers of the step returned `Continue`.
  pub fn after_root<F, UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    self
      .after
      .entry(step_name.to_string())
      .or_default()
      .push(Self::box_handler(handler_fn));
  }
}
