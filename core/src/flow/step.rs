// core/src/flow/step.rs

use super::context_data::ContextData;
use super::control::PipelineControl;
use std::future::Future;
use std::pin::Pin;

/// A boxed async step handler. It receives a clone of the run's `ContextData`.
pub type Handler<TData, Err> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<PipelineControl, Err>> + Send>>
    + Send
    + Sync,
>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDef {
  pub name: String,
  /// An optional step with no handlers is skipped instead of failing the run.
  pub optional: bool,
}
