// core/src/flow/registry.rs

//! `Flows<E>`: a registry holding at most one pipeline per context data type.
//! Callers run a pipeline by handing over a `ContextData<TData>`, and the
//! registry dispatches on `TypeId::of::<TData>()`.

use super::context_data::ContextData;
use super::control::PipelineResult;
use super::pipeline::Pipeline;
use crate::error::{FlowError, ShopError};

use async_trait::async_trait;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{event, instrument, Level};

#[async_trait]
trait ErasedPipeline<E>: Send + Sync
where
  E: std::error::Error + Send + Sync + 'static,
{
  /// `ctx_obj` must box a `ContextData<TData>` for the wrapped pipeline's `TData`.
  async fn run_erased(&self, ctx_obj: Box<dyn Any + Send>) -> Result<PipelineResult, E>;
}

struct RegisteredPipeline<TData, PErr, E>
where
  TData: 'static + Send + Sync,
  PErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pipeline: Pipeline<TData, PErr>,
  _phantom_app_err: PhantomData<fn() -> E>,
}

#[async_trait]
impl<TData, PErr, E> ErasedPipeline<E> for RegisteredPipeline<TData, PErr, E>
where
  TData: 'static + Send + Sync,
  PErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
  E: std::error::Error + From<PErr> + From<FlowError> + Send + Sync + 'static,
{
  async fn run_erased(&self, ctx_obj: Box<dyn Any + Send>) -> Result<PipelineResult, E> {
    let typed_ctx = match ctx_obj.downcast::<ContextData<TData>>() {
      Ok(boxed) => *boxed,
      Err(_) => {
        let expected_type = std::any::type_name::<ContextData<TData>>();
        event!(Level::ERROR, expected_type, "Context object type mismatch.");
        return Err(E::from(FlowError::TypeMismatch { expected_type }));
      }
    };
    self.pipeline.run(typed_ctx).await.map_err(E::from)
  }
}

pub struct Flows<E = ShopError>
where
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  registry: RwLock<HashMap<TypeId, Arc<dyn ErasedPipeline<E>>>>,
}

impl<E> Default for Flows<E>
where
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<E> Flows<E>
where
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub fn new() -> Self {
    Self {
      registry: RwLock::new(HashMap::new()),
    }
  }

  /// Registers `pipeline` for its context type. A later registration for the
  /// same `TData` replaces the earlier one.
  pub fn register_pipeline<TData, PErr>(&self, pipeline: Pipeline<TData, PErr>)
  where
    TData: 'static + Send + Sync,
    PErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
    E: From<PErr>,
  {
    event!(
      Level::DEBUG,
      context_type = %std::any::type_name::<TData>(),
      steps = ?pipeline.step_names(),
      "Registering pipeline."
    );
    let entry: Arc<dyn ErasedPipeline<E>> = Arc::new(RegisteredPipeline::<TData, PErr, E> {
      pipeline,
      _phantom_app_err: PhantomData,
    });
    let replaced = self.registry.write().insert(TypeId::of::<TData>(), entry);
    if replaced.is_some() {
      event!(Level::WARN, context_type = %std::any::type_name::<TData>(), "Replaced an existing pipeline.");
    }
  }

  pub fn is_registered<TData: 'static + Send + Sync>(&self) -> bool {
    self.registry.read().contains_key(&TypeId::of::<TData>())
  }

  /// Runs the pipeline registered for `TData`. The caller keeps its own clone of
  /// `ctx_data` to read results back once the run finishes.
  #[instrument(name = "Flows::run", skip_all, fields(context_type = %std::any::type_name::<TData>()))]
  pub async fn run<TData>(&self, ctx_data: ContextData<TData>) -> Result<PipelineResult, E>
  where
    TData: 'static + Send + Sync,
  {
    let runner = {
      let registry = self.registry.read();
      registry.get(&TypeId::of::<TData>()).cloned()
    };
    let runner = runner.ok_or_else(|| {
      let type_name = std::any::type_name::<TData>();
      event!(Level::ERROR, type_name, "No pipeline registered.");
      E::from(FlowError::NotRegistered { type_name })
    })?;

    runner.run_erased(Box::new(ctx_data)).await
  }
}
