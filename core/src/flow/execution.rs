// core/src/flow/execution.rs

use super::context_data::ContextData;
use super::control::{PipelineControl, PipelineResult};
use super::pipeline::Pipeline;
use super::step::Handler;
use crate::error::FlowError;
use tracing::{event, instrument, span, Instrument, Level};

enum PhaseOutcome {
  Continue,
  Stopped,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Runs every step in declaration order against `ctx_data`.
  ///
  /// The first handler error aborts the run and is returned unchanged. A non-optional
  /// step without handlers yields `FlowError::HandlerMissing`.
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
      let on_handlers = self.on.get(step_name).filter(|v| !v.is_empty());
      let after_handlers = self.after.get(step_name).filter(|v| !v.is_empty());

      let step_span = span!(
        Level::INFO,
        "pipeline_step_execution",
        step_name = step_name,
        step_index = step_idx,
        optional = step_def.optional
      );

      if on_handlers.is_none() {
        if step_def.optional {
          event!(parent: &step_span, Level::DEBUG, "Optional step has no handlers, skipping.");
          continue;
        }
        event!(parent: &step_span, Level::ERROR, "Non-optional step has no 'on' handlers.");
        return Err(Err::from(FlowError::HandlerMissing {
          step_name: step_def.name.clone(),
        }));
      }

      let outcome = async {
        if let Some(handlers) = on_handlers {
          if let PhaseOutcome::Stopped = Self::run_phase("on", handlers, &ctx_data).await? {
            return Ok(PhaseOutcome::Stopped);
          }
        }
        if let Some(handlers) = after_handlers {
          if let PhaseOutcome::Stopped = Self::run_phase("after", handlers, &ctx_data).await? {
            return Ok(PhaseOutcome::Stopped);
          }
        }
        Ok::<_, Err>(PhaseOutcome::Continue)
      }
      .instrument(step_span)
      .await?;

      if let PhaseOutcome::Stopped = outcome {
        return Ok(PipelineResult::Stopped);
      }
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
      let handler_span = span!(Level::DEBUG, "step_handler", phase, handler_index = handler_idx);
      match handler_fn(ctx_data.clone()).instrument(handler_span).await {
        Ok(PipelineControl::Continue) => {}
        Ok(PipelineControl::Stop) => {
          event!(Level::INFO, phase, "Pipeline stopped by a handler.");
          return Ok(PhaseOutcome::Stopped);
        }
        Err(e) => {
          event!(Level::WARN, phase, error = %e, "Step handler failed.");
          return Err(e);
        }
      }
    }
    Ok(PhaseOutcome::Continue)
  }
}
