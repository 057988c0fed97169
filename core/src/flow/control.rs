// core/src/flow/control.rs

/// Returned by every step handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  Continue,
  /// Halt the run. No later handler, in this step or any other, is invoked.
  Stop,
}

/// How a pipeline run ended when no handler failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
  Completed,
  Stopped,
}
