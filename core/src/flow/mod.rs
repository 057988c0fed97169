// core/src/flow/mod.rs

//! A small async step-pipeline engine. Each request builds a `ContextData<T>`,
//! hands it to the `Flows` registry, and the pipeline registered for `T` runs
//! its named steps in order against that shared context.

pub mod context_data;
pub mod control;
pub mod execution;
pub mod pipeline;
pub mod registry;
pub mod step;

pub use context_data::ContextData;
pub use control::{PipelineControl, PipelineResult};
pub use pipeline::Pipeline;
pub use registry::Flows;
pub use step::{Handler, StepDef};
