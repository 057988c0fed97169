// core/src/lib.rs

//! Storefront core: checkout orchestration and order history on top of a small
//! async step-pipeline engine.
//!
//!  - `flow`: named steps with on/after hooks, early stop, and a registry keyed by context type.
//!  - `checkout`: the checkout and order-history pipelines and `CheckoutOrchestrator`.
//!  - `store`: storage traits, the history row fold, and an in-memory store.
//!  - `models`: products, carts, orders and users as they cross the HTTP boundary.

pub mod checkout;
pub mod error;
pub mod flow;
pub mod models;
pub mod store;

pub use crate::checkout::CheckoutOrchestrator;
pub use crate::error::{FlowError, ShopError, ShopResult};
pub use crate::flow::{ContextData, Flows, Pipeline, PipelineControl, PipelineResult};
