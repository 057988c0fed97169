// core/src/checkout/mod.rs

pub mod checkout_pipeline;
pub mod contexts;
pub mod history_pipeline;
pub mod orchestrator;

pub use contexts::{CheckoutCtxData, OrderHistoryCtxData};
pub use orchestrator::CheckoutOrchestrator;
