// app/src/pipelines/mod.rs

//! Account pipelines. Checkout and order history are registered by
//! `CheckoutOrchestrator` itself.

pub mod contexts;
pub mod signin_pipeline;
pub mod signup_pipeline;

use storefront_core::Flows;

pub fn register_all_pipelines(flows: &Flows) {
  signup_pipeline::register_signup_pipeline(flows);
  signin_pipeline::register_signin_pipeline(flows);
  tracing::info!("Account pipelines registered.");
}
