// app/src/state.rs

use crate::services::token_service::TokenService;
use std::sync::Arc;
use storefront_core::store::{ProductStore, UserStore};
use storefront_core::{CheckoutOrchestrator, Flows};

#[derive(Clone)]
pub struct AppState {
  pub flows: Arc<Flows>,
  pub orchestrator: CheckoutOrchestrator,
  pub products: Arc<dyn ProductStore>,
  pub users: Arc<dyn UserStore>,
  pub tokens: TokenService,
}
