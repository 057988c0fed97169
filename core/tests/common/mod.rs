// tests/common/mod.rs
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use storefront_core::models::{CartItem, CheckoutRequest, Product};
use storefront_core::store::InMemoryStore;
use storefront_core::{CheckoutOrchestrator, ContextData, Flows, PipelineControl, ShopError};
use tracing::Level;

// --- Tracing ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Catalog fixtures ---
pub fn at(secs: i64) -> DateTime<Utc> {
  Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
}

pub fn product(id: i64, price: Decimal, quantity: i32) -> Product {
  Product {
    id,
    name: format!("Product {}", id),
    description: format!("Description of product {}", id),
    image: format!("https://img.example.com/{}.png", id),
    price,
    quantity,
    created_at: at(1_700_000_000),
  }
}

pub fn cart(items: &[(i64, i32)], address: &str) -> CheckoutRequest {
  CheckoutRequest {
    items: items
      .iter()
      .map(|&(product_id, quantity)| CartItem { product_id, quantity })
      .collect(),
    address: address.to_string(),
  }
}

/// An orchestrator wired to a single in-memory store playing every storage role.
pub struct Harness {
  pub store: Arc<InMemoryStore>,
  pub flows: Arc<Flows>,
  pub orchestrator: CheckoutOrchestrator,
}

pub fn harness(products: Vec<Product>) -> Harness {
  let store = Arc::new(InMemoryStore::with_products(products));
  let flows = Arc::new(Flows::new());
  let orchestrator = CheckoutOrchestrator::new(flows.clone(), store.clone(), store.clone(), store.clone());
  Harness {
    store,
    flows,
    orchestrator,
  }
}

// --- Pipeline test context ---
#[derive(Clone, Debug, Default)]
pub struct TraceCtx {
  pub steps_executed: Vec<String>,
  pub stop_at: Option<String>,
}

pub static HANDLER_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  HANDLER_EXEC_COUNTER.store(0, Ordering::SeqCst);
}

pub type BoxedStep = std::pin::Pin<Box<dyn std::future::Future<Output = Result<PipelineControl, ShopError>> + Send>>;

pub fn recording_handler(
  step_name: &'static str,
) -> impl Fn(ContextData<TraceCtx>) -> BoxedStep + Send + Sync + 'static {
  move |ctx: ContextData<TraceCtx>| -> BoxedStep {
    Box::pin(async move {
      HANDLER_EXEC_COUNTER.fetch_add(1, Ordering::SeqCst);
      let mut guard = ctx.write();
      guard.steps_executed.push(step_name.to_string());
      if guard.stop_at.as_deref() == Some(step_name) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  }
}
