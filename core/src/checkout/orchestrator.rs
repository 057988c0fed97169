// core/src/checkout/orchestrator.rs

use super::checkout_pipeline::register_checkout_pipeline;
use super::contexts::{CheckoutCtxData, OrderHistoryCtxData};
use super::history_pipeline::register_order_history_pipeline;
use crate::error::{ShopError, ShopResult};
use crate::flow::{ContextData, Flows, PipelineResult};
use crate::models::{CheckoutRequest, Order};
use crate::store::{CatalogReader, OrderReader, OrderWriter};
use std::sync::Arc;
use tracing::{instrument, warn};

/// Entry point for placing orders and reading them back.
///
/// Construction registers the checkout and order-history pipelines on the
/// given registry, so one `Flows` can be shared with the rest of the app.
#[derive(Clone)]
pub struct CheckoutOrchestrator {
  flows: Arc<Flows>,
  catalog: Arc<dyn CatalogReader>,
  writer: Arc<dyn OrderWriter>,
  reader: Arc<dyn OrderReader>,
}

impl CheckoutOrchestrator {
  pub fn new(
    flows: Arc<Flows>,
    catalog: Arc<dyn CatalogReader>,
    writer: Arc<dyn OrderWriter>,
    reader: Arc<dyn OrderReader>,
  ) -> Self {
    register_checkout_pipeline(&flows);
    register_order_history_pipeline(&flows);
    Self {
      flows,
      catalog,
      writer,
      reader,
    }
  }

  /// Validates `request` against the live catalog and persists the resulting order.
  ///
  /// Fails with `Validation` for an empty cart, a blank address, a non-positive
  /// quantity or a line exceeding stock, and with `NotFound` when any product id
  /// is unknown. In all of those cases nothing has been written.
  #[instrument(
    name = "CheckoutOrchestrator::checkout",
    skip(self, request),
    fields(lines = request.items.len()),
    err(Display)
  )]
  pub async fn checkout(&self, user_id: i64, request: CheckoutRequest) -> ShopResult<Order> {
    let ctx = ContextData::new(CheckoutCtxData::new(
      self.catalog.clone(),
      self.writer.clone(),
      user_id,
      request,
    ));

    match self.flows.run(ctx.clone()).await? {
      PipelineResult::Completed => {
        let placed = ctx.write().placed_order.take();
        placed.ok_or_else(|| ShopError::Internal("checkout completed without an order".to_string()))
      }
      PipelineResult::Stopped => {
        warn!("Checkout pipeline stopped before placing the order.");
        Err(ShopError::Internal("checkout was halted before the order was placed".to_string()))
      }
    }
  }

  #[instrument(name = "CheckoutOrchestrator::orders_for_user", skip(self), err(Display))]
  pub async fn orders_for_user(&self, user_id: i64) -> ShopResult<Vec<Order>> {
    let ctx = ContextData::new(OrderHistoryCtxData::new(self.reader.clone(), user_id));

    match self.flows.run(ctx.clone()).await? {
      PipelineResult::Completed => Ok(std::mem::take(&mut ctx.write().orders)),
      PipelineResult::Stopped => Err(ShopError::Internal("order history lookup was halted".to_string())),
    }
  }
}
