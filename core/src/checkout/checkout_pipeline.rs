// core/src/checkout/checkout_pipeline.rs

//! Turns a cart into a persisted order. Nothing is written until every line
//! has been matched to a catalog product with enough stock.

use super::contexts::CheckoutCtxData;
use crate::error::{ShopError, ShopResult};
use crate::flow::{ContextData, Flows, Pipeline, PipelineControl};
use crate::models::{Order, OrderItem, ORDER_STATUS_PENDING};
use chrono::{SubsecRound, Utc};
use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::{event, info, warn, Level};

pub const CHECKOUT_STEPS: &[(&str, bool)] = &[
  ("validate_request", false),
  ("load_products", false),
  ("check_stock", false),
  ("price_lines", false),
  ("persist_order", false),
];

pub fn build_checkout_pipeline() -> Pipeline<CheckoutCtxData> {
  let mut p = Pipeline::<CheckoutCtxData>::new(CHECKOUT_STEPS);

  p.on_root("validate_request", validate_request);
  p.on_root("load_products", load_products);
  p.on_root("check_stock", check_stock);
  p.on_root("price_lines", price_lines);
  p.on_root("persist_order", persist_order);

  p.after_root("persist_order", |ctx: ContextData<CheckoutCtxData>| {
    Box::pin(async move {
      let guard = ctx.read();
      if let Some(order) = guard.placed_order.as_ref() {
        info!(
          order_id = order.id,
          user_id = order.user_id,
          lines = order.items.len(),
          total = %order.total,
          "Order placed."
        );
      }
      Ok::<_, ShopError>(PipelineControl::Continue)
    })
  });

  p
}

pub fn register_checkout_pipeline(flows: &Flows) {
  flows.register_pipeline(build_checkout_pipeline());
  tracing::info!("Checkout pipeline registered.");
}

async fn validate_request(ctx: ContextData<CheckoutCtxData>) -> ShopResult<PipelineControl> {
  let guard = ctx.read();
  let request = &guard.request;

  if request.items.is_empty() {
    warn!(user_id = guard.user_id, "Checkout rejected: empty cart.");
    return Err(ShopError::validation("cart must contain at least one item"));
  }
  if request.address.trim().is_empty() {
    warn!(user_id = guard.user_id, "Checkout rejected: missing address.");
    return Err(ShopError::validation("address is required"));
  }
  if let Some(bad) = request.items.iter().find(|item| item.quantity <= 0) {
    return Err(ShopError::validation(format!(
      "quantity for product {} must be greater than zero",
      bad.product_id
    )));
  }
  Ok(PipelineControl::Continue)
}

async fn load_products(ctx: ContextData<CheckoutCtxData>) -> ShopResult<PipelineControl> {
  let (catalog, distinct_ids) = {
    let guard = ctx.read();
    let mut seen = HashSet::new();
    let distinct_ids: Vec<i64> = guard
      .request
      .items
      .iter()
      .map(|item| item.product_id)
      .filter(|id| seen.insert(*id))
      .collect();
    (guard.catalog.clone(), distinct_ids)
  };

  event!(Level::DEBUG, ids = ?distinct_ids, "Fetching catalog products.");
  let products = catalog.get_products_by_ids(&distinct_ids).await?;

  if products.len() != distinct_ids.len() {
    warn!(
      requested = distinct_ids.len(),
      found = products.len(),
      "Checkout rejected: unknown product in cart."
    );
    return Err(ShopError::not_found("one or more products not found"));
  }

  ctx.write().products = products.into_iter().map(|p| (p.id, p)).collect();
  Ok(PipelineControl::Continue)
}

async fn check_stock(ctx: ContextData<CheckoutCtxData>) -> ShopResult<PipelineControl> {
  let guard = ctx.read();
  for item in &guard.request.items {
    let product = guard
      .products
      .get(&item.product_id)
      .ok_or_else(|| ShopError::not_found(format!("product with ID {} not found", item.product_id)))?;
    if item.quantity > product.quantity {
      warn!(
        product_id = item.product_id,
        requested = item.quantity,
        available = product.quantity,
        "Checkout rejected: insufficient stock."
      );
      return Err(ShopError::validation(format!(
        "insufficient quantity for product {}",
        item.product_id
      )));
    }
  }
  Ok(PipelineControl::Continue)
}

/// Captures each line's unit price from the catalog snapshot and sums the total.
async fn price_lines(ctx: ContextData<CheckoutCtxData>) -> ShopResult<PipelineControl> {
  let mut guard = ctx.write();
  let mut total = Decimal::ZERO;
  let mut lines = Vec::with_capacity(guard.request.items.len());

  for item in &guard.request.items {
    let product = guard
      .products
      .get(&item.product_id)
      .ok_or_else(|| ShopError::not_found(format!("product with ID {} not found", item.product_id)))?;
    let line = OrderItem {
      id: 0,
      order_id: 0,
      product_id: product.id,
      quantity: item.quantity,
      price: product.price,
      product: None,
    };
    total += line.line_total();
    lines.push(line);
  }

  guard.lines = lines;
  guard.total = total;
  Ok(PipelineControl::Continue)
}

async fn persist_order(ctx: ContextData<CheckoutCtxData>) -> ShopResult<PipelineControl> {
  let (writer, header, lines) = {
    let mut guard = ctx.write();
    let header = Order {
      id: 0,
      user_id: guard.user_id,
      total: guard.total,
      status: ORDER_STATUS_PENDING.to_string(),
      address: guard.request.address.clone(),
      // Microseconds, the precision the order is stored and read back with.
      created_at: Utc::now().trunc_subsecs(6),
      items: Vec::new(),
    };
    (guard.writer.clone(), header, std::mem::take(&mut guard.lines))
  };

  let placed = writer.persist_order(header, lines).await?;
  ctx.write().placed_order = Some(placed);
  Ok(PipelineControl::Continue)
}
