// core/src/checkout/contexts.rs

//! Data carried through the checkout and order-history pipelines.
//! Handlers receive these wrapped in `ContextData`.

use crate::models::{CheckoutRequest, Order, OrderItem, Product};
use crate::store::{CatalogReader, OrderReader, OrderWriter};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

pub struct CheckoutCtxData {
  pub catalog: Arc<dyn CatalogReader>,
  pub writer: Arc<dyn OrderWriter>,
  pub user_id: i64,
  pub request: CheckoutRequest,

  // Filled in step by step.
  pub products: HashMap<i64, Product>,
  pub lines: Vec<OrderItem>,
  pub total: Decimal,
  pub placed_order: Option<Order>,
}

impl CheckoutCtxData {
  pub fn new(
    catalog: Arc<dyn CatalogReader>,
    writer: Arc<dyn OrderWriter>,
    user_id: i64,
    request: CheckoutRequest,
  ) -> Self {
    Self {
      catalog,
      writer,
      user_id,
      request,
      products: HashMap::new(),
      lines: Vec::new(),
      total: Decimal::ZERO,
      placed_order: None,
    }
  }
}

pub struct OrderHistoryCtxData {
  pub reader: Arc<dyn OrderReader>,
  pub user_id: i64,
  pub orders: Vec<Order>,
}

impl OrderHistoryCtxData {
  pub fn new(reader: Arc<dyn OrderReader>, user_id: i64) -> Self {
    Self {
      reader,
      user_id,
      orders: Vec::new(),
    }
  }
}
