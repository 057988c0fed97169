// core/src/models/order.rs

use super::product::Product;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const ORDER_STATUS_PENDING: &str = "pending";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: i64,
  pub user_id: i64,
  /// Sum of `quantity * price` over `items`, fixed when the order is placed.
  pub total: Decimal,
  pub status: String,
  pub address: String,
  pub created_at: DateTime<Utc>,
  #[serde(default)]
  pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
  pub id: i64,
  pub order_id: i64,
  pub product_id: i64,
  pub quantity: i32,
  /// Unit price captured at checkout. Never re-read from the catalog.
  pub price: Decimal,
  /// Only populated when reading order history, and only while the product still exists.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub product: Option<Product>,
}

impl OrderItem {
  pub fn line_total(&self) -> Decimal {
    self.price * Decimal::from(self.quantity)
  }
}
