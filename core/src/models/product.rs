// core/src/models/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: i64,
  pub name: String,
  pub description: String,
  pub image: String,
  pub price: Decimal,
  /// Units currently available for sale.
  pub quantity: i32,
  pub created_at: DateTime<Utc>,
}

/// Body of a product creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
  pub name: String,
  pub description: String,
  pub image: String,
  pub price: Decimal,
  pub quantity: i32,
}
