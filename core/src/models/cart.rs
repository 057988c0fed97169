// core/src/models/cart.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
  #[serde(rename = "productID")]
  pub product_id: i64,
  pub quantity: i32,
}

/// Body of `POST /order`. Duplicate product ids are allowed and become separate lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
  #[serde(default)]
  pub items: Vec<CartItem>,
  #[serde(default)]
  pub address: String,
}
