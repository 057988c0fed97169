// app/src/db/rows.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use storefront_core::models::{Order, OrderItem, Product, User};
use storefront_core::store::OrderRow;

pub(super) const PRODUCT_COLUMNS: &str = "id, name, description, image, price, quantity, created_at";
pub(super) const USER_COLUMNS: &str = "id, first_name, last_name, email, password_hash, created_at";

#[derive(Debug, FromRow)]
pub(super) struct ProductRecord {
  id: i64,
  name: String,
  description: String,
  image: String,
  price: Decimal,
  quantity: i32,
  created_at: DateTime<Utc>,
}

impl From<ProductRecord> for Product {
  fn from(r: ProductRecord) -> Self {
    Product {
      id: r.id,
      name: r.name,
      description: r.description,
      image: r.image,
      price: r.price,
      quantity: r.quantity,
      created_at: r.created_at,
    }
  }
}

#[derive(Debug, FromRow)]
pub(super) struct UserRecord {
  id: i64,
  first_name: String,
  last_name: String,
  email: String,
  password_hash: String,
  created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
  fn from(r: UserRecord) -> Self {
    User {
      id: r.id,
      first_name: r.first_name,
      last_name: r.last_name,
      email: r.email,
      password_hash: r.password_hash,
      created_at: r.created_at,
    }
  }
}

/// One row of `orders LEFT JOIN order_items LEFT JOIN products`.
#[derive(Debug, FromRow)]
pub(super) struct OrderHistoryRecord {
  order_id: i64,
  user_id: i64,
  total: Decimal,
  status: String,
  address: String,
  order_created_at: DateTime<Utc>,

  item_id: Option<i64>,
  item_product_id: Option<i64>,
  item_quantity: Option<i32>,
  item_price: Option<Decimal>,

  product_id: Option<i64>,
  product_name: Option<String>,
  product_description: Option<String>,
  product_image: Option<String>,
  product_price: Option<Decimal>,
  product_quantity: Option<i32>,
  product_created_at: Option<DateTime<Utc>>,
}

impl OrderHistoryRecord {
  fn product(&self) -> Option<Product> {
    Some(Product {
      id: self.product_id?,
      name: self.product_name.clone()?,
      description: self.product_description.clone()?,
      image: self.product_image.clone()?,
      price: self.product_price?,
      quantity: self.product_quantity?,
      created_at: self.product_created_at?,
    })
  }

  fn item(&self) -> Option<OrderItem> {
    Some(OrderItem {
      id: self.item_id?,
      order_id: self.order_id,
      product_id: self.item_product_id?,
      quantity: self.item_quantity?,
      price: self.item_price?,
      product: self.product(),
    })
  }
}

impl From<OrderHistoryRecord> for OrderRow {
  fn from(r: OrderHistoryRecord) -> Self {
    let item = r.item();
    OrderRow {
      order: Order {
        id: r.order_id,
        user_id: r.user_id,
        total: r.total,
        status: r.status,
        address: r.address,
        created_at: r.order_created_at,
        items: Vec::new(),
      },
      item,
    }
  }
}
