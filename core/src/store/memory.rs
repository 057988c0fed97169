// core/src/store/memory.rs

//! `InMemoryStore` implements every storage trait over plain tables behind one
//! `parking_lot::Mutex`. It counts writes and can inject failures so callers
//! can assert on what a checkout did or did not persist.

use super::history::{fold_order_rows, OrderRow};
use super::{CatalogReader, OrderReader, OrderWriter, ProductStore, UserStore};
use crate::error::{ShopError, ShopResult};
use crate::models::{NewProduct, NewUser, Order, OrderItem, Product, User};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use tracing::{event, Level};

#[derive(Debug, Default)]
struct Tables {
  products: BTreeMap<i64, Product>,
  orders: Vec<Order>,
  items: Vec<OrderItem>,
  users: Vec<User>,
  next_product_id: i64,
  next_order_id: i64,
  next_item_id: i64,
  next_user_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
  *counter += 1;
  *counter
}

#[derive(Debug, Default)]
struct Faults {
  /// Item inserts still allowed before every further one fails.
  item_writes_left: Option<usize>,
  fail_catalog_reads: bool,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
  tables: Mutex<Tables>,
  faults: Mutex<Faults>,
  writes: Mutex<usize>,
}

impl InMemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seeds products as-is, ids included.
  pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
    let store = Self::new();
    {
      let mut tables = store.tables.lock();
      for product in products {
        tables.next_product_id = tables.next_product_id.max(product.id);
        tables.products.insert(product.id, product);
      }
    }
    store
  }

  pub fn remove_product(&self, product_id: i64) -> Option<Product> {
    self.tables.lock().products.remove(&product_id)
  }

  pub fn set_product_price(&self, product_id: i64, price: rust_decimal::Decimal) {
    if let Some(product) = self.tables.lock().products.get_mut(&product_id) {
      product.price = price;
    }
  }

  /// Rewrites the creation time of a stored order header.
  pub fn set_order_created_at(&self, order_id: i64, created_at: DateTime<Utc>) {
    if let Some(order) = self.tables.lock().orders.iter_mut().find(|o| o.id == order_id) {
      order.created_at = created_at;
    }
  }

  /// Successful order and item inserts since construction.
  pub fn write_count(&self) -> usize {
    *self.writes.lock()
  }

  pub fn order_count(&self) -> usize {
    self.tables.lock().orders.len()
  }

  pub fn item_count(&self) -> usize {
    self.tables.lock().items.len()
  }

  /// After `allowed` more successful item inserts, every item insert fails.
  pub fn fail_item_writes_after(&self, allowed: usize) {
    self.faults.lock().item_writes_left = Some(allowed);
  }

  pub fn fail_catalog_reads(&self, fail: bool) {
    self.faults.lock().fail_catalog_reads = fail;
  }

  fn record_write(&self) {
    *self.writes.lock() += 1;
  }
}

#[async_trait]
impl CatalogReader for InMemoryStore {
  async fn get_products_by_ids(&self, ids: &[i64]) -> ShopResult<Vec<Product>> {
    if self.faults.lock().fail_catalog_reads {
      return Err(ShopError::storage(anyhow::anyhow!("catalog unavailable")));
    }
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    let tables = self.tables.lock();
    Ok(
      tables
        .products
        .values()
        .filter(|p| ids.contains(&p.id))
        .cloned()
        .collect(),
    )
  }
}

#[async_trait]
impl OrderWriter for InMemoryStore {
  async fn create_order(&self, order: &Order) -> ShopResult<i64> {
    let id = {
      let mut tables = self.tables.lock();
      let id = next_id(&mut tables.next_order_id);
      tables.orders.push(Order {
        id,
        items: Vec::new(),
        ..order.clone()
      });
      id
    };
    self.record_write();
    event!(Level::DEBUG, order_id = id, "Order header stored.");
    Ok(id)
  }

  async fn create_order_item(&self, item: &OrderItem) -> ShopResult<i64> {
    {
      let mut faults = self.faults.lock();
      if let Some(left) = faults.item_writes_left.as_mut() {
        if *left == 0 {
          return Err(ShopError::storage(anyhow::anyhow!("order item insert rejected")));
        }
        *left -= 1;
      }
    }
    let id = {
      let mut tables = self.tables.lock();
      let id = next_id(&mut tables.next_item_id);
      tables.items.push(OrderItem {
        id,
        product: None,
        ..item.clone()
      });
      id
    };
    self.record_write();
    Ok(id)
  }
}

#[async_trait]
impl OrderReader for InMemoryStore {
  async fn get_orders_for_user(&self, user_id: i64) -> ShopResult<Vec<Order>> {
    // Emulates the LEFT JOIN: one row per line, or a single bare row for an order without lines.
    let rows: Vec<OrderRow> = {
      let tables = self.tables.lock();
      let mut rows = Vec::new();
      for order in tables.orders.iter().filter(|o| o.user_id == user_id) {
        let mut lines = tables.items.iter().filter(|i| i.order_id == order.id).peekable();
        if lines.peek().is_none() {
          rows.push(OrderRow {
            order: order.clone(),
            item: None,
          });
          continue;
        }
        for line in lines {
          rows.push(OrderRow {
            order: order.clone(),
            item: Some(OrderItem {
              product: tables.products.get(&line.product_id).cloned(),
              ..line.clone()
            }),
          });
        }
      }
      rows
    };
    Ok(fold_order_rows(rows))
  }
}

#[async_trait]
impl ProductStore for InMemoryStore {
  async fn list_products(&self) -> ShopResult<Vec<Product>> {
    Ok(self.tables.lock().products.values().cloned().collect())
  }

  async fn create_product(&self, product: &NewProduct) -> ShopResult<Product> {
    let mut tables = self.tables.lock();
    let id = next_id(&mut tables.next_product_id);
    let created = Product {
      id,
      name: product.name.clone(),
      description: product.description.clone(),
      image: product.image.clone(),
      price: product.price,
      quantity: product.quantity,
      created_at: Utc::now(),
    };
    tables.products.insert(id, created.clone());
    Ok(created)
  }
}

#[async_trait]
impl UserStore for InMemoryStore {
  async fn get_user_by_email(&self, email: &str) -> ShopResult<Option<User>> {
    Ok(self.tables.lock().users.iter().find(|u| u.email == email).cloned())
  }

  async fn get_user_by_id(&self, id: i64) -> ShopResult<Option<User>> {
    Ok(self.tables.lock().users.iter().find(|u| u.id == id).cloned())
  }

  async fn create_user(&self, user: &NewUser) -> ShopResult<User> {
    let mut tables = self.tables.lock();
    if tables.users.iter().any(|u| u.email == user.email) {
      return Err(ShopError::validation(format!("user with email {} already exists", user.email)));
    }
    let created = User {
      id: next_id(&mut tables.next_user_id),
      first_name: user.first_name.clone(),
      last_name: user.last_name.clone(),
      email: user.email.clone(),
      password_hash: user.password_hash.clone(),
      created_at: Utc::now(),
    };
    tables.users.push(created.clone());
    Ok(created)
  }
}
