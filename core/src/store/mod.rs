// core/src/store/mod.rs

//! Storage contracts. The app crate implements them on Postgres; `InMemoryStore`
//! implements them for tests and benches.

pub mod history;
pub mod memory;

use crate::error::ShopResult;
use crate::models::{NewProduct, NewUser, Order, OrderItem, Product, User};
use async_trait::async_trait;

pub use history::{fold_order_rows, OrderRow};
pub use memory::InMemoryStore;

#[async_trait]
pub trait CatalogReader: Send + Sync {
  /// Products whose id is in `ids`, in no particular order. Unknown ids are
  /// simply absent from the result, and an empty `ids` yields an empty Vec.
  async fn get_products_by_ids(&self, ids: &[i64]) -> ShopResult<Vec<Product>>;
}

#[async_trait]
pub trait OrderWriter: Send + Sync {
  /// Inserts the order header and returns its id. `order.id` and `order.items` are ignored.
  async fn create_order(&self, order: &Order) -> ShopResult<i64>;

  /// Inserts one line item and returns its id. `item.id` and `item.product` are ignored.
  async fn create_order_item(&self, item: &OrderItem) -> ShopResult<i64>;

  /// Writes a header and its lines, returning the order with every id filled in.
  ///
  /// This default issues the inserts one after another and is not atomic: a
  /// failing line leaves the header and earlier lines behind. Stores that have
  /// transactions override it.
  async fn persist_order(&self, mut order: Order, items: Vec<OrderItem>) -> ShopResult<Order> {
    let order_id = self.create_order(&order).await?;
    order.id = order_id;
    order.items = Vec::with_capacity(items.len());
    for mut item in items {
      item.order_id = order_id;
      item.id = self.create_order_item(&item).await?;
      order.items.push(item);
    }
    Ok(order)
  }
}

#[async_trait]
pub trait OrderReader: Send + Sync {
  /// Every order of `user_id` with its lines, newest first, ties broken by ascending id.
  async fn get_orders_for_user(&self, user_id: i64) -> ShopResult<Vec<Order>>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
  async fn list_products(&self) -> ShopResult<Vec<Product>>;
  async fn create_product(&self, product: &NewProduct) -> ShopResult<Product>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
  async fn get_user_by_email(&self, email: &str) -> ShopResult<Option<User>>;
  async fn get_user_by_id(&self, id: i64) -> ShopResult<Option<User>>;
  async fn create_user(&self, user: &NewUser) -> ShopResult<User>;
}
