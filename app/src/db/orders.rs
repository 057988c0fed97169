// app/src/db/orders.rs

use super::rows::OrderHistoryRecord;
use super::{storage_err, PgStore};
use async_trait::async_trait;
use storefront_core::models::{Order, OrderItem};
use storefront_core::store::{fold_order_rows, OrderReader, OrderRow, OrderWriter};
use storefront_core::ShopResult;
use tracing::{event, instrument, Level};

const INSERT_ORDER: &str =
  "INSERT INTO orders (user_id, total, status, address, created_at) VALUES ($1, $2, $3, $4, $5) RETURNING id";
const INSERT_ORDER_ITEM: &str =
  "INSERT INTO order_items (order_id, product_id, quantity, price) VALUES ($1, $2, $3, $4) RETURNING id";

const ORDER_HISTORY: &str = r#"
SELECT
  o.id AS order_id, o.user_id, o.total, o.status, o.address, o.created_at AS order_created_at,
  oi.id AS item_id, oi.product_id AS item_product_id, oi.quantity AS item_quantity, oi.price AS item_price,
  p.id AS product_id, p.name AS product_name, p.description AS product_description,
  p.image AS product_image, p.price AS product_price, p.quantity AS product_quantity,
  p.created_at AS product_created_at
FROM orders o
LEFT JOIN order_items oi ON oi.order_id = o.id
LEFT JOIN products p ON p.id = oi.product_id
WHERE o.user_id = $1
ORDER BY o.created_at DESC, o.id ASC, oi.id ASC
"#;

#[async_trait]
impl OrderWriter for PgStore {
  async fn create_order(&self, order: &Order) -> ShopResult<i64> {
    sqlx::query_scalar(INSERT_ORDER)
      .bind(order.user_id)
      .bind(order.total)
      .bind(&order.status)
      .bind(&order.address)
      .bind(order.created_at)
      .fetch_one(&self.pool)
      .await
      .map_err(storage_err)
  }

  async fn create_order_item(&self, item: &OrderItem) -> ShopResult<i64> {
    sqlx::query_scalar(INSERT_ORDER_ITEM)
      .bind(item.order_id)
      .bind(item.product_id)
      .bind(item.quantity)
      .bind(item.price)
      .fetch_one(&self.pool)
      .await
      .map_err(storage_err)
  }

  /// Header and lines go in one transaction; any failure leaves nothing behind.
  #[instrument(name = "PgStore::persist_order", skip(self, order, items), fields(user_id = order.user_id, lines = items.len()))]
  async fn persist_order(&self, mut order: Order, items: Vec<OrderItem>) -> ShopResult<Order> {
    let mut tx = self.pool.begin().await.map_err(storage_err)?;

    let order_id: i64 = sqlx::query_scalar(INSERT_ORDER)
      .bind(order.user_id)
      .bind(order.total)
      .bind(&order.status)
      .bind(&order.address)
      .bind(order.created_at)
      .fetch_one(&mut *tx)
      .await
      .map_err(storage_err)?;

    order.id = order_id;
    order.items = Vec::with_capacity(items.len());
    for mut item in items {
      item.order_id = order_id;
      item.id = sqlx::query_scalar(INSERT_ORDER_ITEM)
        .bind(item.order_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(item.price)
        .fetch_one(&mut *tx)
        .await
        .map_err(storage_err)?;
      order.items.push(item);
    }

    tx.commit().await.map_err(storage_err)?;
    event!(Level::DEBUG, order_id, "Order committed.");
    Ok(order)
  }
}

#[async_trait]
impl OrderReader for PgStore {
  #[instrument(name = "PgStore::get_orders_for_user", skip(self))]
  async fn get_orders_for_user(&self, user_id: i64) -> ShopResult<Vec<Order>> {
    let records: Vec<OrderHistoryRecord> = sqlx::query_as(ORDER_HISTORY)
      .bind(user_id)
      .fetch_all(&self.pool)
      .await
      .map_err(storage_err)?;
    event!(Level::DEBUG, rows = records.len(), "Order history rows fetched.");
    Ok(fold_order_rows(records.into_iter().map(OrderRow::from)))
  }
}
