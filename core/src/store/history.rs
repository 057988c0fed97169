// core/src/store/history.rs

//! Rebuilds nested orders from the flat rows of
//! `orders LEFT JOIN order_items LEFT JOIN products`.

use crate::models::{Order, OrderItem};
use std::collections::HashMap;

/// One row of the history join.
///
/// `order.items` is ignored. `item` is `None` for an order without lines, and
/// `item.product` is `None` when the product row no longer exists.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
  pub order: Order,
  pub item: Option<OrderItem>,
}

/// Folds join rows into orders, keyed by order id.
///
/// Lines keep the order in which their rows arrived. The output is sorted by
/// `created_at` descending, then `id` ascending, whatever the row order was.
pub fn fold_order_rows<I>(rows: I) -> Vec<Order>
where
  I: IntoIterator<Item = OrderRow>,
{
  let mut arena: Vec<Order> = Vec::new();
  let mut index: HashMap<i64, usize> = HashMap::new();

  for OrderRow { order, item } in rows {
    let slot = match index.get(&order.id) {
      Some(&slot) => slot,
      None => {
        index.insert(order.id, arena.len());
        arena.push(Order {
          items: Vec::new(),
          ..order
        });
        arena.len() - 1
      }
    };

    if let Some(item) = item {
      arena[slot].items.push(item);
    }
  }

  arena.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
  arena
}
