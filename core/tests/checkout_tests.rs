// tests/checkout_tests.rs
mod common;

use common::*;
use rust_decimal_macros::dec;
use storefront_core::models::CheckoutRequest;
use storefront_core::store::OrderReader;
use storefront_core::ShopError;

#[tokio::test]
async fn test_single_line_checkout_prices_from_catalog() {
  setup_tracing();
  let h = harness(vec![product(1, dec!(10.00), 5)]);

  let order = h.orchestrator.checkout(42, cart(&[(1, 2)], "1 Main St")).await.unwrap();

  assert_eq!(order.total, dec!(20.00));
  assert_eq!(order.status, "pending");
  assert_eq!(order.user_id, 42);
  assert_eq!(order.address, "1 Main St");
  assert_eq!(order.items.len(), 1);
  assert_eq!(order.items[0].price, dec!(10.00));
  assert_eq!(order.items[0].quantity, 2);
  assert_eq!(order.items[0].product_id, 1);
  assert_eq!(order.items[0].order_id, order.id);
  assert!(order.items[0].id > 0);
  assert_eq!(h.store.write_count(), 2);
}

#[tokio::test]
async fn test_total_is_sum_of_quantity_times_price() {
  setup_tracing();
  let h = harness(vec![
    product(1, dec!(3.25), 10),
    product(2, dec!(0.10), 100),
    product(3, dec!(199.99), 1),
  ]);

  let order = h
    .orchestrator
    .checkout(7, cart(&[(3, 1), (1, 4), (2, 33)], "warehouse 9"))
    .await
    .unwrap();

  // 199.99 + 4 * 3.25 + 33 * 0.10
  assert_eq!(order.total, dec!(216.29));
  let line_sum: rust_decimal::Decimal = order.items.iter().map(|i| i.line_total()).sum();
  assert_eq!(order.total, line_sum);
  let products: Vec<i64> = order.items.iter().map(|i| i.product_id).collect();
  assert_eq!(products, vec![3, 1, 2]);
}

#[tokio::test]
async fn test_duplicate_product_lines_are_kept_separately() {
  setup_tracing();
  let h = harness(vec![product(1, dec!(5.00), 3)]);

  let order = h.orchestrator.checkout(1, cart(&[(1, 2), (1, 3)], "dup lane")).await.unwrap();

  assert_eq!(order.items.len(), 2);
  assert_eq!(order.total, dec!(25.00));
  assert_eq!(h.store.item_count(), 2);
}

#[tokio::test]
async fn test_empty_cart_is_rejected_whatever_the_address() {
  setup_tracing();
  let h = harness(vec![product(1, dec!(1.00), 1)]);

  for address in ["", "   ", "1 Main St"] {
    let err = h
      .orchestrator
      .checkout(1, CheckoutRequest { items: vec![], address: address.to_string() })
      .await
      .unwrap_err();
    assert!(matches!(err, ShopError::Validation(_)), "address {address:?} gave {err:?}");
  }
  assert_eq!(h.store.write_count(), 0);
}

#[tokio::test]
async fn test_blank_address_is_rejected() {
  setup_tracing();
  let h = harness(vec![product(1, dec!(1.00), 1)]);

  let err = h.orchestrator.checkout(1, cart(&[(1, 1)], "  ")).await.unwrap_err();

  assert!(matches!(err, ShopError::Validation(ref m) if m == "address is required"));
  assert_eq!(h.store.write_count(), 0);
}

#[tokio::test]
async fn test_non_positive_quantity_is_rejected() {
  setup_tracing();
  let h = harness(vec![product(1, dec!(1.00), 10)]);

  for qty in [0, -3] {
    let err = h.orchestrator.checkout(1, cart(&[(1, qty)], "addr")).await.unwrap_err();
    assert!(matches!(err, ShopError::Validation(_)));
  }
  assert_eq!(h.store.write_count(), 0);
}

#[tokio::test]
async fn test_unknown_product_fails_without_writes() {
  setup_tracing();
  let h = harness(vec![product(1, dec!(10.00), 5)]);

  let err = h.orchestrator.checkout(1, cart(&[(1, 1), (999, 1)], "addr")).await.unwrap_err();

  match err {
    ShopError::NotFound(msg) => assert_eq!(msg, "one or more products not found"),
    other => panic!("expected NotFound, got {other:?}"),
  }
  assert_eq!(h.store.write_count(), 0);
  assert_eq!(h.store.order_count(), 0);
}

#[tokio::test]
async fn test_insufficient_stock_fails_without_writes() {
  setup_tracing();
  let h = harness(vec![product(1, dec!(10.00), 5)]);

  let err = h.orchestrator.checkout(1, cart(&[(1, 10)], "addr")).await.unwrap_err();

  assert_eq!(err.to_string(), "insufficient quantity for product 1");
  assert!(matches!(err, ShopError::Validation(_)));
  assert_eq!(h.store.write_count(), 0);
  assert_eq!(h.store.order_count(), 0);
}

#[tokio::test]
async fn test_stock_check_reports_first_offending_line() {
  setup_tracing();
  let h = harness(vec![product(1, dec!(1.00), 1), product(2, dec!(1.00), 1)]);

  let err = h.orchestrator.checkout(1, cart(&[(2, 5), (1, 5)], "addr")).await.unwrap_err();

  assert_eq!(err.to_string(), "insufficient quantity for product 2");
}

#[tokio::test]
async fn test_checkout_does_not_touch_stock() {
  setup_tracing();
  let h = harness(vec![product(1, dec!(2.00), 3)]);

  h.orchestrator.checkout(1, cart(&[(1, 3)], "a")).await.unwrap();
  // Stock is never decremented, so the same cart passes again.
  h.orchestrator.checkout(2, cart(&[(1, 3)], "b")).await.unwrap();

  assert_eq!(h.store.order_count(), 2);
}

#[tokio::test]
async fn test_line_price_is_frozen_at_checkout() {
  setup_tracing();
  let h = harness(vec![product(1, dec!(10.00), 5)]);

  let placed = h.orchestrator.checkout(3, cart(&[(1, 1)], "addr")).await.unwrap();
  h.store.set_product_price(1, dec!(99.00));

  let history = h.store.get_orders_for_user(3).await.unwrap();
  assert_eq!(history.len(), 1);
  assert_eq!(history[0].id, placed.id);
  assert_eq!(history[0].total, dec!(10.00));
  assert_eq!(history[0].items[0].price, dec!(10.00));
  let snapshot = history[0].items[0].product.as_ref().expect("product still exists");
  assert_eq!(snapshot.price, dec!(99.00));
}

#[tokio::test]
async fn test_catalog_failure_surfaces_as_storage_error() {
  setup_tracing();
  let h = harness(vec![product(1, dec!(10.00), 5)]);
  h.store.fail_catalog_reads(true);

  let err = h.orchestrator.checkout(1, cart(&[(1, 1)], "addr")).await.unwrap_err();

  assert!(matches!(err, ShopError::Storage(_)));
  assert_eq!(h.store.write_count(), 0);
}

#[tokio::test]
async fn test_item_write_failure_surfaces_as_storage_error() {
  setup_tracing();
  let h = harness(vec![product(1, dec!(1.00), 9), product(2, dec!(2.00), 9)]);
  h.store.fail_item_writes_after(1);

  let err = h.orchestrator.checkout(1, cart(&[(1, 1), (2, 1)], "addr")).await.unwrap_err();

  assert!(matches!(err, ShopError::Storage(_)));
  // The default writer is best-effort: header and first line stay behind.
  assert_eq!(h.store.order_count(), 1);
  assert_eq!(h.store.item_count(), 1);
}

#[tokio::test]
async fn test_order_serializes_with_camel_case_fields() {
  setup_tracing();
  let h = harness(vec![product(1, dec!(10.00), 5)]);
  let order = h.orchestrator.checkout(42, cart(&[(1, 2)], "1 Main St")).await.unwrap();

  let json = serde_json::to_value(&order).unwrap();
  assert_eq!(json["userId"], 42);
  assert_eq!(json["status"], "pending");
  assert!(json.get("createdAt").is_some());
  assert_eq!(json["items"][0]["productId"], 1);
  assert_eq!(json["items"][0]["orderId"], order.id);
  assert!(json["items"][0].get("product").is_none());
}

#[test]
fn test_cart_payload_uses_product_id_casing() {
  let req: CheckoutRequest =
    serde_json::from_str(r#"{"items":[{"productID":4,"quantity":2}],"address":"x"}"#).unwrap();
  assert_eq!(req.items[0].product_id, 4);
  assert_eq!(req.items[0].quantity, 2);
}

#[tokio::test]
async fn test_placed_order_timestamp_matches_history() {
  setup_tracing();
  let h = harness(vec![product(1, dec!(10.00), 5)]);

  let placed = h.orchestrator.checkout(3, cart(&[(1, 1)], "1 Main St")).await.unwrap();
  let history = h.orchestrator.orders_for_user(3).await.unwrap();

  assert_eq!(placed.created_at.timestamp_subsec_nanos() % 1_000, 0);
  assert_eq!(history[0].created_at, placed.created_at);
}

#[tokio::test]
async fn test_large_totals_keep_full_precision() {
  setup_tracing();
  let h = harness(vec![product(1, dec!(1000000.00), 20_000)]);

  let order = h.orchestrator.checkout(5, cart(&[(1, 20_000)], "vault")).await.unwrap();

  assert_eq!(order.total, dec!(20000000000.00));
  assert_eq!(order.items[0].line_total(), order.total);
}
