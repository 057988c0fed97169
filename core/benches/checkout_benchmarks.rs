use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;
use std::sync::Arc;
use storefront_core::models::{CartItem, CheckoutRequest, Order, OrderItem, Product};
use storefront_core::store::{fold_order_rows, InMemoryStore, OrderRow};
use storefront_core::{CheckoutOrchestrator, Flows};
use tokio::runtime::Runtime;

fn catalog(size: i64) -> Vec<Product> {
  (1..=size)
    .map(|id| Product {
      id,
      name: format!("product {}", id),
      description: String::new(),
      image: String::new(),
      price: Decimal::new(100 + id, 2),
      quantity: i32::MAX,
      created_at: Utc::now(),
    })
    .collect()
}

/// `orders` orders of `lines` lines each, rows shuffled by a fixed stride.
fn history_rows(orders: i64, lines: i64) -> Vec<OrderRow> {
  let mut rows = Vec::with_capacity((orders * lines) as usize);
  for order_id in 1..=orders {
    let header = Order {
      id: order_id,
      user_id: 1,
      total: Decimal::new(1000, 2),
      status: "pending".to_string(),
      address: "bench".to_string(),
      created_at: Utc.timestamp_opt(order_id % 17, 0).single().unwrap_or_default(),
      items: Vec::new(),
    };
    for line in 0..lines {
      rows.push(OrderRow {
        order: header.clone(),
        item: Some(OrderItem {
          id: order_id * lines + line,
          order_id,
          product_id: line + 1,
          quantity: 1,
          price: Decimal::new(1000, 2),
          product: None,
        }),
      });
    }
  }
  let len = rows.len();
  if len > 1 {
    for i in 0..len {
      rows.swap(i, (i * 7919) % len);
    }
  }
  rows
}

fn bench_fold_order_rows(c: &mut Criterion) {
  let mut group = c.benchmark_group("FoldOrderRows");

  for (orders, lines) in [(10, 3), (100, 3), (1_000, 5)] {
    let rows = history_rows(orders, lines);
    group.throughput(Throughput::Elements(rows.len() as u64));
    group.bench_with_input(
      BenchmarkId::new(format!("{}orders_{}lines", orders, lines), rows.len()),
      &rows,
      |b, rows| {
        b.iter_batched(|| rows.clone(), fold_order_rows, criterion::BatchSize::SmallInput);
      },
    );
  }
  group.finish();
}

fn bench_checkout_in_memory(c: &mut Criterion) {
  let mut group = c.benchmark_group("CheckoutInMemory");
  let rt = Runtime::new().unwrap();

  for cart_lines in [1_i64, 10, 50] {
    let store = Arc::new(InMemoryStore::with_products(catalog(cart_lines)));
    let orchestrator = CheckoutOrchestrator::new(Arc::new(Flows::new()), store.clone(), store.clone(), store);
    let request = CheckoutRequest {
      items: (1..=cart_lines)
        .map(|product_id| CartItem { product_id, quantity: 2 })
        .collect(),
      address: "bench street".to_string(),
    };

    group.throughput(Throughput::Elements(cart_lines as u64));
    group.bench_with_input(BenchmarkId::new("lines", cart_lines), &request, |b, request| {
      b.to_async(&rt).iter_batched(
        || request.clone(),
        |req| {
          let orchestrator = orchestrator.clone();
          async move { orchestrator.checkout(1, req).await.unwrap() }
        },
        criterion::BatchSize::SmallInput,
      );
    });
  }
  group.finish();
}

criterion_group!(benches, bench_fold_order_rows, bench_checkout_in_memory);
criterion_main!(benches);
