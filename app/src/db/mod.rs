// app/src/db/mod.rs

//! Postgres implementations of the storage traits. One `PgStore` over a shared
//! pool serves catalog, orders and users.

mod catalog;
mod orders;
mod rows;
mod users;

use crate::config::AppConfig;
use sqlx::postgres::{PgPool, PgPoolOptions};
use storefront_core::ShopError;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[instrument(name = "db::connect", skip(config), fields(max_connections = config.db_max_connections))]
pub async fn connect(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
  let pool = PgPoolOptions::new()
    .max_connections(config.db_max_connections)
    .connect(&config.database_url)
    .await?;
  info!("Database pool ready.");
  Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
  sqlx::migrate!("./migrations").run(pool).await?;
  info!("Migrations applied.");
  Ok(())
}

fn storage_err(err: sqlx::Error) -> ShopError {
  tracing::error!(error = %err, "Database operation failed.");
  ShopError::storage(err)
}

#[cfg(test)]
mod tests {
  const INIT_SQL: &str = include_str!("../../migrations/0001_init.sql");

  fn column(table: &str, name: &str) -> &'static str {
    let start = INIT_SQL.find(&format!("CREATE TABLE IF NOT EXISTS {} (", table)).unwrap();
    INIT_SQL[start..]
      .lines()
      .map(str::trim)
      .find(|line| line.starts_with(name))
      .unwrap()
  }

  #[test]
  fn order_total_is_unbounded_numeric() {
    let total = column("orders", "total ");
    assert_eq!(total.split_whitespace().nth(1), Some("NUMERIC"));
    assert!(!total.contains('('), "orders.total must not carry a precision: {}", total);
  }
}
