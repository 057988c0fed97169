// app/src/db/catalog.rs

use super::rows::{ProductRecord, PRODUCT_COLUMNS};
use super::{storage_err, PgStore};
use async_trait::async_trait;
use storefront_core::models::{NewProduct, Product};
use storefront_core::store::{CatalogReader, ProductStore};
use storefront_core::ShopResult;
use tracing::{event, instrument, Level};

#[async_trait]
impl CatalogReader for PgStore {
  #[instrument(name = "PgStore::get_products_by_ids", skip(self, ids), fields(ids = ids.len()))]
  async fn get_products_by_ids(&self, ids: &[i64]) -> ShopResult<Vec<Product>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    let records: Vec<ProductRecord> =
      sqlx::query_as(&format!("SELECT {} FROM products WHERE id = ANY($1)", PRODUCT_COLUMNS))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;
    event!(Level::DEBUG, found = records.len(), "Catalog lookup done.");
    Ok(records.into_iter().map(Product::from).collect())
  }
}

#[async_trait]
impl ProductStore for PgStore {
  async fn list_products(&self) -> ShopResult<Vec<Product>> {
    let records: Vec<ProductRecord> =
      sqlx::query_as(&format!("SELECT {} FROM products ORDER BY id", PRODUCT_COLUMNS))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;
    Ok(records.into_iter().map(Product::from).collect())
  }

  #[instrument(name = "PgStore::create_product", skip(self, product), fields(name = %product.name))]
  async fn create_product(&self, product: &NewProduct) -> ShopResult<Product> {
    let record: ProductRecord = sqlx::query_as(&format!(
      "INSERT INTO products (name, description, image, price, quantity) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
      PRODUCT_COLUMNS
    ))
    .bind(&product.name)
    .bind(&product.description)
    .bind(&product.image)
    .bind(product.price)
    .bind(product.quantity)
    .fetch_one(&self.pool)
    .await
    .map_err(storage_err)?;
    Ok(record.into())
  }
}
