// app/src/web/handlers/product_handlers.rs

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::services::validation::validate_new_product;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;
use crate::web::responses::success;
use storefront_core::models::NewProduct;

#[instrument(name = "handler::list_products", skip(app_state, _auth_user))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  _auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let products = app_state.products.list_products().await?;
  Ok(success(StatusCode::OK, "products fetched successfully", products))
}

#[instrument(
  name = "handler::create_product",
  skip(app_state, req_payload, auth_user),
  fields(user_id = auth_user.user_id)
)]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  req_payload: web::Json<NewProduct>,
) -> Result<HttpResponse, AppError> {
  let new_product = req_payload.into_inner();
  validate_new_product(&new_product)?;

  let product = app_state.products.create_product(&new_product).await?;
  info!(product_id = product.id, "Product created.");
  Ok(success(StatusCode::CREATED, "product created successfully", product))
}
