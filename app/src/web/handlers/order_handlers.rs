// app/src/web/handlers/order_handlers.rs

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;
use crate::web::responses::success;
use storefront_core::models::CheckoutRequest;

#[instrument(
  name = "handler::create_order",
  skip(app_state, req_payload, auth_user),
  fields(user_id = auth_user.user_id, lines = req_payload.items.len())
)]
pub async fn create_order_handler(
  app_state: web::Data<AppState>,
  // Extractors run in argument order: authenticate before the body is parsed.
  auth_user: AuthenticatedUser,
  req_payload: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, AppError> {
  let order = app_state
    .orchestrator
    .checkout(auth_user.user_id, req_payload.into_inner())
    .await?;
  info!(order_id = order.id, total = %order.total, "Order created.");
  Ok(success(StatusCode::CREATED, "order created successfully", order))
}

#[instrument(name = "handler::list_orders", skip(app_state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn list_orders_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let orders = app_state.orchestrator.orders_for_user(auth_user.user_id).await?;
  Ok(success(StatusCode::OK, "orders fetched successfully", orders))
}
