// app/src/web/routes.rs

use crate::errors::AppError;
use crate::web::handlers::{auth_handlers, order_handlers, product_handlers};
use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  AppError::Validation(format!("invalid request body: {}", err)).into()
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .app_data(web::JsonConfig::default().error_handler(json_error_handler))
      .route("/health", web::get().to(health_check_handler))
      .route("/register", web::post().to(auth_handlers::register_handler))
      .route("/login", web::post().to(auth_handlers::login_handler))
      .route("/products", web::get().to(product_handlers::list_products_handler))
      .route("/products/create", web::post().to(product_handlers::create_product_handler))
      .route("/order", web::post().to(order_handlers::create_order_handler))
      .route("/orders", web::get().to(order_handlers::list_orders_handler)),
  );
}
