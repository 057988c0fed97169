// app/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use storefront_core::{FlowError, ShopError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("{0}")]
  Validation(String),

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  Auth(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Storage Error: {0}")]
  Storage(#[source] anyhow::Error),

  #[error("Workflow Error: {source}")]
  Workflow {
    #[from]
    source: FlowError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<ShopError> for AppError {
  fn from(err: ShopError) -> Self {
    match err {
      ShopError::Validation(m) => AppError::Validation(m),
      ShopError::NotFound(m) => AppError::NotFound(m),
      ShopError::Auth(m) => AppError::Auth(m),
      ShopError::Storage(source) => match source.downcast::<sqlx::Error>() {
        Ok(sqlx_err) => AppError::Sqlx(sqlx_err),
        Err(other) => AppError::Storage(other),
      },
      ShopError::Internal(m) => AppError::Internal(m),
      ShopError::Flow(source) => AppError::Workflow { source },
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      // Unknown products in a cart are a client mistake, reported like any other bad input.
      AppError::Validation(_) | AppError::NotFound(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::Config(_)
      | AppError::Sqlx(_)
      | AppError::Storage(_)
      | AppError::Workflow { .. }
      | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let message = match self {
      AppError::Validation(m) | AppError::NotFound(m) | AppError::Auth(m) => {
        tracing::warn!(status = status.as_u16(), error = %m, "Request rejected");
        m.clone()
      }
      AppError::Sqlx(_) | AppError::Storage(_) => {
        tracing::error!(application_error = %self, "Responding with storage error");
        "database operation failed".to_string()
      }
      AppError::Config(_) | AppError::Workflow { .. } | AppError::Internal(_) => {
        tracing::error!(application_error = %self, "Responding with internal error");
        "an internal error occurred".to_string()
      }
    };
    HttpResponse::build(status).json(json!({ "error": message }))
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::body::to_bytes;

  async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
    let resp = err.error_response();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body()).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  #[actix_rt::test]
  async fn maps_shop_errors_to_statuses() {
    let cases = vec![
      (ShopError::validation("insufficient quantity for product 1"), StatusCode::BAD_REQUEST),
      (ShopError::not_found("one or more products not found"), StatusCode::BAD_REQUEST),
      (ShopError::auth("invalid token"), StatusCode::UNAUTHORIZED),
      (ShopError::storage(anyhow::anyhow!("connection reset")), StatusCode::INTERNAL_SERVER_ERROR),
      (ShopError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (shop_err, expected) in cases {
      assert_eq!(AppError::from(shop_err).status_code(), expected);
    }
  }

  #[actix_rt::test]
  async fn client_errors_echo_their_message() {
    let (status, body) = body_of(AppError::from(ShopError::not_found("one or more products not found"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "one or more products not found" }));
  }

  #[actix_rt::test]
  async fn server_errors_hide_details() {
    let (status, body) = body_of(AppError::from(ShopError::storage(anyhow::anyhow!("password=hunter2")))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "database operation failed" }));
  }

  #[test]
  fn storage_errors_keep_sqlx_source() {
    let err = AppError::from(ShopError::storage(sqlx::Error::RowNotFound));
    assert!(matches!(err, AppError::Sqlx(sqlx::Error::RowNotFound)));
  }
}
