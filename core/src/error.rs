// core/src/error.rs

use thiserror::Error;

/// Wiring errors raised by the pipeline engine itself.
#[derive(Debug, Error)]
pub enum FlowError {
  #[error("handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("no pipeline registered for context type {type_name}")]
  NotRegistered { type_name: &'static str },

  #[error("context type mismatch, expected {expected_type}")]
  TypeMismatch { expected_type: &'static str },
}

/// Every failure a storefront operation can report.
///
/// The `Display` of the first three variants is exactly the message returned to
/// clients, so keep it free of prefixes.
#[derive(Debug, Error)]
pub enum ShopError {
  #[error("{0}")]
  Validation(String),

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  Auth(String),

  #[error("storage failure: {0}")]
  Storage(#[source] anyhow::Error),

  #[error("internal error: {0}")]
  Internal(String),

  #[error("workflow error: {0}")]
  Flow(#[from] FlowError),
}

impl ShopError {
  pub fn validation(msg: impl Into<String>) -> Self {
    ShopError::Validation(msg.into())
  }

  pub fn not_found(msg: impl Into<String>) -> Self {
    ShopError::NotFound(msg.into())
  }

  pub fn auth(msg: impl Into<String>) -> Self {
    ShopError::Auth(msg.into())
  }

  pub fn storage(err: impl Into<anyhow::Error>) -> Self {
    ShopError::Storage(err.into())
  }
}

pub type ShopResult<T, E = ShopError> = std::result::Result<T, E>;
