// app/src/web/extractors.rs

use crate::errors::AppError;
use crate::services::token_service::bearer_token;
use crate::state::AppState;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

/// The caller identified by a valid `Authorization: Bearer` token whose user still exists.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
  pub user_id: i64,
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    // Header and state are read synchronously; only the user lookup is awaited.
    let verified = verify_bearer(req);
    Box::pin(async move {
      let (state, user_id) = verified?;
      if state.users.get_user_by_id(user_id).await?.is_none() {
        warn!(user_id, "Token refers to a user that no longer exists.");
        return Err(AppError::Auth("invalid token".to_string()));
      }
      Ok::<_, AppError>(AuthenticatedUser { user_id })
    })
  }
}

fn verify_bearer(req: &HttpRequest) -> Result<(web::Data<AppState>, i64), AppError> {
  let state = req
    .app_data::<web::Data<AppState>>()
    .cloned()
    .ok_or_else(|| AppError::Internal("application state not configured".to_string()))?;

  let header = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());
  let token = bearer_token(header)?;
  let user_id = state.tokens.verify(token).map_err(|e| {
    warn!("Rejected bearer token.");
    AppError::from(e)
  })?;
  Ok((state, user_id))
}
