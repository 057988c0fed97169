// app/src/services/token_service.rs

//! Issues and verifies the HS256 bearer tokens that identify a user on protected routes.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use storefront_core::ShopError;
use tracing::{debug, error, instrument};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
  /// User id, as a decimal string.
  pub sub: String,
  pub exp: usize,
  pub iat: usize,
}

#[derive(Clone)]
pub struct TokenService {
  encoding: EncodingKey,
  decoding: DecodingKey,
  ttl: Duration,
}

impl TokenService {
  pub fn new(secret: &str, ttl_secs: i64) -> Self {
    Self {
      encoding: EncodingKey::from_secret(secret.as_bytes()),
      decoding: DecodingKey::from_secret(secret.as_bytes()),
      ttl: Duration::seconds(ttl_secs),
    }
  }

  #[instrument(name = "token_service::issue", skip(self))]
  pub fn issue(&self, user_id: i64) -> Result<String, ShopError> {
    let now = Utc::now();
    let claims = Claims {
      sub: user_id.to_string(),
      exp: (now + self.ttl).timestamp().max(0) as usize,
      iat: now.timestamp().max(0) as usize,
    };
    jsonwebtoken::encode(&Header::default(), &claims, &self.encoding).map_err(|e| {
      error!(error = %e, "Token signing failed.");
      ShopError::Internal(format!("token signing failed: {}", e))
    })
  }

  /// Returns the user id carried by a valid, unexpired token.
  pub fn verify(&self, token: &str) -> Result<i64, ShopError> {
    let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(|e| {
      debug!("Token validation failed: {e}");
      ShopError::auth("invalid token")
    })?;
    data.claims.sub.parse::<i64>().map_err(|_| ShopError::auth("invalid token"))
  }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, ShopError> {
  let header = header
    .filter(|h| !h.is_empty())
    .ok_or_else(|| ShopError::auth("authorization header is required"))?;
  let parts: Vec<&str> = header.split(' ').collect();
  match parts.as_slice() {
    ["Bearer", token] if !token.is_empty() => Ok(token),
    _ => Err(ShopError::auth("invalid authorization header format")),
  }
}
