// app/src/services/auth_service.rs

//! Argon2 password hashing for sign-up and sign-in.

use argon2::{
  password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Argon2,
};
use storefront_core::ShopError;
use tracing::{debug, error, instrument};

#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, ShopError> {
  if password.is_empty() {
    return Err(ShopError::validation("password is required"));
  }

  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| {
      error!(error = %e, "Argon2 password hashing failed.");
      ShopError::Internal(format!("password hashing failed: {}", e))
    })
}

/// `Ok(false)` on a mismatch; `Err` only when the stored hash itself is unusable.
#[instrument(
  name = "auth_service::verify_password",
  skip(stored_hash, provided),
  fields(hash_len = stored_hash.len()),
  err(Display)
)]
pub fn verify_password(stored_hash: &str, provided: &str) -> Result<bool, ShopError> {
  if provided.is_empty() {
    return Ok(false);
  }

  let parsed = PasswordHash::new(stored_hash).map_err(|e| {
    error!(error = %e, "Stored password hash could not be parsed.");
    ShopError::Internal(format!("invalid stored password hash: {}", e))
  })?;

  match Argon2::default().verify_password(provided.as_bytes(), &parsed) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => {
      debug!("Password mismatch.");
      Ok(false)
    }
    Err(e) => Err(ShopError::Internal(format!("password verification failed: {}", e))),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_then_verify() {
    let hash = hash_password("hunter22").unwrap();
    assert_ne!(hash, "hunter22");
    assert!(verify_password(&hash, "hunter22").unwrap());
    assert!(!verify_password(&hash, "hunter23").unwrap());
  }

  #[test]
  fn salts_differ_between_hashes() {
    assert_ne!(hash_password("samepass1").unwrap(), hash_password("samepass1").unwrap());
  }

  #[test]
  fn corrupt_stored_hash_is_internal() {
    assert!(matches!(verify_password("not-a-phc-string", "whatever1"), Err(ShopError::Internal(_))));
  }
}
