// core/src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: i64,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  #[serde(skip_serializing, default)]
  pub password_hash: String,
  pub created_at: DateTime<Utc>,
}

/// A user about to be inserted. The password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub password_hash: String,
}
