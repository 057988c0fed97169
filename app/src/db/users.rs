// app/src/db/users.rs

use super::rows::{UserRecord, USER_COLUMNS};
use super::{storage_err, PgStore};
use async_trait::async_trait;
use storefront_core::models::{NewUser, User};
use storefront_core::store::UserStore;
use storefront_core::{ShopError, ShopResult};

#[async_trait]
impl UserStore for PgStore {
  async fn get_user_by_email(&self, email: &str) -> ShopResult<Option<User>> {
    let record: Option<UserRecord> = sqlx::query_as(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
      .bind(email)
      .fetch_optional(&self.pool)
      .await
      .map_err(storage_err)?;
    Ok(record.map(User::from))
  }

  async fn get_user_by_id(&self, id: i64) -> ShopResult<Option<User>> {
    let record: Option<UserRecord> = sqlx::query_as(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(storage_err)?;
    Ok(record.map(User::from))
  }

  async fn create_user(&self, user: &NewUser) -> ShopResult<User> {
    let result: Result<UserRecord, sqlx::Error> = sqlx::query_as(&format!(
      "INSERT INTO users (first_name, last_name, email, password_hash) VALUES ($1, $2, $3, $4) RETURNING {}",
      USER_COLUMNS
    ))
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .fetch_one(&self.pool)
    .await;

    match result {
      Ok(record) => Ok(record.into()),
      // Two sign-ups racing past the existence check.
      Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(ShopError::validation(format!(
        "user with email {} already exists",
        user.email
      ))),
      Err(e) => Err(storage_err(e)),
    }
  }
}
