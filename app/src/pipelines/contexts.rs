// app/src/pipelines/contexts.rs

//! Context data for the account pipelines.

use crate::services::token_service::TokenService;
use std::sync::Arc;
use storefront_core::models::User;
use storefront_core::store::UserStore;

pub struct SignupCtxData {
  pub users: Arc<dyn UserStore>,
  pub tokens: TokenService,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub password: String,

  pub created_user: Option<User>,
  pub token: Option<String>,
}

impl SignupCtxData {
  pub fn new(
    users: Arc<dyn UserStore>,
    tokens: TokenService,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
  ) -> Self {
    Self {
      users,
      tokens,
      first_name,
      last_name,
      email,
      password,
      created_user: None,
      token: None,
    }
  }
}

pub struct SigninCtxData {
  pub users: Arc<dyn UserStore>,
  pub tokens: TokenService,
  pub email: String,
  pub password: String,

  pub user: Option<User>,
  pub token: Option<String>,
}

impl SigninCtxData {
  pub fn new(users: Arc<dyn UserStore>, tokens: TokenService, email: String, password: String) -> Self {
    Self {
      users,
      tokens,
      email,
      password,
      user: None,
      token: None,
    }
  }
}
