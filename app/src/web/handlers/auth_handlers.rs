// app/src/web/handlers/auth_handlers.rs

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::pipelines::contexts::{SigninCtxData, SignupCtxData};
use crate::state::AppState;
use crate::web::responses::success;
use storefront_core::models::User;
use storefront_core::{ContextData, PipelineResult};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestPayload {
  #[serde(default)]
  pub first_name: String,
  #[serde(default)]
  pub last_name: String,
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginRequestPayload {
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub password: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
  pub id: i64,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
}

impl From<&User> for UserView {
  fn from(u: &User) -> Self {
    Self {
      id: u.id,
      first_name: u.first_name.clone(),
      last_name: u.last_name.clone(),
      email: u.email.clone(),
    }
  }
}

#[derive(Serialize, Debug)]
pub struct AuthPayload {
  pub token: String,
  pub user: UserView,
}

fn auth_payload(user: Option<&User>, token: Option<&String>) -> Result<AuthPayload, AppError> {
  match (user, token) {
    (Some(user), Some(token)) => Ok(AuthPayload {
      token: token.clone(),
      user: user.into(),
    }),
    _ => Err(AppError::Internal("pipeline completed without user or token".to_string())),
  }
}

#[instrument(name = "handler::register", skip(app_state, req_payload), fields(req_email = %req_payload.email))]
pub async fn register_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<RegisterRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  let ctx_data = ContextData::new(SignupCtxData::new(
    app_state.users.clone(),
    app_state.tokens.clone(),
    payload.first_name,
    payload.last_name,
    payload.email,
    payload.password,
  ));

  match app_state.flows.run(ctx_data.clone()).await? {
    PipelineResult::Completed => {
      let body = {
        let guard = ctx_data.read();
        auth_payload(guard.created_user.as_ref(), guard.token.as_ref())?
      };
      info!(user_id = body.user.id, "User registered.");
      Ok(success(StatusCode::CREATED, "user created successfully", body))
    }
    PipelineResult::Stopped => {
      warn!("Signup pipeline stopped early.");
      Err(AppError::Internal("signup did not complete".to_string()))
    }
  }
}

#[instrument(name = "handler::login", skip(app_state, req_payload), fields(req_email = %req_payload.email))]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<LoginRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  let ctx_data = ContextData::new(SigninCtxData::new(
    app_state.users.clone(),
    app_state.tokens.clone(),
    payload.email,
    payload.password,
  ));

  match app_state.flows.run(ctx_data.clone()).await? {
    PipelineResult::Completed => {
      let body = {
        let guard = ctx_data.read();
        auth_payload(guard.user.as_ref(), guard.token.as_ref())?
      };
      Ok(success(StatusCode::OK, "login successful", body))
    }
    PipelineResult::Stopped => {
      warn!("Signin pipeline stopped early.");
      Err(AppError::Internal("signin did not complete".to_string()))
    }
  }
}
