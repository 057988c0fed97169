// app/src/pipelines/signin_pipeline.rs

use crate::pipelines::contexts::SigninCtxData;
use crate::services::{auth_service, validation};
use storefront_core::{ContextData, Flows, Pipeline, PipelineControl, ShopError};
use tracing::{event, warn, Level};

const BAD_CREDENTIALS: &str = "invalid email or password";

pub fn build_signin_pipeline() -> Pipeline<SigninCtxData> {
  let mut signin_p = Pipeline::<SigninCtxData>::new(&[
    ("validate_signin_input", false),
    ("fetch_user_by_email", false),
    ("verify_password", false),
    ("issue_token", false),
  ]);

  signin_p.on_root("validate_signin_input", |ctx_data: ContextData<SigninCtxData>| {
    Box::pin(async move {
      let guard = ctx_data.read();
      validation::validate_login(&guard.email, &guard.password)?;
      Ok::<_, ShopError>(PipelineControl::Continue)
    })
  });

  signin_p.on_root("fetch_user_by_email", |ctx_data: ContextData<SigninCtxData>| {
    Box::pin(async move {
      let (email, users) = {
        let guard = ctx_data.read();
        (guard.email.clone(), guard.users.clone())
      };

      match users.get_user_by_email(&email).await? {
        Some(user) => {
          event!(Level::DEBUG, user_id = user.id, "User found for signin.");
          ctx_data.write().user = Some(user);
          Ok::<_, ShopError>(PipelineControl::Continue)
        }
        None => {
          warn!("Signin for unknown email.");
          Err(ShopError::auth(BAD_CREDENTIALS))
        }
      }
    })
  });

  signin_p.on_root("verify_password", |ctx_data: ContextData<SigninCtxData>| {
    Box::pin(async move {
      let guard = ctx_data.read();
      let user = guard
        .user
        .as_ref()
        .ok_or_else(|| ShopError::Internal("user missing before password check".to_string()))?;

      if !auth_service::verify_password(&user.password_hash, &guard.password)? {
        warn!(user_id = user.id, "Password mismatch on signin.");
        return Err(ShopError::auth(BAD_CREDENTIALS));
      }
      Ok::<_, ShopError>(PipelineControl::Continue)
    })
  });

  signin_p.on_root("issue_token", |ctx_data: ContextData<SigninCtxData>| {
    Box::pin(async move {
      let mut guard = ctx_data.write();
      let user_id = guard
        .user
        .as_ref()
        .map(|u| u.id)
        .ok_or_else(|| ShopError::Internal("user missing before token issue".to_string()))?;
      let token = guard.tokens.issue(user_id)?;
      guard.token = Some(token);
      Ok::<_, ShopError>(PipelineControl::Continue)
    })
  });

  signin_p
}

pub fn register_signin_pipeline(flows: &Flows) {
  flows.register_pipeline(build_signin_pipeline());
  tracing::info!("Sign-in pipeline registered.");
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::pipelines::contexts::SignupCtxData;
  use crate::pipelines::signup_pipeline::register_signup_pipeline;
  use crate::services::token_service::TokenService;
  use std::sync::Arc;
  use storefront_core::store::InMemoryStore;

  async fn registered(store: Arc<InMemoryStore>, flows: &Flows) {
    let signup = ContextData::new(SignupCtxData::new(
      store,
      TokenService::new("test-secret", 3600),
      "Grace".into(),
      "Hopper".into(),
      "grace@example.com".into(),
      "cobol1959".into(),
    ));
    flows.run(signup).await.unwrap();
  }

  fn signin(store: Arc<InMemoryStore>, email: &str, password: &str) -> ContextData<SigninCtxData> {
    ContextData::new(SigninCtxData::new(
      store,
      TokenService::new("test-secret", 3600),
      email.into(),
      password.into(),
    ))
  }

  fn flows() -> Flows {
    let flows = Flows::new();
    register_signup_pipeline(&flows);
    register_signin_pipeline(&flows);
    flows
  }

  #[actix_rt::test]
  async fn signs_in_with_correct_password() {
    let flows = flows();
    let store = Arc::new(InMemoryStore::new());
    registered(store.clone(), &flows).await;

    let data = signin(store, "grace@example.com", "cobol1959");
    flows.run(data.clone()).await.unwrap();

    let guard = data.read();
    let user_id = guard.user.as_ref().unwrap().id;
    assert_eq!(guard.tokens.verify(guard.token.as_ref().unwrap()).unwrap(), user_id);
  }

  #[actix_rt::test]
  async fn wrong_password_and_unknown_email_look_the_same() {
    let flows = flows();
    let store = Arc::new(InMemoryStore::new());
    registered(store.clone(), &flows).await;

    let wrong_pw = flows.run(signin(store.clone(), "grace@example.com", "fortran57")).await.unwrap_err();
    let unknown = flows.run(signin(store, "nobody@example.com", "cobol1959")).await.unwrap_err();
    assert!(matches!(wrong_pw, ShopError::Auth(ref m) if m == BAD_CREDENTIALS));
    assert!(matches!(unknown, ShopError::Auth(ref m) if m == BAD_CREDENTIALS));
  }

  #[actix_rt::test]
  async fn short_password_is_a_validation_error() {
    let flows = flows();
    let err = flows
      .run(signin(Arc::new(InMemoryStore::new()), "grace@example.com", "short"))
      .await
      .unwrap_err();
    assert_eq!(err.to_string(), "password must be at least 8 characters long");
  }
}
