// app/src/pipelines/signup_pipeline.rs

use crate::pipelines::contexts::SignupCtxData;
use crate::services::{auth_service, validation};
use storefront_core::models::NewUser;
use storefront_core::{ContextData, Flows, Pipeline, PipelineControl, ShopError};
use tracing::{event, info, warn, Level};

pub fn build_signup_pipeline() -> Pipeline<SignupCtxData> {
  let mut signup_p = Pipeline::<SignupCtxData>::new(&[
    ("validate_signup_input", false),
    ("check_existing_user", false),
    ("create_user", false),
    ("issue_token", false),
  ]);

  signup_p.on_root("validate_signup_input", |ctx_data: ContextData<SignupCtxData>| {
    Box::pin(async move {
      let guard = ctx_data.read();
      event!(Level::DEBUG, email = %guard.email, "Validating signup input.");
      validation::validate_registration(&guard.first_name, &guard.last_name, &guard.email, &guard.password)?;
      Ok::<_, ShopError>(PipelineControl::Continue)
    })
  });

  signup_p.on_root("check_existing_user", |ctx_data: ContextData<SignupCtxData>| {
    Box::pin(async move {
      let (email, users) = {
        let guard = ctx_data.read();
        (guard.email.clone(), guard.users.clone())
      };

      if users.get_user_by_email(&email).await?.is_some() {
        warn!("Signup attempted with an existing email.");
        return Err(ShopError::validation(format!("user with email {} already exists", email)));
      }
      Ok::<_, ShopError>(PipelineControl::Continue)
    })
  });

  signup_p.on_root("create_user", |ctx_data: ContextData<SignupCtxData>| {
    Box::pin(async move {
      let (new_user, users) = {
        let guard = ctx_data.read();
        let password_hash = auth_service::hash_password(&guard.password)?;
        (
          NewUser {
            first_name: guard.first_name.clone(),
            last_name: guard.last_name.clone(),
            email: guard.email.clone(),
            password_hash,
          },
          guard.users.clone(),
        )
      };

      let user = users.create_user(&new_user).await?;
      info!(user_id = user.id, "User created.");
      ctx_data.write().created_user = Some(user);
      Ok::<_, ShopError>(PipelineControl::Continue)
    })
  });

  signup_p.on_root("issue_token", |ctx_data: ContextData<SignupCtxData>| {
    Box::pin(async move {
      let mut guard = ctx_data.write();
      let user_id = guard
        .created_user
        .as_ref()
        .map(|u| u.id)
        .ok_or_else(|| ShopError::Internal("user missing before token issue".to_string()))?;
      let token = guard.tokens.issue(user_id)?;
      guard.token = Some(token);
      Ok::<_, ShopError>(PipelineControl::Continue)
    })
  });

  signup_p
}

pub fn register_signup_pipeline(flows: &Flows) {
  flows.register_pipeline(build_signup_pipeline());
  tracing::info!("Sign-up pipeline registered.");
}
