// app/src/main.rs

mod config;
mod db;
mod errors;
mod pipelines;
mod services;
mod state;
mod web;

use crate::config::{AppConfig, LogFormat};
use crate::db::PgStore;
use crate::services::token_service::TokenService;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use std::sync::Arc;
use storefront_core::{CheckoutOrchestrator, Flows};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE);
  match format {
    LogFormat::Json => builder.json().init(),
    LogFormat::Pretty => builder.init(),
  }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      init_tracing(LogFormat::Pretty);
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::other(e.to_string()));
    }
  };
  init_tracing(app_config.log_format);
  tracing::info!(config = ?app_config, "Starting storefront server...");

  let db_pool = db::connect(&app_config).await.map_err(|e| {
    tracing::error!(error = %e, "Failed to connect to the database.");
    std::io::Error::other(e)
  })?;

  if app_config.run_migrations {
    db::run_migrations(&db_pool).await.map_err(|e| {
      tracing::error!(error = %e, "Failed to apply migrations.");
      std::io::Error::other(e)
    })?;
  }

  let store = Arc::new(PgStore::new(db_pool));
  let flows = Arc::new(Flows::new());
  pipelines::register_all_pipelines(&flows);
  let orchestrator = CheckoutOrchestrator::new(flows.clone(), store.clone(), store.clone(), store.clone());

  let app_state = AppState {
    flows,
    orchestrator,
    products: store.clone(),
    users: store,
    tokens: TokenService::new(&app_config.jwt_secret, app_config.jwt_expiration_secs),
  };

  let server_address = app_config.bind_address();
  tracing::info!("Binding server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
