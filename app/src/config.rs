// app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

#[derive(Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub db_max_connections: u32,
  pub jwt_secret: String,
  pub jwt_expiration_secs: i64,
  pub run_migrations: bool,
  pub log_format: LogFormat,
}

// Secrets stay out of logs.
impl std::fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AppConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("database_url", &"[REDACTED]")
      .field("db_max_connections", &self.db_max_connections)
      .field("jwt_secret", &"[REDACTED]")
      .field("jwt_expiration_secs", &self.jwt_expiration_secs)
      .field("run_migrations", &self.run_migrations)
      .field("log_format", &self.log_format)
      .finish()
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok();
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from an arbitrary variable source; empty values count as unset.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |var_name: &str| {
      lookup(var_name)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Config(format!("Missing environment variable '{}'", var_name)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL")?;
    let db_max_connections = get_env("DB_MAX_CONNECTIONS")
      .unwrap_or_else(|_| "5".to_string())
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DB_MAX_CONNECTIONS: {}", e)))?;
    let jwt_secret = get_env("JWT_SECRET")?;
    let jwt_expiration_secs = get_env("JWT_EXPIRATION_SECS")
      .unwrap_or_else(|_| (60 * 60 * 24 * 7).to_string())
      .parse::<i64>()
      .map_err(|e| AppError::Config(format!("Invalid JWT_EXPIRATION_SECS: {}", e)))?;
    if jwt_expiration_secs <= 0 {
      return Err(AppError::Config("JWT_EXPIRATION_SECS must be positive".to_string()));
    }
    let run_migrations = get_env("RUN_MIGRATIONS")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid RUN_MIGRATIONS value: {}", e)))?;
    let log_format = match get_env("LOG_FORMAT").as_deref() {
      Ok("json") => LogFormat::Json,
      Ok("pretty") | Err(_) => LogFormat::Pretty,
      Ok(other) => return Err(AppError::Config(format!("Invalid LOG_FORMAT: {}", other))),
    };

    Ok(Self {
      server_host,
      server_port,
      database_url,
      db_max_connections,
      jwt_secret,
      jwt_expiration_secs,
      run_migrations,
      log_format,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
