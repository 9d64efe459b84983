//! Server configuration from environment variables.
//!
//! - `API_HOST`: bind address (default "0.0.0.0")
//! - `API_PORT`: listen port (default 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: trace/debug/info/warn/error (default "info")
//! - `API_CORS_ORIGINS`: comma-separated allowed origins (optional)
//! - `API_REQUEST_TIMEOUT_SECONDS`: per-request timeout (default 30)

use std::env;
use std::str::FromStr;

use eyre::{Result, WrapErr};
use tracing::Level;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub log_level: Level,
    pub cors_origins: Option<Vec<String>>,
    /// Request timeout in seconds.
    pub request_timeout: u64,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl ApiConfig {
    /// Loads the configuration, failing only on an unset `DATABASE_URL` or
    /// an unparseable `API_PORT`. Everything else has a default.
    pub fn from_env() -> Result<Self> {
        let port = var_or("API_PORT", "3000")
            .parse()
            .wrap_err("Invalid API_PORT value")?;
        let database_url =
            env::var("DATABASE_URL").wrap_err("DATABASE_URL environment variable must be set")?;
        let log_level = Level::from_str(&var_or("LOG_LEVEL", "info")).unwrap_or(Level::INFO);
        let cors_origins = env::var("API_CORS_ORIGINS")
            .ok()
            .map(|origins| origins.split(',').map(|s| s.trim().to_string()).collect());
        let request_timeout = var_or("API_REQUEST_TIMEOUT_SECONDS", "30")
            .parse()
            .unwrap_or(30);

        Ok(Self {
            host: var_or("API_HOST", "0.0.0.0"),
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
        })
    }

    /// Bind address, e.g. "0.0.0.0:3000".
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
