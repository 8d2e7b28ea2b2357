use crate::{catalog::DEFAULT_CATALOG_URL, url_builder::DEFAULT_RENDERER_URL};
use std::{env, net::SocketAddr, str::FromStr, time::Duration};
use thiserror::Error;

pub const DEFAULT_TEMPLATES_PAGE_URL: &str = "https://memegen.link/#templates";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid environment variable format for {0}: {1}")]
    InvalidVar(String, String),
    #[error(transparent)]
    DotEnvError(#[from] dotenvy::Error),
}

#[derive(Clone, Debug)] // Clone needed if passed around, Debug for logging
pub struct Config {
    pub bind_address: SocketAddr,
    pub catalog_url: String,
    pub renderer_url: String,
    pub templates_page_url: String,
    pub http_timeout: Duration,
    // Upper bound on retrying the startup catalog fetch
    pub catalog_max_retry: Duration,
    pub app_version: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env is fine; a malformed one is not
        match dotenvy::dotenv() {
            Ok(path) => tracing::info!(".env file loaded from path: {}", path.display()),
            Err(e) if e.not_found() => tracing::info!(".env file not found, relying on environment variables"),
            Err(e) => return Err(e.into()),
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; `load` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_address_str = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = SocketAddr::from_str(&bind_address_str)
            .map_err(|e| ConfigError::InvalidVar("BIND_ADDRESS".into(), e.to_string()))?;

        let catalog_url = lookup("MEMEGEN_CATALOG_URL").unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());
        let renderer_url = lookup("MEMEGEN_RENDERER_URL").unwrap_or_else(|| DEFAULT_RENDERER_URL.to_string());
        let templates_page_url =
            lookup("MEMEGEN_TEMPLATES_PAGE_URL").unwrap_or_else(|| DEFAULT_TEMPLATES_PAGE_URL.to_string());

        let http_timeout = Duration::from_secs(parse_secs(&lookup, "HTTP_TIMEOUT_SECS", 10)?);
        let catalog_max_retry = Duration::from_secs(parse_secs(&lookup, "CATALOG_MAX_RETRY_SECS", 30)?);

        let app_version = lookup("APP_VERSION").unwrap_or_else(|| "dev".to_string());

        Ok(Config {
            bind_address,
            catalog_url,
            renderer_url,
            templates_page_url,
            http_timeout,
            catalog_max_retry,
            app_version,
        })
    }
}

fn parse_secs(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<u64, ConfigError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidVar(key.into(), e.to_string())),
        None => Ok(default),
    }
}
