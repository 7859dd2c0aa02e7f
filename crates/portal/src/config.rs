//! Portal configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `KOST_BACKEND_URL` - Base URL of the kost REST backend
//!
//! ## Optional
//! - `PORTAL_HOST` - Bind address (default: 127.0.0.1)
//! - `PORTAL_PORT` - Listen port (default: 3000)
//! - `KOST_VERIFY_DELAY_MS` - Delay before the background session
//!   verification fires (default: 1000)
//! - `KOST_VERIFY_TIMEOUT_MS` - Timeout for the verification call
//!   (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use url::Url;

/// Default delay before the background who-am-I verification runs.
const DEFAULT_VERIFY_DELAY_MS: u64 = 1000;

/// Default timeout for the background who-am-I verification.
const DEFAULT_VERIFY_TIMEOUT_MS: u64 = 3000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Portal application configuration.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Base URL of the kost REST backend
    pub backend_url: Url,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Delay before the background session verification fires
    pub verify_delay_ms: u64,
    /// Timeout for the background session verification call
    pub verify_timeout_ms: u64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl PortalConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let backend_url = parse_backend_url(&get_required_env("KOST_BACKEND_URL")?)?;
        let host = get_env_or_default("PORTAL_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORTAL_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("PORTAL_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORTAL_PORT".to_owned(), e.to_string()))?;
        let verify_delay_ms = parse_millis("KOST_VERIFY_DELAY_MS", DEFAULT_VERIFY_DELAY_MS)?;
        let verify_timeout_ms = parse_millis("KOST_VERIFY_TIMEOUT_MS", DEFAULT_VERIFY_TIMEOUT_MS)?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            backend_url,
            host,
            port,
            verify_delay_ms,
            verify_timeout_ms,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse and validate the backend base URL.
fn parse_backend_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("KOST_BACKEND_URL".to_owned(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            "KOST_BACKEND_URL".to_owned(),
            "must be an absolute http(s) URL".to_owned(),
        ));
    }
    Ok(url)
}

/// Parse an optional millisecond duration variable.
fn parse_millis(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn backend_url_must_be_a_base() {
        assert!(parse_backend_url("http://localhost:8080").is_ok());
        assert!(parse_backend_url("mailto:admin@kost.id").is_err());
        assert!(parse_backend_url("not a url").is_err());
    }

    #[test]
    fn socket_addr_combines_host_and_port() {
        let config = PortalConfig {
            backend_url: Url::parse("http://localhost:8080").unwrap(),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            verify_delay_ms: DEFAULT_VERIFY_DELAY_MS,
            verify_timeout_ms: DEFAULT_VERIFY_TIMEOUT_MS,
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
