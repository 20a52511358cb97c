//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `VITRINE_SERVER_HOST` - Bind address (default: 127.0.0.1)
//! - `VITRINE_SERVER_PORT` - Listen port (default: 8000)
//! - `VITRINE_ALLOWED_ORIGIN` - Frontend origin allowed by CORS (default: <http://localhost:8080>)
//! - `VITRINE_CATALOG_PATH` - Catalog JSON file (default: crates/server/content/catalog.json)
//! - `VITRINE_WHATSAPP_NUMBER` - Order recipient (default: 5537991243408)
//! - `VITRINE_MESSAGING_BASE` - Deep link base URL (default: <https://wa.me>)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use axum::http::HeaderValue;
use thiserror::Error;

use vitrine_core::{DeepLink, RecipientId};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart API server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Origin allowed to call the API from a browser
    pub allowed_origin: HeaderValue,
    /// Catalog served by `/items/`
    pub catalog_path: PathBuf,
    /// Phone number orders are sent to
    pub whatsapp_number: RecipientId,
    /// Messaging deep link base URL
    pub messaging_base: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. production, staging)
    pub sentry_environment: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = get("VITRINE_SERVER_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("VITRINE_SERVER_HOST".to_string(), e.to_string())
            })?;
        let port = get("VITRINE_SERVER_PORT", "8000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("VITRINE_SERVER_PORT".to_string(), e.to_string())
            })?;
        let allowed_origin = get("VITRINE_ALLOWED_ORIGIN", "http://localhost:8080")
            .parse::<HeaderValue>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("VITRINE_ALLOWED_ORIGIN".to_string(), e.to_string())
            })?;

        let whatsapp_number = get("VITRINE_WHATSAPP_NUMBER", "5537991243408");
        if whatsapp_number.is_empty() || !whatsapp_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidEnvVar(
                "VITRINE_WHATSAPP_NUMBER".to_string(),
                "must contain digits only".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            allowed_origin,
            catalog_path: PathBuf::from(get(
                "VITRINE_CATALOG_PATH",
                "crates/server/content/catalog.json",
            )),
            whatsapp_number: RecipientId::new(whatsapp_number),
            messaging_base: get("VITRINE_MESSAGING_BASE", DeepLink::DEFAULT_BASE),
            sentry_dsn: lookup("SENTRY_DSN").filter(|v| !v.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// The deep link orders are sent to.
    #[must_use]
    pub fn deep_link(&self) -> DeepLink {
        DeepLink::new(&self.messaging_base, self.whatsapp_number.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8000");
        assert_eq!(config.allowed_origin, "http://localhost:8080");
        assert_eq!(
            config.catalog_path,
            PathBuf::from("crates/server/content/catalog.json")
        );
        assert!(config.sentry_dsn.is_none());
        assert_eq!(
            config.deep_link().url("x"),
            "https://wa.me/5537991243408?text=x"
        );
    }

    #[test]
    fn test_socket_addr() {
        let config = load(&[
            ("VITRINE_SERVER_HOST", "0.0.0.0"),
            ("VITRINE_SERVER_PORT", "9000"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9000");
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("VITRINE_SERVER_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "VITRINE_SERVER_PORT"));
    }

    #[test]
    fn test_invalid_host() {
        assert!(load(&[("VITRINE_SERVER_HOST", "localhost")]).is_err());
    }

    #[test]
    fn test_empty_sentry_dsn_is_disabled() {
        let config = load(&[("SENTRY_DSN", "")]).unwrap();
        assert!(config.sentry_dsn.is_none());
    }
}
