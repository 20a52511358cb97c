//! Widget configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `VITRINE_CART_BACKEND` - `memory`, `local` or `remote` (default: local)
//! - `VITRINE_STORAGE_DIR` - Directory for the local cart file (default: .vitrine)
//! - `VITRINE_STORAGE_KEY` - Local cart file name without extension (default: cart)
//! - `VITRINE_API_URL` - Cart API base URL (default: <http://127.0.0.1:8000>)
//! - `VITRINE_API_TIMEOUT_SECS` - Cart API request timeout (default: 10)
//! - `VITRINE_WHATSAPP_NUMBER` - Order recipient (default: 5537991243408)
//! - `VITRINE_MESSAGING_BASE` - Deep link base URL (default: <https://wa.me>)
//! - `VITRINE_ORDER_LINK` - `local` or `remote` (default: local)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use vitrine_core::{DeepLink, RecipientId};

use crate::api::{ApiError, CartApiClient};
use crate::finalize::OrderLinkSource;
use crate::persistence::{CartPersistence, DEFAULT_KEY, LocalStorage, MemoryPersistence, RemotePersistence};

const DEFAULT_STORAGE_DIR: &str = ".vitrine";
const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_API_TIMEOUT_SECS: u64 = 10;
const DEFAULT_WHATSAPP_NUMBER: &str = "5537991243408";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Cart API client: {0}")]
    Api(#[from] ApiError),
}

/// Which persistence strategy backs the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    Memory,
    #[default]
    Local,
    Remote,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "local" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            other => Err(format!("unknown backend '{other}' (expected memory, local or remote)")),
        }
    }
}

/// Where the checkout deep link is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderLinkKind {
    #[default]
    Local,
    Remote,
}

impl FromStr for OrderLinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            other => Err(format!("unknown order link source '{other}' (expected local or remote)")),
        }
    }
}

/// Cart widget configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub backend: BackendKind,
    /// Directory holding the local cart file
    pub storage_dir: PathBuf,
    /// Local cart file name (without `.json`)
    pub storage_key: String,
    /// Cart API base URL
    pub api_url: String,
    pub api_timeout: Duration,
    /// Phone number orders are sent to
    pub whatsapp_number: RecipientId,
    /// Messaging deep link base URL
    pub messaging_base: String,
    pub order_link: OrderLinkKind,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_key: DEFAULT_KEY.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            whatsapp_number: RecipientId::new(DEFAULT_WHATSAPP_NUMBER),
            messaging_base: DeepLink::DEFAULT_BASE.to_string(),
            order_link: OrderLinkKind::default(),
        }
    }
}

impl WidgetConfig {
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
        let defaults = Self::default();
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let backend = parse_var("VITRINE_CART_BACKEND", &get("VITRINE_CART_BACKEND", "local"))?;
        let order_link = parse_var("VITRINE_ORDER_LINK", &get("VITRINE_ORDER_LINK", "local"))?;
        let timeout_secs: u64 = parse_var(
            "VITRINE_API_TIMEOUT_SECS",
            &get("VITRINE_API_TIMEOUT_SECS", &DEFAULT_API_TIMEOUT_SECS.to_string()),
        )?;

        let storage_key = get("VITRINE_STORAGE_KEY", &defaults.storage_key);
        if storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "VITRINE_STORAGE_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let whatsapp_number = get("VITRINE_WHATSAPP_NUMBER", DEFAULT_WHATSAPP_NUMBER);
        if whatsapp_number.is_empty() || !whatsapp_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidEnvVar(
                "VITRINE_WHATSAPP_NUMBER".to_string(),
                "must contain digits only".to_string(),
            ));
        }

        Ok(Self {
            backend,
            storage_dir: lookup("VITRINE_STORAGE_DIR").map_or(defaults.storage_dir, PathBuf::from),
            storage_key,
            api_url: get("VITRINE_API_URL", &defaults.api_url),
            api_timeout: Duration::from_secs(timeout_secs),
            whatsapp_number: RecipientId::new(whatsapp_number),
            messaging_base: get("VITRINE_MESSAGING_BASE", &defaults.messaging_base),
            order_link,
        })
    }

    /// Build a client for the configured cart API.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is invalid.
    pub fn api_client(&self) -> Result<CartApiClient, ConfigError> {
        Ok(CartApiClient::new(&self.api_url, self.api_timeout)?)
    }

    /// Build the configured persistence strategy.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote backend is selected and the API URL is
    /// invalid.
    pub fn build_persistence(&self) -> Result<Box<dyn CartPersistence>, ConfigError> {
        Ok(match self.backend {
            BackendKind::Memory => Box::new(MemoryPersistence::new()),
            BackendKind::Local => Box::new(LocalStorage::new(&self.storage_dir, &self.storage_key)),
            BackendKind::Remote => Box::new(RemotePersistence::new(self.api_client()?)),
        })
    }

    /// The locally built deep link.
    #[must_use]
    pub fn deep_link(&self) -> DeepLink {
        DeepLink::new(&self.messaging_base, self.whatsapp_number.clone())
    }

    /// Build the configured order link source.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote source is selected and the API URL is
    /// invalid.
    pub fn build_link_source(&self) -> Result<OrderLinkSource, ConfigError> {
        Ok(match self.order_link {
            OrderLinkKind::Local => OrderLinkSource::Local(self.deep_link()),
            OrderLinkKind::Remote => OrderLinkSource::Remote(self.api_client()?),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable's value, naming the variable in the error.
fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
