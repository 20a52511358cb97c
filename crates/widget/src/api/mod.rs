//! Cart API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP with `reqwest`
//! - The server is the source of truth for the remote-backed cart
//! - Quantities are always sent as absolute values
//!
//! # Endpoints
//!
//! - `GET /items/` - catalog
//! - `GET /cart/`, `POST /cart/`, `DELETE /cart/{id}`, `DELETE /cart/` - cart lines
//! - `POST /order/` - order message deep link
//! - `GET /health/` - liveness
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrine_widget::api::CartApiClient;
//!
//! let client = CartApiClient::new("http://127.0.0.1:8000", Duration::from_secs(10))?;
//!
//! let lines = client.get_cart().await?;
//! let url = client.create_order(&lines).await?;
//! ```

mod client;

pub use client::CartApiClient;

use thiserror::Error;

/// Errors that can occur when talking to the cart API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Cart API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured base URL is not usable.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Whether the API reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == reqwest::StatusCode::NOT_FOUND)
    }
}
