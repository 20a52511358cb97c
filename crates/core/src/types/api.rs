//! Request and response bodies of the cart API.
//!
//! Shared by the widget's HTTP client and the server's handlers so both
//! sides agree on the wire format.

use serde::{Deserialize, Serialize};

use super::line::CartLine;

/// Body of `POST /order/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub items: Vec<CartLine>,
}

/// Response of `POST /order/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub whatsapp_url: String,
}

/// Response of the cart mutations that return the resulting cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartResponse {
    pub message: String,
    pub cart: Vec<CartLine>,
}

/// Response carrying only a status message (e.g. `DELETE /cart/`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response of `GET /health/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Error body returned by the cart API on 4xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
