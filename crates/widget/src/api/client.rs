//! Cart API client implementation.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use vitrine_core::{
    CartLine, CartResponse, CatalogItem, HealthStatus, MessageResponse, OrderRequest,
    OrderResponse, ProductId,
};

use super::ApiError;

/// Longest slice of a response body kept in errors and logs.
const MAX_BODY_SNIPPET: usize = 200;

/// Client for the cart API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CartApiClient {
    inner: Arc<CartApiClientInner>,
}

struct CartApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl std::fmt::Debug for CartApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CartApiClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or the HTTP client cannot
    /// be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            inner: Arc::new(CartApiClientInner { client, base_url }),
        })
    }

    /// The API root this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Send a request and return the body text of a successful response.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        // Read the body first so non-success statuses carry diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                body = %snippet(&body),
                "Cart API returned non-success status"
            );
            return Err(ApiError::Status {
                status,
                body: snippet(&body),
            });
        }

        Ok(body)
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.execute(request).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %snippet(&body),
                "Failed to parse cart API response"
            );
            ApiError::Parse(e)
        })
    }

    // =========================================================================
    // Cart Methods
    // =========================================================================

    /// Fetch every line of the server-side cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn get_cart(&self) -> Result<Vec<CartLine>, ApiError> {
        let request = self.inner.client.get(self.endpoint("cart/")?);
        let lines: Vec<CartLine> = self.execute_json(request).await?;
        debug!(lines = lines.len(), "Fetched cart");
        Ok(lines)
    }

    /// Upsert one line with its absolute quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self, line), fields(id = %line.id, qty = line.quantity))]
    pub async fn upsert_line(&self, line: &CartLine) -> Result<Vec<CartLine>, ApiError> {
        let request = self.inner.client.post(self.endpoint("cart/")?).json(line);
        let response: CartResponse = self.execute_json(request).await?;
        Ok(response.cart)
    }

    /// Remove one line.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 if the server has no such line,
    /// or another error if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn remove_line(&self, id: &ProductId) -> Result<Vec<CartLine>, ApiError> {
        let path = format!("cart/{}", urlencoding::encode(id.as_str()));
        let request = self.inner.client.delete(self.endpoint(&path)?);
        let response: CartResponse = self.execute_json(request).await?;
        Ok(response.cart)
    }

    /// Remove every line.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<(), ApiError> {
        let request = self.inner.client.delete(self.endpoint("cart/")?);
        let response: MessageResponse = self.execute_json(request).await?;
        debug!(message = %response.message, "Cleared cart");
        Ok(())
    }

    // =========================================================================
    // Order & Catalog Methods
    // =========================================================================

    /// Submit the lines as an order and return the messaging deep link.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 400 for an empty order, or another
    /// error if the request fails.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn create_order(&self, lines: &[CartLine]) -> Result<String, ApiError> {
        let body = OrderRequest {
            items: lines.to_vec(),
        };
        let request = self.inner.client.post(self.endpoint("order/")?).json(&body);
        let response: OrderResponse = self.execute_json(request).await?;
        Ok(response.whatsapp_url)
    }

    /// List the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<CatalogItem>, ApiError> {
        let request = self.inner.client.get(self.endpoint("items/")?);
        self.execute_json(request).await
    }

    /// Check that the API is up.
    ///
    /// # Errors
    ///
    /// Returns an error if the API is unreachable or unhealthy.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let request = self.inner.client.get(self.endpoint("health/")?);
        self.execute_json(request).await
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(MAX_BODY_SNIPPET).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = CartApiClient::new("http://127.0.0.1:8000/api", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:8000/api/");
        assert_eq!(
            client.endpoint("cart/").unwrap().as_str(),
            "http://127.0.0.1:8000/api/cart/"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = CartApiClient::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_snippet_truncates() {
        assert_eq!(snippet(&"x".repeat(500)).len(), MAX_BODY_SNIPPET);
        assert_eq!(snippet("short"), "short");
    }

    #[test]
    fn test_debug_shows_base_url() {
        let client = CartApiClient::new("http://localhost:8000", Duration::from_secs(1)).unwrap();
        assert!(format!("{client:?}").contains("http://localhost:8000/"));
    }
}
