//! Liveness endpoint.

use axum::Json;

use vitrine_core::HealthStatus;

/// Liveness health check endpoint.
///
/// Does not check dependencies.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "API is running".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    use crate::routes::test_support::{app, send_json};

    #[tokio::test]
    async fn test_health() {
        let (status, body): (_, HealthStatus) = send_json(&app(), "GET", "/health/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "API is running");
    }
}
