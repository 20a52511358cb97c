//! Vitrine cart API.
//!
//! This crate provides the cart/order service as a library, allowing it to
//! be tested and embedded (the integration tests serve [`app`] on an
//! ephemeral port).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use axum::http::{Method, header};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the router with CORS and request tracing.
///
/// Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.config().allowed_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    routes::routes()
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
