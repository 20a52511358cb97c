//! HTTP route handlers for the cart API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health/        - Health check
//!
//! # Catalog
//! GET    /items/         - Product listing
//! GET    /items/{id}     - Product detail (404 if unknown)
//!
//! # Cart
//! GET    /cart/          - Cart lines
//! POST   /cart/          - Upsert a line (absolute quantity)
//! DELETE /cart/{id}      - Remove a line (404 if absent)
//! DELETE /cart/          - Clear the cart
//!
//! # Order
//! POST   /order/         - Build the messaging deep link (400 if empty)
//! ```

pub mod cart;
pub mod health;
pub mod items;
pub mod order;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/items/", get(items::index))
        .route("/items/{id}", get(items::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/cart/",
            get(cart::show).post(cart::upsert).delete(cart::clear),
        )
        .route("/cart/{id}", delete(cart::remove))
}

/// Create all routes for the cart API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health/", get(health::health))
        .merge(item_routes())
        .merge(cart_routes())
        .route("/order/", post(order::create))
}
