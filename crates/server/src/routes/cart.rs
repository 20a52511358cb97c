//! Cart route handlers.
//!
//! The cart is process-wide and shared by every client. Writes carry
//! absolute quantities; the last write for an id wins.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::{info, instrument};

use vitrine_core::{CartLine, CartResponse, MessageResponse, ProductId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Return every cart line.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<Vec<CartLine>> {
    Json(state.cart().read().await.to_vec())
}

/// Insert or replace one line.
#[instrument(skip(state, line), fields(id = %line.id, qty = line.quantity))]
pub async fn upsert(State(state): State<AppState>, Json(line): Json<CartLine>) -> Json<CartResponse> {
    let mut cart = state.cart().write().await;
    cart.upsert(line);
    info!("Cart line upserted");

    Json(CartResponse {
        message: "Item adicionado ao carrinho".to_string(),
        cart: cart.to_vec(),
    })
}

/// Remove one line.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<CartResponse>> {
    let mut cart = state.cart().write().await;
    if !cart.remove(&id) {
        return Err(AppError::NotFound(
            "Item não encontrado no carrinho".to_string(),
        ));
    }
    info!("Cart line removed");

    Ok(Json(CartResponse {
        message: "Item removido do carrinho".to_string(),
        cart: cart.to_vec(),
    }))
}

/// Remove every line.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<MessageResponse> {
    state.cart().write().await.clear();
    info!("Cart cleared");

    Json(MessageResponse {
        message: "Carrinho limpo".to_string(),
    })
}
