//! Order route handler.

use axum::{Json, extract::State};
use tracing::{info, instrument};

use vitrine_core::{OrderRequest, OrderResponse, OrderSummary, build_order_message};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Build the messaging deep link for an order.
///
/// The server cart is left untouched; the widget clears it after handing
/// the link off.
#[instrument(skip(state, order), fields(lines = order.items.len()))]
pub async fn create(
    State(state): State<AppState>,
    Json(order): Json<OrderRequest>,
) -> Result<Json<OrderResponse>> {
    if order.items.is_empty() {
        return Err(AppError::BadRequest("Carrinho vazio".to_string()));
    }

    let message = build_order_message(&order.items);
    let whatsapp_url = state.deep_link().url(&message);

    let summary = OrderSummary::from_lines(&order.items);
    info!(
        items = summary.total_items,
        total = %summary.total_amount,
        "Order link created"
    );

    Ok(Json(OrderResponse { whatsapp_url }))
}
