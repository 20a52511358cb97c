//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use vitrine_core::{CatalogItem, ProductId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// List every catalog item.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<CatalogItem>> {
    Json(state.catalog().items().to_vec())
}

/// Show one catalog item.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<CatalogItem>> {
    state
        .catalog()
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Item não encontrado".to_string()))
}
