//! Cart panel view-model.
//!
//! A pure projection of the store: rendering twice without a mutation in
//! between yields equal view-models. Money is pre-formatted so the
//! presentation layer only places strings.

use serde::Serialize;

use vitrine_core::{CartLine, OrderSummary, ProductId};

use crate::store::CartStore;

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub id: ProductId,
    pub name: String,
    /// Unit price, e.g. `R$ 20,00`.
    pub unit_price: String,
    pub quantity: u32,
    /// Unit price times quantity.
    pub line_total: String,
    pub image: Option<String>,
}

/// Everything the cart panel displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartViewModel {
    pub total_items: u32,
    pub total_amount: String,
    pub lines: Vec<CartLineView>,
    pub is_empty: bool,
    pub checkout_enabled: bool,
}

impl CartViewModel {
    /// View of an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_lines(&[])
    }

    /// Project a set of lines, keeping their order.
    #[must_use]
    pub fn from_lines(lines: &[CartLine]) -> Self {
        let summary = OrderSummary::from_lines(lines);
        let is_empty = summary.total_items == 0;

        Self {
            total_items: summary.total_items,
            total_amount: summary.total_amount.to_string(),
            lines: lines.iter().map(CartLineView::from).collect(),
            is_empty,
            checkout_enabled: !is_empty,
        }
    }
}

impl Default for CartViewModel {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.clone(),
            name: line.name.clone(),
            unit_price: line.unit_price.to_string(),
            quantity: line.quantity,
            line_total: line.line_total().to_string(),
            image: line.image.clone(),
        }
    }
}

/// Render the cart panel for the current store state.
#[must_use]
pub fn render_view(store: &CartStore) -> CartViewModel {
    CartViewModel::from_lines(store.lines())
}
