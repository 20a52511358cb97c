//! Catalog item served by the cart API.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::line::ProductInfo;
use super::price::Price;

/// A purchasable product as listed by `GET /items/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Weight and short description, e.g. `450g - queijo em palito artesanal`.
    pub details: String,
    pub image: String,
    pub category: String,
}

impl CatalogItem {
    /// Product data for creating a cart line from this item.
    #[must_use]
    pub fn product_info(&self) -> ProductInfo {
        ProductInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            unit_price: self.price,
            image: (!self.image.is_empty()).then(|| self.image.clone()),
        }
    }
}
