//! Cart line types.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Product data read from the catalog when a line is first created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInfo {
    /// Catalog product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price at the moment the product was read.
    pub unit_price: Price,
    /// Optional image reference.
    pub image: Option<String>,
}

impl ProductInfo {
    /// Build a cart line for this product with the given quantity.
    #[must_use]
    pub fn into_line(self, quantity: u32) -> CartLine {
        CartLine {
            id: self.id,
            name: self.name,
            unit_price: self.unit_price,
            quantity,
            image: self.image,
        }
    }
}

/// One product's entry in the cart.
///
/// The wire shape (`id`, `name`, `price`, `qty`, `image`) is shared by the
/// cart API and the local storage snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product identifier, unique within a cart.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price, frozen when the line was created.
    #[serde(rename = "price")]
    pub unit_price: Price,
    /// Quantity, never zero while the line is stored.
    #[serde(rename = "qty")]
    pub quantity: u32,
    /// Optional image reference.
    #[serde(default)]
    pub image: Option<String>,
}

impl CartLine {
    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }

    /// The product data this line was created from.
    #[must_use]
    pub fn product_info(&self) -> ProductInfo {
        ProductInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            unit_price: self.unit_price,
            image: self.image.clone(),
        }
    }
}
