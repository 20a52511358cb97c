//! Catalog grid synchronization.
//!
//! A [`CatalogEntry`] is the grid's attachment point for one product: the
//! data the markup declares (id, name, localized price text, image) plus
//! the quantity it displays.

use vitrine_core::{CatalogItem, Price, ProductId, ProductInfo};

use crate::store::CartStore;

/// One product card on the catalog grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: ProductId,
    pub name: String,
    /// Price as displayed, e.g. `R$ 31,90`.
    pub price_text: String,
    pub image: Option<String>,
    /// Quantity currently shown on the card.
    pub quantity_display: u32,
}

impl CatalogEntry {
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price_text: impl Into<String>,
        image: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price_text: price_text.into(),
            image,
            quantity_display: 0,
        }
    }

    /// Read the product data a new cart line is created from.
    ///
    /// Unparseable price text reads as zero.
    #[must_use]
    pub fn product_info(&self) -> ProductInfo {
        ProductInfo {
            id: self.id.clone(),
            name: self.name.trim().to_string(),
            unit_price: Price::parse(self.price_text.trim()),
            image: self.image.clone(),
        }
    }
}

impl From<&CatalogItem> for CatalogEntry {
    fn from(item: &CatalogItem) -> Self {
        let info = item.product_info();
        Self::new(info.id, info.name, info.unit_price.to_string(), info.image)
    }
}

/// Find the grid entry for a product.
#[must_use]
pub fn find_entry<'a>(entries: &'a [CatalogEntry], id: &ProductId) -> Option<&'a CatalogEntry> {
    entries.iter().find(|e| &e.id == id)
}

/// Write each product's cart quantity into its grid entry.
///
/// Idempotent; safe to call after every mutation.
pub fn sync_grid(entries: &mut [CatalogEntry], store: &CartStore) {
    for entry in entries {
        entry.quantity_display = store.quantity_of(&entry.id);
    }
}
