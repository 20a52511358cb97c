//! Product catalog loaded from a JSON file at startup.

use std::collections::HashSet;
use std::path::Path;

use vitrine_core::{CatalogItem, ProductId};

/// The products served by `/items/`, in file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Load the catalog from a JSON array of items.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a valid item
    /// list, or repeats an id.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        let catalog = Self::from_json(&content)?;
        tracing::info!(items = catalog.len(), path = %path.display(), "Catalog loaded");
        Ok(catalog)
    }

    /// Parse a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid item list or repeats an id.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let items: Vec<CatalogItem> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(items)
    }

    /// Build a catalog from items.
    ///
    /// # Errors
    ///
    /// Returns an error if two items share an id.
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        if let Some(dup) = items.iter().find(|i| !seen.insert(&i.id)) {
            return Err(CatalogError::DuplicateId(dup.id.clone()));
        }
        Ok(Self { items })
    }

    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CatalogItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Duplicate product id: {0}")]
    DuplicateId(ProductId),
}
