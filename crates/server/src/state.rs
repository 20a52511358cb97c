//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use vitrine_core::{CartLine, DeepLink, ProductId};

use crate::catalog::Catalog;
use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog and the process-wide cart.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    catalog: Catalog,
    cart: RwLock<CartLines>,
    deep_link: DeepLink,
}

impl AppState {
    /// Create a new application state with an empty cart.
    #[must_use]
    pub fn new(config: ServerConfig, catalog: Catalog) -> Self {
        let deep_link = config.deep_link();
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: RwLock::new(CartLines::default()),
                deep_link,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// The server-side cart.
    #[must_use]
    pub fn cart(&self) -> &RwLock<CartLines> {
        &self.inner.cart
    }

    /// The deep link orders are sent to.
    #[must_use]
    pub fn deep_link(&self) -> &DeepLink {
        &self.inner.deep_link
    }
}

/// Cart lines keyed by product id, insertion-ordered.
///
/// Upserting an existing id replaces the line in place.
#[derive(Debug, Clone, Default)]
pub struct CartLines {
    lines: Vec<CartLine>,
}

impl CartLines {
    /// Insert or replace the line for `line.id`.
    pub fn upsert(&mut self, line: CartLine) {
        match self.lines.iter_mut().find(|l| l.id == line.id) {
            Some(existing) => *existing = line,
            None => self.lines.push(line),
        }
    }

    /// Remove a line. Returns whether it existed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| &l.id != id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<CartLine> {
        self.lines.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::{Price, ProductInfo};

    fn line(id: &str, qty: u32) -> CartLine {
        ProductInfo {
            id: ProductId::new(id),
            name: id.to_string(),
            unit_price: Price::from_cents(100),
            image: None,
        }
        .into_line(qty)
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut cart = CartLines::default();
        cart.upsert(line("a", 1));
        cart.upsert(line("b", 1));
        cart.upsert(line("a", 5));

        let lines = cart.to_vec();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].id, ProductId::new("a"));
        assert_eq!(lines[0].quantity, 5);
    }

    #[test]
    fn test_remove_reports_presence() {
        let mut cart = CartLines::default();
        cart.upsert(line("a", 1));
        assert!(cart.remove(&ProductId::new("a")));
        assert!(!cart.remove(&ProductId::new("a")));
    }
}
