//! The cart store.
//!
//! Holds the authoritative cart lines in insertion order and writes every
//! change through to its persistence strategy before returning. Persistence
//! failures are logged and swallowed: the in-memory cart stays mutated and
//! the store remembers that the persisted copy is stale.

use tracing::{instrument, warn};

use vitrine_core::{CartLine, OrderSummary, ProductId, ProductInfo};

use crate::error::PersistenceError;
use crate::persistence::{CartPersistence, MemoryPersistence};

/// The cart: product id to line, insertion-ordered.
///
/// Invariant: no stored line has a quantity of zero.
pub struct CartStore {
    lines: Vec<CartLine>,
    persistence: Box<dyn CartPersistence>,
    synced: bool,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("persistence", &self.persistence.name())
            .field("synced", &self.synced)
            .finish()
    }
}

impl CartStore {
    /// Create an empty store backed by `persistence`.
    ///
    /// Call [`CartStore::hydrate`] to pick up a previously persisted cart.
    #[must_use]
    pub fn new(persistence: Box<dyn CartPersistence>) -> Self {
        Self {
            lines: Vec::new(),
            persistence,
            synced: true,
        }
    }

    /// Create an empty store with volatile persistence.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryPersistence::new()))
    }

    /// Name of the active persistence strategy.
    #[must_use]
    pub fn persistence_name(&self) -> &'static str {
        self.persistence.name()
    }

    /// Replace the in-memory cart with the persisted one.
    ///
    /// Lines persisted with a zero quantity are dropped. On failure the
    /// store keeps its current lines and is marked out of sync.
    ///
    /// Returns the number of lines loaded.
    #[instrument(skip(self), fields(persistence = self.persistence.name()))]
    pub async fn hydrate(&mut self) -> usize {
        match self.persistence.load().await {
            Ok(lines) => {
                self.lines = lines.into_iter().filter(|l| l.quantity > 0).collect();
                self.synced = true;
                self.lines.len()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load persisted cart; starting from memory");
                self.synced = false;
                0
            }
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// All lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a product, if it is in the cart.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// Quantity of a product; zero when absent.
    #[must_use]
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.get(id).map_or(0, |l| l.quantity)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Totals, recomputed from the current lines.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from_lines(&self.lines)
    }

    /// Whether the persisted copy is known to match memory.
    #[must_use]
    pub const fn is_synced(&self) -> bool {
        self.synced
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Change a product's quantity by `delta`, clamping at zero.
    ///
    /// A new line takes its name, price and image from `product`; an
    /// existing line keeps the ones it was created with. Reaching zero
    /// removes the line.
    ///
    /// Returns the resulting quantity.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub async fn adjust(&mut self, product: ProductInfo, delta: i64) -> u32 {
        let current = i64::from(self.quantity_of(&product.id));
        let quantity = u32::try_from(current.saturating_add(delta).max(0)).unwrap_or(u32::MAX);
        self.apply(product, quantity).await
    }

    /// Set a product's quantity to an absolute value. Zero removes the line.
    ///
    /// Returns the resulting quantity.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub async fn set_quantity(&mut self, product: ProductInfo, quantity: u32) -> u32 {
        self.apply(product, quantity).await
    }

    /// Remove a product's line regardless of its quantity.
    ///
    /// Returns whether a line was removed.
    pub async fn remove_line(&mut self, id: &ProductId) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        self.lines.remove(pos);

        let result = self.persistence.remove_line(id, &self.lines).await;
        self.record("remove_line", result);
        true
    }

    /// Remove every line.
    pub async fn clear(&mut self) {
        self.lines.clear();
        let result = self.persistence.clear().await;
        self.record("clear", result);
    }

    /// Rewrite the whole persisted cart from memory.
    ///
    /// Returns whether the store is in sync afterwards.
    pub async fn resync(&mut self) -> bool {
        match self.persistence.save(&self.lines).await {
            Ok(()) => self.synced = true,
            Err(e) => self.fail("resync", &e),
        }
        self.synced
    }

    async fn apply(&mut self, product: ProductInfo, quantity: u32) -> u32 {
        let position = self.position(&product.id);

        let result = match (position, quantity) {
            (None, 0) => return 0,
            (Some(pos), 0) => {
                self.lines.remove(pos);
                self.persistence.remove_line(&product.id, &self.lines).await
            }
            (Some(pos), quantity) => {
                let line = match self.lines.get_mut(pos) {
                    Some(line) => {
                        line.quantity = quantity;
                        line.clone()
                    }
                    None => return 0,
                };
                self.persistence.upsert_line(&line, &self.lines).await
            }
            (None, quantity) => {
                let line = product.into_line(quantity);
                self.lines.push(line.clone());
                self.persistence.upsert_line(&line, &self.lines).await
            }
        };

        self.record("upsert_line", result);
        quantity
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|l| &l.id == id)
    }

    fn record(&mut self, operation: &'static str, result: Result<(), PersistenceError>) {
        match result {
            Ok(()) if self.persistence.writes_snapshot() => self.synced = true,
            Ok(()) => {}
            Err(e) => self.fail(operation, &e),
        }
    }

    fn fail(&mut self, operation: &'static str, error: &PersistenceError) {
        warn!(
            persistence = self.persistence.name(),
            operation,
            error = %error,
            "Cart persistence failed; keeping in-memory cart"
        );
        self.synced = false;
    }
}
