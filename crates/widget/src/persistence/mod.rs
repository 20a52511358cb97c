//! Persistence strategies backing the cart store.
//!
//! A strategy is chosen once, when the store is built:
//!
//! - [`MemoryPersistence`] - volatile, lives as long as the process
//! - [`LocalStorage`] - one JSON snapshot file on the device
//! - [`RemotePersistence`] - the cart API, one request per line change

mod local;
mod memory;
mod remote;

pub use local::{DEFAULT_KEY, LocalStorage};
pub use memory::MemoryPersistence;
pub use remote::RemotePersistence;

use async_trait::async_trait;

use vitrine_core::{CartLine, ProductId};

use crate::error::PersistenceError;

/// Where the cart store writes through to.
///
/// `save` receives the complete cart; the per-line hooks also receive the
/// complete cart after the change so snapshot strategies can ignore the
/// single line and rewrite everything.
#[async_trait]
pub trait CartPersistence: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether every write replaces the whole persisted cart.
    ///
    /// A successful write from such a strategy brings the persisted copy
    /// back in line with memory after an earlier failure.
    fn writes_snapshot(&self) -> bool {
        true
    }

    /// Read the persisted cart. A missing cart is an empty one.
    async fn load(&self) -> Result<Vec<CartLine>, PersistenceError>;

    /// Replace the persisted cart with `lines`.
    async fn save(&self, lines: &[CartLine]) -> Result<(), PersistenceError>;

    /// Remove every persisted line.
    async fn clear(&self) -> Result<(), PersistenceError>;

    /// Persist a created or updated line.
    async fn upsert_line(
        &self,
        _line: &CartLine,
        lines: &[CartLine],
    ) -> Result<(), PersistenceError> {
        self.save(lines).await
    }

    /// Persist the removal of a line.
    async fn remove_line(
        &self,
        _id: &ProductId,
        lines: &[CartLine],
    ) -> Result<(), PersistenceError> {
        self.save(lines).await
    }
}
