//! Volatile in-process persistence.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use vitrine_core::CartLine;

use super::CartPersistence;
use crate::error::PersistenceError;

/// Keeps the last saved cart in memory.
///
/// Clones share the same snapshot, so a clone kept outside the store can
/// observe what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    snapshot: Arc<Mutex<Vec<CartLine>>>,
}

impl MemoryPersistence {
    /// Create an empty memory strategy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory strategy pre-filled with `lines`.
    #[must_use]
    pub fn with_lines(lines: Vec<CartLine>) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(lines)),
        }
    }

    /// The last saved cart.
    pub async fn snapshot(&self) -> Vec<CartLine> {
        self.snapshot.lock().await.clone()
    }
}

#[async_trait]
impl CartPersistence for MemoryPersistence {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn load(&self) -> Result<Vec<CartLine>, PersistenceError> {
        Ok(self.snapshot.lock().await.clone())
    }

    async fn save(&self, lines: &[CartLine]) -> Result<(), PersistenceError> {
        *self.snapshot.lock().await = lines.to_vec();
        Ok(())
    }

    async fn clear(&self) -> Result<(), PersistenceError> {
        self.snapshot.lock().await.clear();
        Ok(())
    }
}
