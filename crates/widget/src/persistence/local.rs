//! Local device storage.
//!
//! The cart lives under a single key: the file `<dir>/<key>.json` holding
//! the JSON list of `[id, line]` pairs. The file is read once at startup and
//! overwritten on every change; a missing file is an empty cart.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use vitrine_core::{CartLine, ProductId};

use super::CartPersistence;
use crate::error::PersistenceError;

/// Default storage key.
pub const DEFAULT_KEY: &str = "cart";

/// File-backed snapshot of the cart.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Store the cart under `key` inside `dir`.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

#[async_trait]
impl CartPersistence for LocalStorage {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn load(&self) -> Result<Vec<CartLine>, PersistenceError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PersistenceError::io(&self.path, e)),
        };

        let pairs: Vec<(ProductId, CartLine)> = serde_json::from_str(&raw)?;
        debug!(path = %self.path.display(), lines = pairs.len(), "Loaded cart snapshot");
        Ok(pairs.into_iter().map(|(_, line)| line).collect())
    }

    async fn save(&self, lines: &[CartLine]) -> Result<(), PersistenceError> {
        let pairs: Vec<(&ProductId, &CartLine)> = lines.iter().map(|line| (&line.id, line)).collect();
        let raw = serde_json::to_string(&pairs)?;

        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| PersistenceError::io(dir, e))?;
        }

        // Write then rename so a crash never leaves a half-written snapshot
        let temp = self.temp_path();
        tokio::fs::write(&temp, raw)
            .await
            .map_err(|e| PersistenceError::io(&temp, e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| PersistenceError::io(&self.path, e))
    }

    async fn clear(&self) -> Result<(), PersistenceError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::io(&self.path, e)),
        }
    }
}
