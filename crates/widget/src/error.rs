//! Persistence errors.
//!
//! These never escape the cart store: the store logs them and keeps its
//! in-memory state.

use std::path::PathBuf;

use thiserror::Error;

use crate::api::ApiError;

/// Errors a persistence strategy can report.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the local snapshot failed.
    #[error("Storage I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The local snapshot could not be decoded or encoded.
    #[error("Corrupt cart snapshot: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The cart API call failed.
    #[error("Cart API error: {0}")]
    Api(#[from] ApiError),
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
