//! Command implementations.
//!
//! Every invocation builds a fresh [`CartSession`] from the environment,
//! hydrates it from the configured persistence strategy and dispatches the
//! requested commands, exactly as the widget would for clicks.

pub mod cart;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use vitrine_core::{CatalogItem, ProductId};
use vitrine_widget::{
    ApiError, CartSession, CartStore, CatalogEntry, ConfigError, Presenter, WidgetConfig,
};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cart API error: {0}")]
    Api(#[from] ApiError),

    #[error("Failed to read catalog {}: {source}", path.display())]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),

    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    #[error("Checkout failed; the cart was kept")]
    CheckoutFailed,
}

/// Load the catalog grid from a JSON file, or from the cart API when no
/// file is given.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the API call
/// fails.
pub async fn load_catalog(
    path: Option<&Path>,
    config: &WidgetConfig,
) -> Result<Vec<CatalogEntry>, CliError> {
    let items: Vec<CatalogItem> = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| CliError::CatalogIo {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str(&text)?
        }
        None => config.api_client()?.list_items().await?,
    };
    tracing::debug!(items = items.len(), "Catalog loaded");

    Ok(items.iter().map(CatalogEntry::from).collect())
}

/// Build and start a session over the configured persistence strategy.
///
/// # Errors
///
/// Returns an error if the persistence strategy or the order link source
/// cannot be built.
pub async fn open_session<P: Presenter>(
    config: &WidgetConfig,
    catalog: Vec<CatalogEntry>,
    presenter: P,
) -> Result<CartSession<P>, CliError> {
    let store = CartStore::new(config.build_persistence()?);
    let mut session = CartSession::new(store, catalog, config.build_link_source()?, presenter);
    session.start().await;

    if !session.store().is_synced() {
        tracing::warn!(
            persistence = session.store().persistence_name(),
            "Could not load the saved cart; starting empty"
        );
    }
    Ok(session)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use vitrine_widget::BackendKind;

    use crate::terminal::TerminalPresenter;

    const CATALOG: &str = r#"[
        {"id": "0", "name": "QUEIJO PALITO", "price": 31.9, "details": "450g", "image": "", "category": "Queijos Tradicionais"},
        {"id": "1", "name": "QUEIJO TRANÇA", "price": 31.9, "details": "450g", "image": "foto2.png", "category": "Queijos Tradicionais"}
    ]"#;

    #[tokio::test]
    async fn test_load_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, CATALOG).unwrap();

        let entries = load_catalog(Some(&path), &WidgetConfig::default())
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].price_text, "R$ 31,90");
        assert_eq!(entries[1].image.as_deref(), Some("foto2.png"));
    }

    #[tokio::test]
    async fn test_load_catalog_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(Some(&dir.path().join("nope.json")), &WidgetConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::CatalogIo { .. }));
    }

    #[tokio::test]
    async fn test_open_session_hydrates_local_cart() {
        let dir = tempfile::tempdir().unwrap();
        let config = WidgetConfig {
            backend: BackendKind::Local,
            storage_dir: dir.path().to_path_buf(),
            ..WidgetConfig::default()
        };
        let catalog: Vec<CatalogEntry> = serde_json::from_str::<Vec<CatalogItem>>(CATALOG)
            .unwrap()
            .iter()
            .map(CatalogEntry::from)
            .collect();

        let mut first = open_session(&config, catalog.clone(), TerminalPresenter::cart_only())
            .await
            .unwrap();
        cart::add(&mut first, &ProductId::new("1"), 3).await.unwrap();

        let second = open_session(&config, catalog, TerminalPresenter::cart_only())
            .await
            .unwrap();
        assert_eq!(second.store().quantity_of(&ProductId::new("1")), 3);
        assert!(second.store().is_synced());
    }

    #[tokio::test]
    async fn test_saved_cart_edits_without_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let config = WidgetConfig {
            backend: BackendKind::Local,
            storage_dir: dir.path().to_path_buf(),
            ..WidgetConfig::default()
        };
        let catalog: Vec<CatalogEntry> = serde_json::from_str::<Vec<CatalogItem>>(CATALOG)
            .unwrap()
            .iter()
            .map(CatalogEntry::from)
            .collect();

        let mut first = open_session(&config, catalog, TerminalPresenter::cart_only())
            .await
            .unwrap();
        cart::add(&mut first, &ProductId::new("0"), 2).await.unwrap();
        cart::add(&mut first, &ProductId::new("1"), 1).await.unwrap();

        let mut second = open_session(&config, Vec::new(), TerminalPresenter::cart_only())
            .await
            .unwrap();
        cart::remove(&mut second, &ProductId::new("0"), 1).await.unwrap();
        cart::drop_line(&mut second, &ProductId::new("1")).await.unwrap();

        let line = second.store().get(&ProductId::new("0")).unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.name, "QUEIJO PALITO");
        assert!(second.store().get(&ProductId::new("1")).is_none());
        assert!(second.store().is_synced());
    }
}
