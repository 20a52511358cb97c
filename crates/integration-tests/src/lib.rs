//! Integration tests for Vitrine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrine-integration-tests
//! ```
//!
//! No external services are needed: [`TestServer`] serves the cart API on
//! an ephemeral local port for the duration of a test.
//!
//! # Test Categories
//!
//! - `remote_cart` - Widget sessions persisting through the cart API
//! - `local_cart` - Widget sessions persisting to a local file

#![allow(clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::time::Duration;

use tokio::task::JoinHandle;

use vitrine_core::{CatalogItem, DeepLink, RecipientId};
use vitrine_server::catalog::Catalog;
use vitrine_server::config::ServerConfig;
use vitrine_server::state::AppState;
use vitrine_widget::{
    CartApiClient, CartSession, CartStore, CatalogEntry, OrderLinkSource, Presenter,
    RemotePersistence,
};

/// Catalog shipped with the server.
pub const SHIPPED_CATALOG: &str = include_str!("../../server/content/catalog.json");

/// Phone number used by test servers and local links.
pub const TEST_RECIPIENT: &str = "5537991243408";

/// A cart API server bound to `127.0.0.1:0`, stopped on drop.
pub struct TestServer {
    addr: SocketAddr,
    state: AppState,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Serve the shipped catalog.
    pub async fn start() -> Self {
        let catalog = Catalog::from_json(SHIPPED_CATALOG).expect("Shipped catalog is invalid");
        Self::with_catalog(catalog).await
    }

    /// Serve a specific catalog.
    pub async fn with_catalog(catalog: Catalog) -> Self {
        let config = ServerConfig::from_lookup(|key| match key {
            "VITRINE_SERVER_PORT" => Some("0".to_string()),
            "VITRINE_WHATSAPP_NUMBER" => Some(TEST_RECIPIENT.to_string()),
            _ => None,
        })
        .expect("Failed to build test server config");
        let state = AppState::new(config.clone(), catalog);

        let listener = tokio::net::TcpListener::bind(config.socket_addr())
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Failed to read local address");

        let app = vitrine_server::app(state.clone());
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Base URL of the running server.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Server state, for inspecting the server-side cart directly.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// A widget API client for this server.
    #[must_use]
    pub fn client(&self) -> CartApiClient {
        CartApiClient::new(&self.base_url(), Duration::from_secs(5))
            .expect("Failed to create API client")
    }

    /// A widget session persisting to this server and asking it for order
    /// links.
    pub async fn remote_session<P: Presenter>(&self, presenter: P) -> CartSession<P> {
        let client = self.client();
        let catalog = client
            .list_items()
            .await
            .expect("Failed to list catalog")
            .iter()
            .map(CatalogEntry::from)
            .collect();

        let store = CartStore::new(Box::new(RemotePersistence::new(client.clone())));
        let mut session =
            CartSession::new(store, catalog, OrderLinkSource::Remote(client), presenter);
        session.start().await;
        session
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Grid entries for the shipped catalog.
#[must_use]
pub fn shipped_entries() -> Vec<CatalogEntry> {
    serde_json::from_str::<Vec<CatalogItem>>(SHIPPED_CATALOG)
        .expect("Shipped catalog is invalid")
        .iter()
        .map(CatalogEntry::from)
        .collect()
}

/// An order link built locally for [`TEST_RECIPIENT`].
#[must_use]
pub fn local_link() -> OrderLinkSource {
    OrderLinkSource::Local(DeepLink::new(
        DeepLink::DEFAULT_BASE,
        RecipientId::new(TEST_RECIPIENT),
    ))
}

/// Records every URL the session asks to open.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub opened: Vec<String>,
    pub renders: usize,
}

impl Presenter for RecordingPresenter {
    fn show_grid(&mut self, _entries: &[CatalogEntry]) {}

    fn show_cart(&mut self, _view: &vitrine_widget::CartViewModel) {
        self.renders += 1;
    }

    fn open_url(&mut self, url: &str) {
        self.opened.push(url.to_string());
    }

    fn set_panel_open(&mut self, _open: bool) {}
}
