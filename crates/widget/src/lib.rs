//! Vitrine cart widget.
//!
//! Cart state management for a storefront grid and cart panel. The
//! presentation layer is abstracted behind [`Presenter`]; everything else
//! lives here:
//!
//! - [`store`] - The authoritative cart, written through to a persistence strategy
//! - [`persistence`] - Memory, local file and remote API strategies
//! - [`grid`] - Catalog entries and quantity synchronization
//! - [`view`] - Cart panel view-model projection
//! - [`finalize`] - Order message, deep link and cart clearing
//! - [`session`] - Command dispatch (mutate, resync grid, re-render)
//! - [`api`] - HTTP client for the cart API
//! - [`config`] - Environment configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrine_widget::{CartCommand, CartSession, CartStore, OrderLinkSource};
//!
//! let config = WidgetConfig::from_env()?;
//! let store = CartStore::new(config.build_persistence()?);
//! let mut session = CartSession::new(store, catalog, config.build_link_source()?, presenter);
//!
//! session.start().await;
//! session.dispatch(CartCommand::GridIncrease("0".into())).await;
//! session.dispatch(CartCommand::Checkout).await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod finalize;
pub mod grid;
pub mod persistence;
pub mod session;
pub mod store;
pub mod view;

pub use api::{ApiError, CartApiClient};
pub use config::{BackendKind, ConfigError, OrderLinkKind, WidgetConfig};
pub use error::PersistenceError;
pub use finalize::{FinalizedOrder, OrderLinkSource, finalize_order};
pub use grid::{CatalogEntry, sync_grid};
pub use persistence::{CartPersistence, LocalStorage, MemoryPersistence, RemotePersistence};
pub use session::{CartCommand, CartSession, Presenter, SharedCartSession};
pub use store::CartStore;
pub use view::{CartLineView, CartViewModel, render_view};
