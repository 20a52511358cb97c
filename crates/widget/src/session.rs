//! Command dispatch.
//!
//! A [`CartSession`] owns the store, the catalog grid and the presentation
//! layer. Every command performs at most one store mutation, then resyncs
//! the grid and re-renders the cart panel, in that order.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, instrument};

use vitrine_core::ProductId;

use crate::finalize::{FinalizedOrder, OrderLinkSource, finalize_order};
use crate::grid::{CatalogEntry, find_entry, sync_grid};
use crate::store::CartStore;
use crate::view::{CartViewModel, render_view};

/// The presentation layer the widget drives.
pub trait Presenter: Send {
    /// Display the catalog grid with each card's quantity.
    fn show_grid(&mut self, entries: &[CatalogEntry]);

    /// Display the cart panel.
    fn show_cart(&mut self, view: &CartViewModel);

    /// Navigate to an external URL in a new context.
    fn open_url(&mut self, url: &str);

    /// Open or close the cart panel.
    fn set_panel_open(&mut self, open: bool);
}

/// A user action on the grid or the cart panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    GridIncrease(ProductId),
    GridDecrease(ProductId),
    LineIncrease(ProductId),
    LineDecrease(ProductId),
    LineRemove(ProductId),
    Clear,
    Checkout,
    OpenPanel,
    ClosePanel,
}

/// The widget: store, grid and presenter wired together.
pub struct CartSession<P> {
    store: CartStore,
    catalog: Vec<CatalogEntry>,
    link_source: OrderLinkSource,
    presenter: P,
    panel_open: bool,
}

impl<P> std::fmt::Debug for CartSession<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartSession")
            .field("store", &self.store)
            .field("catalog", &self.catalog.len())
            .field("link_source", &self.link_source)
            .field("panel_open", &self.panel_open)
            .finish_non_exhaustive()
    }
}

impl<P: Presenter> CartSession<P> {
    #[must_use]
    pub const fn new(
        store: CartStore,
        catalog: Vec<CatalogEntry>,
        link_source: OrderLinkSource,
        presenter: P,
    ) -> Self {
        Self {
            store,
            catalog,
            link_source,
            presenter,
            panel_open: false,
        }
    }

    /// Hydrate the store from persistence and render everything once.
    pub async fn start(&mut self) {
        let loaded = self.store.hydrate().await;
        debug!(loaded, "Cart session started");
        self.refresh();
    }

    /// Handle one command.
    ///
    /// Returns the finalized order for a successful checkout.
    #[instrument(skip(self), fields(persistence = self.store.persistence_name()))]
    pub async fn dispatch(&mut self, command: CartCommand) -> Option<FinalizedOrder> {
        match command {
            CartCommand::GridIncrease(id) => self.adjust_from_grid(&id, 1).await,
            CartCommand::GridDecrease(id) => self.adjust_from_grid(&id, -1).await,
            CartCommand::LineIncrease(id) => self.adjust_line(&id, 1).await,
            CartCommand::LineDecrease(id) => self.adjust_line(&id, -1).await,
            CartCommand::LineRemove(id) => {
                if self.store.remove_line(&id).await {
                    self.refresh();
                } else {
                    debug!(%id, "Remove requested for a product not in the cart");
                }
            }
            CartCommand::Clear => {
                self.store.clear().await;
                self.refresh();
            }
            CartCommand::Checkout => {
                let order =
                    finalize_order(&mut self.store, &self.link_source, &mut self.presenter).await;
                if order.is_some() {
                    self.refresh();
                    self.set_panel(false);
                }
                return order;
            }
            CartCommand::OpenPanel => self.set_panel(true),
            CartCommand::ClosePanel => self.set_panel(false),
        }
        None
    }

    /// Resync the grid and re-render the cart panel.
    pub fn refresh(&mut self) {
        sync_grid(&mut self.catalog, &self.store);
        self.presenter.show_grid(&self.catalog);
        let view = render_view(&self.store);
        self.presenter.show_cart(&view);
    }

    async fn adjust_from_grid(&mut self, id: &ProductId, delta: i64) {
        let Some(product) = find_entry(&self.catalog, id).map(CatalogEntry::product_info) else {
            debug!(%id, "Grid command for an unknown product");
            return;
        };
        self.store.adjust(product, delta).await;
        self.refresh();
    }

    async fn adjust_line(&mut self, id: &ProductId, delta: i64) {
        let Some(product) = self.store.get(id).map(vitrine_core::CartLine::product_info) else {
            debug!(%id, "Line command for a product not in the cart");
            return;
        };
        self.store.adjust(product, delta).await;
        self.refresh();
    }

    fn set_panel(&mut self, open: bool) {
        self.panel_open = open;
        self.presenter.set_panel_open(open);
    }
}

impl<P> CartSession<P> {
    #[must_use]
    pub const fn store(&self) -> &CartStore {
        &self.store
    }

    /// Mutable access to the store, e.g. for [`CartStore::resync`].
    pub const fn store_mut(&mut self) -> &mut CartStore {
        &mut self.store
    }

    #[must_use]
    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    #[must_use]
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    pub const fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    #[must_use]
    pub const fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// Consume the session, returning its presenter.
    #[must_use]
    pub fn into_presenter(self) -> P {
        self.presenter
    }
}

/// A session shared between concurrent input sources.
///
/// Commands are handled one at a time in the order the lock is acquired,
/// so per-line persistence writes reach the backend in dispatch order.
pub struct SharedCartSession<P> {
    inner: Arc<Mutex<CartSession<P>>>,
}

impl<P> Clone for SharedCartSession<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P> std::fmt::Debug for SharedCartSession<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedCartSession").finish_non_exhaustive()
    }
}

impl<P: Presenter> SharedCartSession<P> {
    #[must_use]
    pub fn new(session: CartSession<P>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Queue a command behind any in-flight one and handle it.
    pub async fn dispatch(&self, command: CartCommand) -> Option<FinalizedOrder> {
        self.inner.lock().await.dispatch(command).await
    }

    /// Lock the session for direct access.
    pub async fn lock(&self) -> MutexGuard<'_, CartSession<P>> {
        self.inner.lock().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use vitrine_core::{CartLine, DeepLink, Price, RecipientId};

    use crate::persistence::MemoryPersistence;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Grid(Vec<(String, u32)>),
        Cart(CartViewModel),
        Open(String),
        Panel(bool),
    }

    #[derive(Debug, Default)]
    struct Recorder {
        events: Vec<Event>,
    }

    impl Recorder {
        fn take(&mut self) -> Vec<Event> {
            std::mem::take(&mut self.events)
        }

        fn last_cart(&self) -> &CartViewModel {
            self.events
                .iter()
                .rev()
                .find_map(|e| match e {
                    Event::Cart(view) => Some(view),
                    _ => None,
                })
                .unwrap()
        }
    }

    impl Presenter for Recorder {
        fn show_grid(&mut self, entries: &[CatalogEntry]) {
            self.events.push(Event::Grid(
                entries
                    .iter()
                    .map(|e| (e.id.to_string(), e.quantity_display))
                    .collect(),
            ));
        }

        fn show_cart(&mut self, view: &CartViewModel) {
            self.events.push(Event::Cart(view.clone()));
        }

        fn open_url(&mut self, url: &str) {
            self.events.push(Event::Open(url.to_string()));
        }

        fn set_panel_open(&mut self, open: bool) {
            self.events.push(Event::Panel(open));
        }
    }

    fn catalog() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new("A", "A", "R$ 20,00", None),
            CatalogEntry::new("B", "B", "R$ 5,50", None),
        ]
    }

    fn link() -> OrderLinkSource {
        OrderLinkSource::Local(DeepLink::new(
            DeepLink::DEFAULT_BASE,
            RecipientId::new("5537991243408"),
        ))
    }

    fn session() -> CartSession<Recorder> {
        CartSession::new(CartStore::in_memory(), catalog(), link(), Recorder::default())
    }

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[tokio::test]
    async fn test_mutation_then_grid_then_cart() {
        let mut s = session();
        s.dispatch(CartCommand::GridIncrease(id("B"))).await;

        let events = s.presenter_mut().take();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            Event::Grid(vec![("A".to_string(), 0), ("B".to_string(), 1)])
        );
        let Event::Cart(view) = &events[1] else {
            panic!("expected cart render, got {:?}", events[1]);
        };
        assert_eq!(view.total_amount, "R$ 5,50");
    }

    #[tokio::test]
    async fn test_full_cart_flow() {
        let mut s = session();
        s.dispatch(CartCommand::GridIncrease(id("A"))).await;
        s.dispatch(CartCommand::GridIncrease(id("A"))).await;
        s.dispatch(CartCommand::GridIncrease(id("B"))).await;

        let view = s.presenter().last_cart().clone();
        assert_eq!(view.total_items, 3);
        assert_eq!(view.total_amount, "R$ 45,50");

        s.dispatch(CartCommand::LineDecrease(id("A"))).await;
        s.dispatch(CartCommand::LineDecrease(id("A"))).await;

        let view = s.presenter().last_cart().clone();
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].id, id("B"));
        assert_eq!(view.total_amount, "R$ 5,50");
        assert_eq!(s.store().quantity_of(&id("A")), 0);

        s.dispatch(CartCommand::Clear).await;
        let view = s.presenter().last_cart();
        assert!(view.is_empty);
        assert!(!view.checkout_enabled);
        assert!(s.catalog().iter().all(|e| e.quantity_display == 0));
    }

    #[tokio::test]
    async fn test_grid_decrease_never_goes_negative() {
        let mut s = session();
        s.dispatch(CartCommand::GridDecrease(id("A"))).await;
        assert!(s.store().is_empty());
        assert_eq!(s.presenter().last_cart().total_items, 0);
    }

    #[tokio::test]
    async fn test_line_commands_keep_frozen_price() {
        let mut s = session();
        s.dispatch(CartCommand::GridIncrease(id("A"))).await;

        // Catalog price changes after the line exists.
        s.catalog[0].price_text = "R$ 99,00".to_string();
        s.dispatch(CartCommand::LineIncrease(id("A"))).await;
        s.dispatch(CartCommand::GridIncrease(id("A"))).await;

        let line = s.store().get(&id("A")).unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.unit_price, Price::from_cents(2000));
    }

    #[tokio::test]
    async fn test_oversized_price_saturates_totals() {
        let mut s = session();
        s.catalog[0].price_text = "R$ 79.228.162.514.264.337.593.543.950.335".to_string();
        s.dispatch(CartCommand::GridIncrease(id("A"))).await;
        s.dispatch(CartCommand::GridIncrease(id("A"))).await;
        s.dispatch(CartCommand::GridIncrease(id("B"))).await;

        assert_eq!(s.store().quantity_of(&id("A")), 2);
        let view = s.presenter().last_cart();
        assert_eq!(view.total_items, 3);
        assert_eq!(
            view.total_amount,
            "R$ 79.228.162.514.264.337.593.543.950.335,00"
        );
    }

    #[tokio::test]
    async fn test_line_remove() {
        let mut s = session();
        s.dispatch(CartCommand::GridIncrease(id("A"))).await;
        s.dispatch(CartCommand::GridIncrease(id("A"))).await;
        s.dispatch(CartCommand::LineRemove(id("A"))).await;
        assert!(s.store().is_empty());
        assert!(s.presenter().last_cart().is_empty);
    }

    #[tokio::test]
    async fn test_unknown_ids_do_nothing() {
        let mut s = session();
        s.dispatch(CartCommand::GridIncrease(id("nope"))).await;
        s.dispatch(CartCommand::LineIncrease(id("A"))).await;
        s.dispatch(CartCommand::LineRemove(id("A"))).await;
        assert!(s.presenter().events.is_empty());
    }

    #[tokio::test]
    async fn test_checkout_opens_link_then_clears() {
        let mut s = session();
        s.dispatch(CartCommand::OpenPanel).await;
        s.dispatch(CartCommand::GridIncrease(id("A"))).await;
        s.dispatch(CartCommand::GridIncrease(id("A"))).await;
        s.dispatch(CartCommand::GridIncrease(id("B"))).await;
        assert!(s.is_panel_open());
        s.presenter_mut().take();

        let order = s.dispatch(CartCommand::Checkout).await.unwrap();
        assert!(order.message.contains("- A | R$ 20,00 x 2 = R$ 40,00"));
        assert!(order.message.contains("- B | R$ 5,50 x 1 = R$ 5,50"));
        assert!(order.message.ends_with("*Total do pedido: R$ 45,50*"));

        let events = s.presenter_mut().take();
        assert_eq!(events[0], Event::Open(order.target_url.clone()));
        assert_eq!(
            events[1],
            Event::Grid(vec![("A".to_string(), 0), ("B".to_string(), 0)])
        );
        assert_eq!(events[2], Event::Cart(CartViewModel::empty()));
        assert_eq!(events[3], Event::Panel(false));
        assert!(!s.is_panel_open());
        assert!(s.store().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_on_empty_cart_does_not_navigate() {
        let mut s = session();
        assert!(s.dispatch(CartCommand::Checkout).await.is_none());
        assert!(s.presenter().events.is_empty());
    }

    #[tokio::test]
    async fn test_start_hydrates_and_renders() {
        let persisted = MemoryPersistence::with_lines(vec![CartLine {
            id: id("B"),
            name: "B".to_string(),
            unit_price: Price::from_cents(550),
            quantity: 4,
            image: None,
        }]);
        let mut s = CartSession::new(
            CartStore::new(Box::new(persisted)),
            catalog(),
            link(),
            Recorder::default(),
        );
        s.start().await;

        let events = s.presenter_mut().take();
        assert_eq!(
            events[0],
            Event::Grid(vec![("A".to_string(), 0), ("B".to_string(), 4)])
        );
        let Event::Cart(view) = &events[1] else {
            panic!("expected cart render");
        };
        assert_eq!(view.total_amount, "R$ 22,00");
    }

    #[tokio::test]
    async fn test_shared_session_serializes_commands() {
        let shared = SharedCartSession::new(session());

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let shared = shared.clone();
                tokio::spawn(async move {
                    shared.dispatch(CartCommand::GridIncrease(ProductId::new("A"))).await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let session = shared.lock().await;
        assert_eq!(session.store().quantity_of(&id("A")), 20);
        assert_eq!(session.presenter().last_cart().total_amount, "R$ 400,00");
    }
}
