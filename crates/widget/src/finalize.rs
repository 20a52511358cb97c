//! Order finalization.
//!
//! Turns the cart into the outbound order message, obtains the messaging
//! deep link, asks the presentation layer to open it and only then clears
//! the cart. Clearing first would send an empty order.

use tracing::{debug, info, warn};

use vitrine_core::{CartLine, DeepLink, build_order_message};

use crate::api::{ApiError, CartApiClient};
use crate::session::Presenter;
use crate::store::CartStore;

/// Where the order's deep link comes from.
#[derive(Debug, Clone)]
pub enum OrderLinkSource {
    /// Build the link locally.
    Local(DeepLink),
    /// Ask the cart API (`POST /order/`) for the link.
    Remote(CartApiClient),
}

impl OrderLinkSource {
    /// Resolve the target URL for an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote order call fails.
    pub async fn target_url(&self, lines: &[CartLine], message: &str) -> Result<String, ApiError> {
        match self {
            Self::Local(link) => Ok(link.url(message)),
            Self::Remote(client) => client.create_order(lines).await,
        }
    }
}

/// The order that was handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedOrder {
    pub message: String,
    pub target_url: String,
}

/// Finalize the current cart.
///
/// Returns `None` without side effects when the cart is empty or when the
/// link cannot be obtained (the failure is logged and the cart is kept).
pub async fn finalize_order<P: Presenter + ?Sized>(
    store: &mut CartStore,
    source: &OrderLinkSource,
    presenter: &mut P,
) -> Option<FinalizedOrder> {
    if store.is_empty() {
        debug!("Finalize requested on an empty cart");
        return None;
    }

    let message = build_order_message(store.lines());
    let target_url = match source.target_url(store.lines(), &message).await {
        Ok(url) => url,
        Err(e) => {
            warn!(error = %e, "Failed to obtain order link; cart kept");
            return None;
        }
    };

    presenter.open_url(&target_url);

    let summary = store.summary();
    store.clear().await;
    info!(
        items = summary.total_items,
        total = %summary.total_amount,
        "Order handed off"
    );

    Some(FinalizedOrder {
        message,
        target_url,
    })
}
