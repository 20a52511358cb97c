//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! vitrine add 0 -n 2      # two of product 0
//! vitrine remove 0        # one less of product 0
//! vitrine drop 0          # product 0 out of the cart
//! vitrine clear
//! vitrine checkout        # prints the order link
//! ```

use vitrine_core::ProductId;
use vitrine_widget::grid::find_entry;
use vitrine_widget::{CartCommand, CartSession, FinalizedOrder, Presenter};

use super::CliError;

/// Add `quantity` of a catalog product, one grid click at a time.
///
/// # Errors
///
/// Returns [`CliError::UnknownProduct`] if the id is not in the catalog.
pub async fn add<P: Presenter>(
    session: &mut CartSession<P>,
    id: &ProductId,
    quantity: u32,
) -> Result<(), CliError> {
    if find_entry(session.catalog(), id).is_none() {
        return Err(CliError::UnknownProduct(id.clone()));
    }
    for _ in 0..quantity {
        session.dispatch(CartCommand::GridIncrease(id.clone())).await;
    }
    Ok(())
}

/// Take `quantity` of a product out of the cart, stopping once its line is gone.
///
/// # Errors
///
/// Returns [`CliError::NotInCart`] if the product has no line.
pub async fn remove<P: Presenter>(
    session: &mut CartSession<P>,
    id: &ProductId,
    quantity: u32,
) -> Result<(), CliError> {
    ensure_in_cart(session, id)?;
    for _ in 0..quantity {
        if session.store().get(id).is_none() {
            break;
        }
        session.dispatch(CartCommand::LineDecrease(id.clone())).await;
    }
    Ok(())
}

/// Remove a product's line regardless of quantity.
///
/// # Errors
///
/// Returns [`CliError::NotInCart`] if the product has no line.
pub async fn drop_line<P: Presenter>(
    session: &mut CartSession<P>,
    id: &ProductId,
) -> Result<(), CliError> {
    ensure_in_cart(session, id)?;
    session.dispatch(CartCommand::LineRemove(id.clone())).await;
    Ok(())
}

pub async fn clear<P: Presenter>(session: &mut CartSession<P>) {
    session.dispatch(CartCommand::Clear).await;
}

/// Finalize the order. An empty cart is not an error.
///
/// # Errors
///
/// Returns [`CliError::CheckoutFailed`] if the cart has lines but no link
/// could be obtained.
pub async fn checkout<P: Presenter>(
    session: &mut CartSession<P>,
) -> Result<Option<FinalizedOrder>, CliError> {
    let was_empty = session.store().is_empty();
    match session.dispatch(CartCommand::Checkout).await {
        Some(order) => Ok(Some(order)),
        None if was_empty => Ok(None),
        None => Err(CliError::CheckoutFailed),
    }
}

fn ensure_in_cart<P>(session: &CartSession<P>, id: &ProductId) -> Result<(), CliError> {
    if session.store().get(id).is_none() {
        return Err(CliError::NotInCart(id.clone()));
    }
    Ok(())
}
