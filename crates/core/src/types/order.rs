//! Order summary, order message and messaging deep link.
//!
//! The widget and the cart API both build the outbound message with
//! [`build_order_message`], so the text a shopper sends is identical no
//! matter which side produced the link.

use serde::{Deserialize, Serialize};

use super::id::RecipientId;
use super::line::CartLine;
use super::price::Price;

/// First line of every order message.
pub const ORDER_GREETING: &str = "Olá! Quero fazer um pedido:";

/// Totals derived from the cart lines. Never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Sum of quantities.
    pub total_items: u32,
    /// Sum of unit price times quantity.
    pub total_amount: Price,
}

impl OrderSummary {
    /// Compute totals over a set of lines.
    #[must_use]
    pub fn from_lines(lines: &[CartLine]) -> Self {
        lines.iter().fold(Self::default(), |acc, line| Self {
            total_items: acc.total_items.saturating_add(line.quantity),
            total_amount: acc.total_amount + line.line_total(),
        })
    }
}

/// Build the human-readable order message for a set of lines.
///
/// ```text
/// Olá! Quero fazer um pedido:
///
/// - A | R$ 20,00 x 2 = R$ 40,00
/// - B | R$ 5,50 x 1 = R$ 5,50
///
/// *Total do pedido: R$ 45,50*
/// ```
#[must_use]
pub fn build_order_message(lines: &[CartLine]) -> String {
    let mut message = format!("{ORDER_GREETING}\n\n");
    for line in lines {
        message.push_str(&format!(
            "- {} | {} x {} = {}\n",
            line.name,
            line.unit_price,
            line.quantity,
            line.line_total()
        ));
    }
    message.push_str(&format!(
        "\n*Total do pedido: {}*",
        OrderSummary::from_lines(lines).total_amount
    ));
    message
}

/// A messaging deep-link target (`https://wa.me/<recipient>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLink {
    base: String,
    recipient: RecipientId,
}

impl DeepLink {
    /// Default messaging endpoint.
    pub const DEFAULT_BASE: &'static str = "https://wa.me";

    /// Create a deep link for a recipient under a messaging base URL.
    #[must_use]
    pub fn new(base: impl Into<String>, recipient: RecipientId) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            recipient,
        }
    }

    /// The recipient this link targets.
    #[must_use]
    pub const fn recipient(&self) -> &RecipientId {
        &self.recipient
    }

    /// Full URL with the message URL-encoded into the `text` parameter.
    #[must_use]
    pub fn url(&self, message: &str) -> String {
        format!(
            "{}/{}?text={}",
            self.base,
            self.recipient,
            urlencoding::encode(message)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProductId, ProductInfo};

    fn line(id: &str, cents: i64, quantity: u32) -> CartLine {
        ProductInfo {
            id: ProductId::new(id),
            name: id.to_string(),
            unit_price: Price::from_cents(cents),
            image: None,
        }
        .into_line(quantity)
    }

    #[test]
    fn test_summary_sums_quantities_and_amounts() {
        let summary = OrderSummary::from_lines(&[line("A", 2000, 2), line("B", 550, 1)]);
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.total_amount.to_string(), "R$ 45,50");
    }

    #[test]
    fn test_summary_of_nothing_is_zero() {
        assert_eq!(OrderSummary::from_lines(&[]), OrderSummary::default());
    }

    #[test]
    fn test_order_message_layout() {
        let message = build_order_message(&[line("A", 2000, 2), line("B", 550, 1)]);
        assert_eq!(
            message,
            "Olá! Quero fazer um pedido:\n\n\
             - A | R$ 20,00 x 2 = R$ 40,00\n\
             - B | R$ 5,50 x 1 = R$ 5,50\n\
             \n*Total do pedido: R$ 45,50*"
        );
    }

    #[test]
    fn test_deep_link_encodes_message() {
        let link = DeepLink::new("https://wa.me/", RecipientId::new("5537991243408"));
        assert_eq!(
            link.url("Olá! x 2 = R$ 40,00\n"),
            "https://wa.me/5537991243408?text=Ol%C3%A1%21%20x%202%20%3D%20R%24%2040%2C00%0A"
        );
    }
}
