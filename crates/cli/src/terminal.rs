//! Terminal presentation of the grid and the cart panel.
//!
//! The session re-renders after every command; the presenter keeps only the
//! latest frame and prints it once the command line has been handled.

use std::io::{self, Write};

use vitrine_widget::{CartViewModel, CatalogEntry, Presenter};

/// Records what the session shows and prints it as plain text.
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    show_grid: bool,
    grid: Option<Vec<CatalogEntry>>,
    cart: Option<CartViewModel>,
    opened: Vec<String>,
}

impl TerminalPresenter {
    /// A presenter that prints the cart panel only.
    #[must_use]
    pub fn cart_only() -> Self {
        Self::default()
    }

    /// A presenter that prints the catalog grid above the cart panel.
    #[must_use]
    pub fn with_grid() -> Self {
        Self {
            show_grid: true,
            ..Self::default()
        }
    }

    /// URLs the session asked to open.
    #[must_use]
    pub fn opened(&self) -> &[String] {
        &self.opened
    }

    /// Print the latest frame.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        if self.show_grid
            && let Some(grid) = &self.grid
        {
            write_grid(out, grid)?;
            writeln!(out)?;
        }

        if let Some(url) = self.opened.last() {
            writeln!(out, "Pedido pronto. Abra o link para enviar:")?;
            writeln!(out, "{url}")?;
            return Ok(());
        }

        if let Some(cart) = &self.cart {
            write_cart(out, cart)?;
        }
        Ok(())
    }
}

impl Presenter for TerminalPresenter {
    fn show_grid(&mut self, entries: &[CatalogEntry]) {
        self.grid = Some(entries.to_vec());
    }

    fn show_cart(&mut self, view: &CartViewModel) {
        self.cart = Some(view.clone());
    }

    fn open_url(&mut self, url: &str) {
        self.opened.push(url.to_string());
    }

    // No panel to toggle; the cart is always printed.
    fn set_panel_open(&mut self, _open: bool) {}
}

fn write_grid(out: &mut impl Write, grid: &[CatalogEntry]) -> io::Result<()> {
    let id_width = grid.iter().map(|e| e.id.as_str().len()).max().unwrap_or(0);
    let name_width = grid.iter().map(|e| e.name.chars().count()).max().unwrap_or(0);

    for entry in grid {
        write!(
            out,
            "{:>id_width$}  {:<name_width$}  {:>12}",
            entry.id.as_str(),
            entry.name,
            entry.price_text,
        )?;
        if entry.quantity_display > 0 {
            write!(out, "  [{}]", entry.quantity_display)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_cart(out: &mut impl Write, cart: &CartViewModel) -> io::Result<()> {
    if cart.is_empty {
        return writeln!(out, "Seu carrinho está vazio.");
    }

    for line in &cart.lines {
        writeln!(
            out,
            "{} x{}  {} = {}",
            line.name, line.quantity, line.unit_price, line.line_total
        )?;
    }
    writeln!(out, "Itens: {}", cart.total_items)?;
    writeln!(out, "Total: {}", cart.total_amount)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use vitrine_core::{CartLine, Price, ProductId};

    fn rendered(presenter: &TerminalPresenter) -> String {
        let mut out = Vec::new();
        presenter.render(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn cart() -> CartViewModel {
        CartViewModel::from_lines(&[CartLine {
            id: ProductId::new("0"),
            name: "QUEIJO PALITO".to_string(),
            unit_price: Price::from_cents(3190),
            quantity: 2,
            image: None,
        }])
    }

    #[test]
    fn test_empty_cart() {
        let mut presenter = TerminalPresenter::cart_only();
        presenter.show_cart(&CartViewModel::empty());
        assert_eq!(rendered(&presenter), "Seu carrinho está vazio.\n");
    }

    #[test]
    fn test_cart_lines_and_totals() {
        let mut presenter = TerminalPresenter::cart_only();
        presenter.show_grid(&[CatalogEntry::new("0", "QUEIJO PALITO", "R$ 31,90", None)]);
        presenter.show_cart(&cart());

        let text = rendered(&presenter);
        assert!(text.contains("QUEIJO PALITO x2  R$ 31,90 = R$ 63,80"));
        assert!(text.contains("Total: R$ 63,80"));
        // Grid suppressed
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_grid_marks_quantities() {
        let mut presenter = TerminalPresenter::with_grid();
        let mut entry = CatalogEntry::new("0", "QUEIJO PALITO", "R$ 31,90", None);
        entry.quantity_display = 2;
        presenter.show_grid(&[entry, CatalogEntry::new("10", "MEL", "R$ 25,00", None)]);
        presenter.show_cart(&cart());

        let text = rendered(&presenter);
        let mut lines = text.lines();
        assert!(lines.next().unwrap().ends_with("[2]"));
        assert!(lines.next().unwrap().ends_with("R$ 25,00"));
    }

    #[test]
    fn test_opened_link_replaces_cart() {
        let mut presenter = TerminalPresenter::cart_only();
        presenter.open_url("https://wa.me/5537991243408?text=oi");
        presenter.show_cart(&CartViewModel::empty());

        let text = rendered(&presenter);
        assert!(text.ends_with("https://wa.me/5537991243408?text=oi\n"));
        assert!(!text.contains("vazio"));
        assert_eq!(presenter.opened().len(), 1);
    }
}
