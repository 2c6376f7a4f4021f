//! Output formatting for the CLI.
//!
//! Plain status lines plus the storefront views: the cart table, the totals
//! block and the product listing. Prices are rendered with the configured
//! currency symbol. In `--json` mode the human views print nothing.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use shop_cart::cart::{CartLine, CartState};
use shop_cart::catalog::Product;
use shop_cart::summary::CartSummary;
use shop_cart::Money;

const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    currency_symbol: String,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Format an amount with the configured currency symbol.
    pub fn price(&self, amount: Money) -> String {
        amount.display_with(&self.currency_symbol)
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print the cart lines as an aligned table.
    pub fn cart_table(&self, state: &CartState) {
        if self.json {
            return;
        }
        self.header("Cart");
        if state.is_empty() {
            self.info("Your cart is empty");
            return;
        }
        self.table(&self.cart_rows(state));
    }

    /// Print item count, subtotal, tax (when charged) and total.
    pub fn summary(&self, summary: &CartSummary) {
        if self.json {
            return;
        }
        for (key, value) in self.summary_rows(summary) {
            self.kv(&key, &value);
        }
    }

    /// Print one page of products as an aligned table.
    pub fn product_table(&self, products: &[Product]) {
        if self.json {
            return;
        }
        if products.is_empty() {
            self.info("No products on this page");
            return;
        }
        self.table(&self.product_rows(products));
    }

    /// Create a spinner for network calls.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    fn table(&self, rows: &[Vec<String>]) {
        let widths = column_widths(rows);
        for (i, row) in rows.iter().enumerate() {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| pad(cell, *width))
                .collect();
            let text = cells.join("  ");
            if i == 0 {
                println!("  {}", style(text.trim_end()).bold());
            } else {
                println!("  {}", text.trim_end());
            }
        }
    }

    fn cart_rows(&self, state: &CartState) -> Vec<Vec<String>> {
        let mut rows = vec![cells(["Product", "Size", "Qty", "Price", "Total"])];
        rows.extend(state.lines().iter().map(|line| {
            vec![
                line_label(line),
                line.size.clone(),
                line.quantity.to_string(),
                self.price(line.unit_price),
                self.price(line.line_total()),
            ]
        }));
        rows
    }

    fn summary_rows(&self, summary: &CartSummary) -> Vec<(String, String)> {
        let mut rows = vec![
            ("Items".to_string(), summary.item_count.to_string()),
            ("Subtotal".to_string(), self.price(summary.subtotal)),
        ];
        if !summary.tax_rate.is_zero() {
            rows.push((
                format!("Tax ({}%)", summary.tax_rate.as_percent()),
                self.price(summary.tax),
            ));
        }
        rows.push(("Total".to_string(), self.price(summary.total)));
        rows
    }

    fn product_rows(&self, products: &[Product]) -> Vec<Vec<String>> {
        let mut rows = vec![cells(["Id", "Name", "Price", "Stock", "Sizes"])];
        rows.extend(products.iter().map(|p| {
            let stock = if p.is_in_stock() {
                p.in_stock.to_string()
            } else {
                "sold out".to_string()
            };
            vec![
                p.id.to_string(),
                p.name.clone(),
                self.price(p.price),
                stock,
                p.sizes.join(","),
            ]
        }));
        rows
    }
}

/// How a cart line is named in tables and messages.
pub fn line_label(line: &CartLine) -> String {
    if line.name.is_empty() {
        line.product_id.to_string()
    } else {
        format!("{} [{}]", line.name, line.product_id)
    }
}

fn cells<const N: usize>(headers: [&str; N]) -> Vec<String> {
    headers.iter().map(|h| h.to_string()).collect()
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(console::measure_text_width(cell));
    format!("{}{}", cell, " ".repeat(fill))
}

/// Column widths sized to the widest cell of each column.
fn column_widths(rows: &[Vec<String>]) -> Vec<usize> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|i| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| console::measure_text_width(cell))
                .max()
                .unwrap_or(0)
        })
        .collect()
}
