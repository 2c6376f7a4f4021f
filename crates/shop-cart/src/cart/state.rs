//! The cart aggregate.

use crate::cart::line::{clamp_quantity, CartLine, MAX_QUANTITY_PER_LINE};
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// The full cart: ordered lines plus derived totals.
///
/// `subtotal` and `item_count` are pure functions of `lines`. They are
/// private and recomputed after every mutation, so they can never drift.
/// Lines are kept in insertion order, which is also the display order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SnapshotRepr")]
pub struct CartState {
    lines: Vec<CartLine>,
    subtotal: Money,
    item_count: u64,
}

/// What a persisted snapshot must carry. Derived fields are ignored on read.
#[derive(Deserialize)]
struct SnapshotRepr {
    #[serde(alias = "items")]
    lines: Vec<CartLine>,
}

impl From<SnapshotRepr> for CartState {
    fn from(repr: SnapshotRepr) -> Self {
        CartState::from_lines(repr.lines)
    }
}

impl CartState {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from arbitrary lines.
    ///
    /// Lines sharing an identity are folded into the first occurrence,
    /// zero-quantity lines are dropped, and quantities are capped at
    /// [`MAX_QUANTITY_PER_LINE`].
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut state = Self::new();
        for line in lines {
            state.merge_line(line);
        }
        state.recompute();
        state
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of unit_price * quantity over all lines.
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    /// Sum of quantities over all lines.
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.item_count == 0
    }

    /// Find the line with the given identity.
    pub fn line(&self, product_id: &ProductId, size: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.matches(product_id, size))
    }

    /// Add a line, or grow the quantity of the line with the same identity.
    /// The existing line keeps its name, image and price.
    pub(crate) fn merge_line(&mut self, line: CartLine) {
        if line.quantity == 0 {
            return;
        }
        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.matches(&line.product_id, &line.size))
        {
            existing.quantity = existing
                .quantity
                .saturating_add(line.quantity)
                .min(MAX_QUANTITY_PER_LINE);
        } else {
            let mut line = line;
            line.quantity = line.quantity.min(MAX_QUANTITY_PER_LINE);
            self.lines.push(line);
        }
    }

    /// Remove the line with the given identity. Returns whether one existed.
    pub(crate) fn remove_line(&mut self, product_id: &ProductId, size: &str) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| !l.matches(product_id, size));
        self.lines.len() < len_before
    }

    /// Set the quantity of an existing line; zero or less removes it.
    pub(crate) fn set_quantity(&mut self, product_id: &ProductId, size: &str, quantity: i64) {
        let quantity = clamp_quantity(quantity);
        if quantity == 0 {
            self.remove_line(product_id, size);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.matches(product_id, size)) {
            line.quantity = quantity;
        }
    }

    /// Recompute derived totals from `lines`.
    pub(crate) fn recompute(&mut self) {
        self.subtotal = self.lines.iter().map(CartLine::line_total).sum();
        self.item_count = self.lines.iter().map(|l| u64::from(l.quantity)).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, size: &str, cents: u64, qty: u32) -> CartLine {
        CartLine::new(id, size, Money::from_cents(cents), qty)
    }

    #[test]
    fn test_empty_state() {
        let state = CartState::new();
        assert!(state.is_empty());
        assert_eq!(state.subtotal(), Money::zero());
        assert_eq!(state.item_count(), 0);
    }

    #[test]
    fn test_from_lines_folds_duplicates_and_drops_zero() {
        let state = CartState::from_lines(vec![
            line("a", "M", 1000, 1),
            line("b", "L", 500, 0),
            line("a", "M", 1000, 2),
            line("a", "S", 1000, 1),
        ]);

        assert_eq!(state.line_count(), 2);
        assert_eq!(state.lines()[0].quantity, 3);
        assert_eq!(state.lines()[1].size, "S");
        assert_eq!(state.item_count(), 4);
        assert_eq!(state.subtotal().cents(), 4000);
    }

    #[test]
    fn test_snapshot_wire_format() {
        let state = CartState::from_lines(vec![line("shoe1", "9", 5000, 2)]);
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["subtotal"], serde_json::json!(100));
        assert_eq!(json["itemCount"], serde_json::json!(2));
        assert_eq!(json["lines"][0]["productId"], "shoe1");
    }

    #[test]
    fn test_snapshot_derived_fields_are_recomputed() {
        let state: CartState = serde_json::from_str(
            r#"{"lines":[{"productId":"a","unitPrice":10,"size":"M","quantity":2}],
                "subtotal":999,"itemCount":42}"#,
        )
        .unwrap();

        assert_eq!(state.subtotal().cents(), 2000);
        assert_eq!(state.item_count(), 2);
    }

    #[test]
    fn test_snapshot_accepts_legacy_shape() {
        let state: CartState = serde_json::from_str(
            r#"{"items":[{"id":"a","name":"Tee","price":12.5,"image":"","size":"M","quantity":2}],
                "total":25,"itemCount":2}"#,
        )
        .unwrap();

        assert_eq!(state.line_count(), 1);
        assert_eq!(state.subtotal().cents(), 2500);
    }

    #[test]
    fn test_snapshot_without_lines_is_rejected() {
        assert!(serde_json::from_str::<CartState>(r#"{"subtotal":0}"#).is_err());
        assert!(serde_json::from_str::<CartState>(r#"{"lines":{}}"#).is_err());
        assert!(serde_json::from_str::<CartState>("[]").is_err());
    }
}
