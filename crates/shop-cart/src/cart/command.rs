//! Cart commands and the reducer that applies them.

use crate::cart::{CartLine, CartState};
use crate::ids::ProductId;

/// The closed set of mutations a cart accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    /// Append a line, or grow the quantity of the line with the same
    /// `(product_id, size)`.
    AddLine(CartLine),
    /// Delete a line. Absent lines are ignored.
    RemoveLine { product_id: ProductId, size: String },
    /// Set a line's quantity exactly. Zero or less removes the line; absent
    /// lines are ignored.
    SetQuantity {
        product_id: ProductId,
        size: String,
        quantity: i64,
    },
    /// Reset to the empty cart.
    Clear,
    /// Replace the whole state with a previously persisted snapshot.
    Restore(CartState),
}

impl CartCommand {
    pub fn remove(product_id: impl Into<ProductId>, size: impl Into<String>) -> Self {
        CartCommand::RemoveLine {
            product_id: product_id.into(),
            size: size.into(),
        }
    }

    pub fn set_quantity(
        product_id: impl Into<ProductId>,
        size: impl Into<String>,
        quantity: i64,
    ) -> Self {
        CartCommand::SetQuantity {
            product_id: product_id.into(),
            size: size.into(),
            quantity,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            CartCommand::AddLine(_) => "add_line",
            CartCommand::RemoveLine { .. } => "remove_line",
            CartCommand::SetQuantity { .. } => "set_quantity",
            CartCommand::Clear => "clear",
            CartCommand::Restore(_) => "restore",
        }
    }

    /// Whether the resulting state should be written back to storage.
    /// A restored snapshot came from storage and is not written again.
    pub fn persists(&self) -> bool {
        !matches!(self, CartCommand::Restore(_))
    }
}

/// Apply a command to a state, producing the next state.
///
/// Every transition recomputes the derived totals from the lines.
pub fn reduce(state: CartState, command: CartCommand) -> CartState {
    let mut state = state;
    match command {
        CartCommand::AddLine(line) => state.merge_line(line),
        CartCommand::RemoveLine { product_id, size } => {
            state.remove_line(&product_id, &size);
        }
        CartCommand::SetQuantity {
            product_id,
            size,
            quantity,
        } => state.set_quantity(&product_id, &size, quantity),
        CartCommand::Clear => return CartState::new(),
        CartCommand::Restore(snapshot) => return snapshot,
    }
    state.recompute();
    state
}
