//! Shopping cart module.
//!
//! Contains the cart aggregate, its lines, and the command reducer.

mod command;
mod line;
mod state;

pub use command::{reduce, CartCommand};
pub use line::{CartLine, LineKey, MAX_QUANTITY_PER_LINE};
pub use state::CartState;
