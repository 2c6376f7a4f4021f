//! Checkout module.
//!
//! Turns a cart plus delivery details into an order request, and reads the
//! order API's answer.

mod delivery;
mod order;

pub use delivery::DeliveryInfo;
pub use order::{DeliveryPayload, OrderProduct, OrderRequest, OrderResponse};
