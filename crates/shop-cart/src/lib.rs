//! Shopping cart state, persistence and checkout types for the storefront.
//!
//! This crate provides:
//!
//! - **Cart**: lines identified by product and size, derived totals, and a
//!   pure reducer over a closed set of commands
//! - **Store**: an owned [`CartStore`] that hydrates from a key-value store,
//!   persists after each command and notifies listeners
//! - **Catalog**: products from the storefront API and how they become
//!   cart lines
//! - **Summary**: subtotal, tax and payable total for display
//! - **Checkout**: delivery validation and order API payloads
//!
//! # Example
//!
//! ```rust
//! use shop_cache::MemoryStore;
//! use shop_cart::prelude::*;
//!
//! let mut store = CartStore::open(MemoryStore::new(), StoreOptions::default());
//! store.add_line(CartLine::new("shoe1", "9", Money::from_cents(5000), 1));
//! store.add_line(CartLine::new("shoe1", "9", Money::from_cents(5000), 1));
//!
//! assert_eq!(store.lines().len(), 1);
//! assert_eq!(store.item_count(), 2);
//!
//! let summary = CartSummary::from_state(store.state(), TaxRate::ZERO);
//! assert_eq!(summary.total.display_with("$"), "$100.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod store;
pub mod summary;

pub use error::{CatalogError, CheckoutError, FieldError};
pub use ids::ProductId;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CatalogError, CheckoutError, FieldError};
    pub use crate::ids::ProductId;
    pub use crate::money::Money;

    // Cart
    pub use crate::cart::{reduce, CartCommand, CartLine, CartState, LineKey};

    // Catalog
    pub use crate::catalog::{Product, ProductPage, ProductSort};

    // Store
    pub use crate::store::{CartListener, CartStore, StoreOptions, SubscriptionId};

    // Summary
    pub use crate::summary::{CartSummary, TaxRate};

    // Checkout
    pub use crate::checkout::{DeliveryInfo, OrderProduct, OrderRequest, OrderResponse};
}
