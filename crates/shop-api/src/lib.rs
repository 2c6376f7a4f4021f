//! Storefront API clients: product catalog and order checkout.
//!
//! This crate provides:
//! - `ProductApi` - async seam for reading the catalog
//! - `HttpProductApi` - reqwest implementation of `/v1/products`
//! - `OrderApi` - async seam for submitting orders
//! - `HttpOrderApi` - reqwest implementation posting to `/v1/orders`
//! - `ApiConfig` - base URL and timeout
//! - `place_order` - validate, submit and extract the payment redirect

mod catalog;
mod checkout;
mod client;
mod config;

#[cfg(test)]
mod test_support;

pub use catalog::*;
pub use checkout::*;
pub use client::*;
pub use config::*;
