//! Catalog and checkout error types.
//!
//! Cart commands never fail; the errors here come from picking a product
//! variant and from turning a cart into an order.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single failed delivery form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name as shown on the delivery form (e.g. "zipCode").
    pub field: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors that can occur while checking out.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// The cart has no lines.
    #[error("Your cart is empty")]
    EmptyCart,

    /// One or more delivery fields failed validation.
    #[error("Invalid delivery information: {}", join_fields(.0))]
    InvalidDelivery(Vec<FieldError>),

    /// The order API accepted the request but returned no payment URL.
    #[error("Payment URL not received")]
    MissingPaymentUrl,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Errors that can occur while turning a catalog product into a cart line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The requested size is not offered for the product.
    #[error("Size {size} is not available for {product_id} (sizes: {})", .available.join(", "))]
    UnknownSize {
        product_id: String,
        size: String,
        available: Vec<String>,
    },

    /// The product has no stock left.
    #[error("Out of stock: {0}")]
    OutOfStock(String),
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
