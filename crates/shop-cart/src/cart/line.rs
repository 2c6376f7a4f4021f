//! Cart line types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum quantity allowed per cart line.
pub const MAX_QUANTITY_PER_LINE: u32 = 9999;

/// Identity of a cart line: a product in one size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: String,
}

impl LineKey {
    pub fn new(product_id: impl Into<ProductId>, size: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            size: size.into(),
        }
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (size {})", self.product_id, self.size)
    }
}

/// One distinct purchasable configuration in the cart.
///
/// Field names on the wire follow the storefront's snapshot format
/// (`productId`, `unitPrice`, ...). The older `id` and `price` names are
/// accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product being purchased.
    #[serde(alias = "id")]
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    #[serde(default)]
    pub name: String,
    /// Product image URL (denormalized for display).
    #[serde(default)]
    pub image: String,
    /// Price of a single unit.
    #[serde(alias = "price")]
    pub unit_price: Money,
    /// Size variant.
    pub size: String,
    /// Quantity, at least 1 in any committed cart state.
    pub quantity: u32,
}

impl CartLine {
    /// Create a new line with empty display metadata.
    pub fn new(
        product_id: impl Into<ProductId>,
        size: impl Into<String>,
        unit_price: Money,
        quantity: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: String::new(),
            image: String::new(),
            unit_price,
            size: size.into(),
            quantity,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// The `(product_id, size)` identity of this line.
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id.clone(), self.size.clone())
    }

    /// Check whether this line has the given identity.
    pub fn matches(&self, product_id: &ProductId, size: &str) -> bool {
        &self.product_id == product_id && self.size == size
    }

    /// unit_price * quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// Clamp a requested quantity into `0..=MAX_QUANTITY_PER_LINE`.
pub(crate) fn clamp_quantity(quantity: i64) -> u32 {
    quantity.clamp(0, i64::from(MAX_QUANTITY_PER_LINE)) as u32
}
