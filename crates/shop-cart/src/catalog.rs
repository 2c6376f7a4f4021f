//! Products as served by the storefront's product API.
//!
//! The cart only needs a product's name, price, first image, offered sizes
//! and stock level; everything else the API returns is kept for display
//! or ignored.

use serde::{Deserialize, Serialize};

use crate::cart::{CartLine, MAX_QUANTITY_PER_LINE};
use crate::error::CatalogError;
use crate::ids::ProductId;
use crate::money::Money;

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub description: String,
    /// Sizes offered. An empty list means the product is not sized.
    #[serde(rename = "size", default)]
    pub sizes: Vec<String>,
    /// Units available.
    #[serde(default)]
    pub in_stock: u32,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Main image, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn is_in_stock(&self) -> bool {
        self.in_stock > 0
    }

    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.is_empty() || self.sizes.iter().any(|s| s == size)
    }

    /// Build a cart line for `quantity` units in `size`.
    ///
    /// The quantity is clamped to `1..=in_stock` (and the per-line cap).
    /// Name, price and image come from the product.
    pub fn to_cart_line(&self, size: &str, quantity: u32) -> Result<CartLine, CatalogError> {
        if !self.offers_size(size) {
            return Err(CatalogError::UnknownSize {
                product_id: self.id.to_string(),
                size: size.to_string(),
                available: self.sizes.clone(),
            });
        }
        if !self.is_in_stock() {
            return Err(CatalogError::OutOfStock(self.id.to_string()));
        }

        let quantity = quantity.clamp(1, self.in_stock.min(MAX_QUANTITY_PER_LINE));
        Ok(CartLine::new(self.id.clone(), size, self.price, quantity)
            .with_name(self.name.clone())
            .with_image(self.primary_image().unwrap_or_default()))
    }
}

/// One page of the product listing.
///
/// The listing endpoint has answered with a bare array, with `{"data": [...]}`
/// and with `{"products": [...]}`; all three decode here. `totalPages`
/// defaults to 1 when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProductPageRepr", rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total_pages: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProductPageRepr {
    Bare(Vec<Product>),
    Wrapped {
        #[serde(default, alias = "products")]
        data: Vec<Product>,
        #[serde(default, rename = "totalPages")]
        total_pages: Option<u32>,
    },
}

impl From<ProductPageRepr> for ProductPage {
    fn from(repr: ProductPageRepr) -> Self {
        match repr {
            ProductPageRepr::Bare(products) => Self {
                products,
                total_pages: 1,
            },
            ProductPageRepr::Wrapped { data, total_pages } => Self {
                products: data,
                total_pages: total_pages.unwrap_or(1).max(1),
            },
        }
    }
}

/// Envelope of the single-product endpoint: `{"data": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductEnvelope {
    pub data: Product,
}

/// Listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// As returned by the API.
    #[default]
    Default,
    /// Cheapest first.
    Price,
    /// Most units in stock first.
    Availability,
}

impl ProductSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductSort::Default => "default",
            ProductSort::Price => "price",
            ProductSort::Availability => "stock",
        }
    }

    /// Reorder `products` in place. Ties keep their API order.
    pub fn apply(&self, products: &mut [Product]) {
        match self {
            ProductSort::Default => {}
            ProductSort::Price => products.sort_by_key(|p| p.price),
            ProductSort::Availability => products.sort_by(|a, b| b.in_stock.cmp(&a.in_stock)),
        }
    }
}
