//! Order creation payloads exchanged with the order API.

use serde::{Deserialize, Serialize};

use crate::cart::CartState;
use crate::checkout::DeliveryInfo;
use crate::error::CheckoutError;
use crate::ids::ProductId;

/// One product entry in an order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderProduct {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Delivery block in the shape the order API expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPayload {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city_or_town: String,
    pub zip_code: String,
    pub phone: String,
    pub email: String,
}

impl From<&DeliveryInfo> for DeliveryPayload {
    fn from(info: &DeliveryInfo) -> Self {
        Self {
            first_name: info.first_name.clone(),
            last_name: info.last_name.clone(),
            address: info.address.clone(),
            city_or_town: info.city.clone(),
            zip_code: info.zip_code.clone(),
            phone: info.mobile_number.clone(),
            email: info.email.clone(),
        }
    }
}

/// Body of `POST /v1/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub products: Vec<OrderProduct>,
    pub delivery_info: DeliveryPayload,
}

impl OrderRequest {
    /// Build an order from the cart and validated delivery details.
    ///
    /// One product entry per cart line, in line order. Sizes are not part
    /// of the order payload, so two sizes of one product yield two entries
    /// with the same product id.
    pub fn from_cart(cart: &CartState, delivery: &DeliveryInfo) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        delivery.validate()?;

        let products = cart
            .lines()
            .iter()
            .map(|line| OrderProduct {
                product_id: line.product_id.clone(),
                quantity: line.quantity,
            })
            .collect();

        Ok(Self {
            products,
            delivery_info: DeliveryPayload::from(delivery),
        })
    }

    /// Serialize to the JSON request body.
    pub fn to_json(&self) -> Result<String, CheckoutError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Response of `POST /v1/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub payment_url: Option<String>,
}

impl OrderResponse {
    /// The payment redirect URL, if the order was accepted.
    pub fn payment_url(&self) -> Result<&str, CheckoutError> {
        match (self.status, self.payment_url.as_deref()) {
            (true, Some(url)) if !url.is_empty() => Ok(url),
            _ => Err(CheckoutError::MissingPaymentUrl),
        }
    }
}
