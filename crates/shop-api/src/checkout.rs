//! Cart-to-payment flow on top of an [`OrderApi`].

use shop_cart::cart::CartState;
use shop_cart::checkout::{DeliveryInfo, OrderRequest};
use shop_cart::CheckoutError;

use crate::client::{FetchError, OrderApi};

/// Anything that can stop a checkout.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Build the order for `cart`, submit it and return the payment redirect.
///
/// Nothing is sent when the cart is empty or the delivery details fail
/// validation. The cart itself is left untouched either way.
pub async fn place_order<A>(
    api: &A,
    cart: &CartState,
    delivery: &DeliveryInfo,
) -> Result<String, OrderError>
where
    A: OrderApi + ?Sized,
{
    let request = OrderRequest::from_cart(cart, delivery)?;
    let response = api.create_order(&request).await?;
    let url = response.payment_url()?;
    tracing::info!(products = request.products.len(), "order placed");
    Ok(url.to_string())
}
