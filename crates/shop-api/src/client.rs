//! Shared HTTP plumbing and the order API client.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shop_cart::checkout::{OrderRequest, OrderResponse};

use crate::config::ApiConfig;

const ORDERS_PATH: &str = "/v1/orders";

/// Error type for storefront API calls.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request error: {0}")]
    Request(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err.to_string())
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else if err.is_decode() {
            FetchError::Deserialization(err.to_string())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

/// Shared reqwest client honoring the configured timeout.
pub(crate) fn build_client(config: &ApiConfig) -> Result<reqwest::Client, FetchError> {
    Ok(reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(concat!("shop/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Fail on a non-2xx status, otherwise decode the JSON body.
pub(crate) async fn decode_json<T: DeserializeOwned>(
    response: reqwest::Response,
    url: &str,
) -> Result<T, FetchError> {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%url, status = status.as_u16(), "request rejected");
        return Err(FetchError::Http {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| FetchError::Deserialization(e.to_string()))
}

/// Remote endpoint that turns an order request into a payment redirect.
#[async_trait]
pub trait OrderApi: Send + Sync {
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderResponse, FetchError>;
}

/// [`OrderApi`] over HTTPS with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpOrderApi {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpOrderApi {
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let client = build_client(&config)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Full URL orders are posted to.
    pub fn orders_url(&self) -> String {
        self.config.endpoint(ORDERS_PATH)
    }
}

#[async_trait]
impl OrderApi for HttpOrderApi {
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderResponse, FetchError> {
        let url = self.orders_url();
        tracing::debug!(%url, products = request.products.len(), "submitting order");

        let response = self.client.post(&url).json(request).send().await?;
        let order: OrderResponse = decode_json(response, &url).await?;

        tracing::debug!(status = order.status, "order response received");
        Ok(order)
    }
}
