//! HTTP client for the product API.

use async_trait::async_trait;
use reqwest::Url;
use shop_cart::catalog::{Product, ProductEnvelope, ProductPage};
use shop_cart::ProductId;

use crate::client::{build_client, decode_json, FetchError};
use crate::config::ApiConfig;

const PRODUCTS_PATH: &str = "/v1/products";

/// Read access to the storefront catalog.
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// One page of the listing. Pages start at 1.
    async fn list_products(&self, page: u32) -> Result<ProductPage, FetchError>;

    async fn get_product(&self, id: &ProductId) -> Result<Product, FetchError>;
}

/// [`ProductApi`] over HTTPS, sharing [`ApiConfig`] with the order client.
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpProductApi {
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let client = build_client(&config)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn base(&self) -> Result<Url, FetchError> {
        let raw = self.config.endpoint(PRODUCTS_PATH);
        Url::parse(&raw).map_err(|e| FetchError::Request(format!("invalid URL {raw}: {e}")))
    }

    /// Listing URL for `page` (clamped to at least 1).
    pub fn list_url(&self, page: u32) -> Result<String, FetchError> {
        let mut url = self.base()?;
        url.query_pairs_mut()
            .append_pair("page", &page.max(1).to_string());
        Ok(url.into())
    }

    /// Detail URL for `id`, with the id escaped as one path segment.
    pub fn product_url(&self, id: &ProductId) -> Result<String, FetchError> {
        let mut url = self.base()?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Request("base URL cannot take a path".to_string()))?
            .push(id.as_str());
        Ok(url.into())
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn list_products(&self, page: u32) -> Result<ProductPage, FetchError> {
        let url = self.list_url(page)?;
        tracing::debug!(%url, "listing products");

        let response = self.client.get(&url).send().await?;
        let listing: ProductPage = decode_json(response, &url).await?;

        tracing::debug!(
            count = listing.products.len(),
            total_pages = listing.total_pages,
            "products received"
        );
        Ok(listing)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, FetchError> {
        let url = self.product_url(id)?;
        tracing::debug!(%url, "fetching product");

        let response = self.client.get(&url).send().await?;
        let envelope: ProductEnvelope = decode_json(response, &url).await?;
        Ok(envelope.data)
    }
}
