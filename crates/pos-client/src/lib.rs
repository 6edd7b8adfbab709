//! pos-client: HTTP adapter for the POS backend.
//!
//! Two endpoints only: `GET /api/products` for the catalog snapshot and
//! `POST /api/orders` for checkout. Implements the `CatalogGateway` port.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;
use serde::Deserialize;

use pos_types::domain::catalog::Catalog;
use pos_types::ports::catalog_gateway::{CatalogGateway, GatewayError, OrderDraft, OrderReceipt};

#[derive(Clone)]
pub struct PosClientBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

#[derive(Clone)]
pub struct PosClient {
    base: Url,
    client: reqwest::Client,
}

/// Failure body shape of the backend: `{"error": "..."}`.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

fn transport(e: reqwest::Error) -> GatewayError {
    GatewayError::Transport(e.to_string())
}

fn decode(e: reqwest::Error) -> GatewayError {
    GatewayError::Decode(e.to_string())
}

impl PosClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<PosClientBuilder> {
        let base = Url::parse(base_url).context("invalid base url")?;
        Ok(PosClientBuilder {
            base,
            headers: HeaderMap::new(),
            timeout: None,
            client: None,
        })
    }

    fn url(&self, path: &str) -> Result<Url, GatewayError> {
        self.base
            .join(path)
            .map_err(|e| GatewayError::Transport(format!("failed to join url: {e}")))
    }

    /// `GET /api/products`: the full product and category listing.
    pub async fn fetch_catalog(&self) -> Result<Catalog, GatewayError> {
        let res = self
            .client
            .get(self.url("api/products")?)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;
        res.json().await.map_err(decode)
    }

    /// `POST /api/orders`. Non-2xx responses surface the server's `error`
    /// message; bodies that fail to parse fall back to the status code.
    pub async fn place_order(&self, draft: &OrderDraft) -> Result<OrderReceipt, GatewayError> {
        let res = self
            .client
            .post(self.url("api/orders")?)
            .json(draft)
            .send()
            .await
            .map_err(transport)?;

        let status = res.status();
        if status.is_success() {
            return res.json().await.map_err(decode);
        }
        match res.json::<ErrorBody>().await {
            Ok(body) => Err(GatewayError::Rejected(body.error)),
            Err(_) => Err(GatewayError::Rejected(format!(
                "order rejected with status {status}"
            ))),
        }
    }
}

#[async_trait]
impl CatalogGateway for PosClient {
    async fn load_catalog(&self) -> Result<Catalog, GatewayError> {
        self.fetch_catalog().await
    }

    async fn submit_order(&self, draft: OrderDraft) -> Result<OrderReceipt, GatewayError> {
        self.place_order(&draft).await
    }
}

impl PosClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<PosClient> {
        if let Some(client) = self.client {
            return Ok(PosClient {
                base: self.base,
                client,
            });
        }

        let mut builder = reqwest::Client::builder();
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(PosClient {
            base: self.base,
            client,
        })
    }
}
