//! REST-backed catalog source.

use async_trait::async_trait;
use serde::Deserialize;

use shopfront_catalog::ProductRecord;
use shopfront_core::CategoryId;

use crate::config::StorefrontConfig;
use crate::source::{CatalogSource, FetchFailure};

/// Product list as the backend may send it: a bare array or wrapped in `items`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProductsBody {
    Bare(Vec<ProductRecord>),
    Wrapped { items: Vec<ProductRecord> },
}

impl ProductsBody {
    fn into_records(self) -> Vec<ProductRecord> {
        match self {
            ProductsBody::Bare(items) | ProductsBody::Wrapped { items } => items,
        }
    }
}

/// Thin proxy to an external catalog API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// `None` when no API URL is configured.
    pub fn from_config(config: &StorefrontConfig) -> Option<Self> {
        let catalog = Self::new(config.api_url.as_deref()?);
        Some(match &config.api_token {
            Some(token) => catalog.with_token(token.clone()),
            None => catalog,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_products(
        &self,
        path: &str,
        query: Option<&str>,
    ) -> Result<Vec<ProductRecord>, FetchFailure> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.get(&url);
        if let Some(q) = query {
            req = req.query(&[("q", q)]);
        }
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(|e| FetchFailure::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| FetchFailure::Network(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "catalog API returned an error");
            return Err(FetchFailure::Api(status.as_u16(), body));
        }

        let parsed: ProductsBody =
            serde_json::from_str(&body).map_err(|e| FetchFailure::Parse(e.to_string()))?;
        Ok(parsed.into_records())
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch_products(&self, query: Option<&str>) -> Result<Vec<ProductRecord>, FetchFailure> {
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        self.get_products("/products", query).await
    }

    async fn fetch_products_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<ProductRecord>, FetchFailure> {
        self.get_products(&format!("/categories/{category_id}/products"), None)
            .await
    }
}
