//! REST catalog client.
//!
//! Talks to a JSON product service:
//!
//! - `GET {base}/products?page={page}&limit={limit}` -> `{products, hasMore, total}`
//! - `GET {base}/products/{id}` -> product, or 404
//! - `GET {base}/products?category={category}` -> `{products, hasMore, total}`
//!
//! Page and category responses are cached with `moka` for the configured
//! TTL. Single products are always fetched, so prices are current.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use shopfront_core::{Category, Page, PageRequest, Product, ProductId};
use tracing::{debug, instrument};
use url::Url;

use super::cache::{CacheKey, CacheValue};
use super::{Catalog, CatalogError};

const CACHE_CAPACITY: u64 = 1000;

/// List response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    products: Vec<Product>,
    #[serde(default)]
    has_more: bool,
    total: usize,
}

impl From<ListResponse> for Page<Product> {
    fn from(response: ListResponse) -> Self {
        Self {
            items: response.products,
            has_more: response.has_more,
            total: response.total,
        }
    }
}

// =============================================================================
// RemoteCatalog
// =============================================================================

/// Client for a REST product catalog.
#[derive(Clone)]
pub struct RemoteCatalog {
    inner: Arc<RemoteCatalogInner>,
}

struct RemoteCatalogInner {
    client: reqwest::Client,
    base_url: Url,
    api_token: Option<SecretString>,
    cache: Cache<CacheKey, CacheValue>,
}

impl std::fmt::Debug for RemoteCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteCatalog")
            .field("base_url", &self.inner.base_url.as_str())
            .field(
                "api_token",
                &self.inner.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish_non_exhaustive()
    }
}

impl RemoteCatalog {
    /// Create a client for the catalog at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidUrl` if `base_url` cannot carry a path,
    /// or `CatalogError::Http` if the HTTP client cannot be built.
    pub fn new(
        base_url: Url,
        api_token: Option<SecretString>,
        cache_ttl: Duration,
    ) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().build()?;
        Self::with_client(client, base_url, api_token, cache_ttl)
    }

    /// Like [`new`](Self::new), with a caller-configured HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidUrl` if `base_url` cannot carry a path.
    pub fn with_client(
        client: reqwest::Client,
        base_url: Url,
        api_token: Option<SecretString>,
        cache_ttl: Duration,
    ) -> Result<Self, CatalogError> {
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl(base_url.to_string()));
        }

        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(RemoteCatalogInner {
                client,
                base_url,
                api_token,
                cache,
            }),
        })
    }

    /// `{base}/products[/{id}]`.
    fn endpoint(&self, id: Option<&ProductId>) -> Result<Url, CatalogError> {
        let mut url = self.inner.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| CatalogError::InvalidUrl(self.inner.base_url.to_string()))?;
            segments.pop_if_empty().push("products");
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    /// GET a JSON document. A 404 yields `None`.
    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, CatalogError> {
        let mut request = self.inner.client.get(url.clone());
        if let Some(token) = &self.inner.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                url = %url,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    url = %url,
                    body = %body.chars().take(500).collect::<String>(),
                    "Failed to parse catalog response"
                );
                Err(CatalogError::Parse(e))
            }
        }
    }

    async fn fetch_list(&self, url: Url) -> Result<Page<Product>, CatalogError> {
        Ok(self
            .fetch::<ListResponse>(url)
            .await?
            .map_or_else(Page::empty, Page::from))
    }
}

impl Catalog for RemoteCatalog {
    #[instrument(skip(self, request), fields(page = request.page, page_size = request.page_size))]
    async fn list(&self, request: PageRequest) -> Result<Page<Product>, CatalogError> {
        let key = CacheKey::Page(request);
        if let Some(CacheValue::Page(page)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for catalog page");
            return Ok(page);
        }

        let mut url = self.endpoint(None)?;
        url.query_pairs_mut()
            .append_pair("page", &request.page.to_string())
            .append_pair("limit", &request.page_size.to_string());

        let page = self.fetch_list(url).await?;
        self.inner
            .cache
            .insert(key, CacheValue::Page(page.clone()))
            .await;
        Ok(page)
    }

    #[instrument(skip(self, id), fields(product_id = %id))]
    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        self.fetch(self.endpoint(Some(id))?).await
    }

    #[instrument(skip(self, category), fields(category = %category))]
    async fn get_by_category(
        &self,
        category: &Category,
        exclude: Option<&ProductId>,
    ) -> Result<Vec<Product>, CatalogError> {
        let key = CacheKey::Category(category.clone());
        let products = if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&key).await
        {
            debug!("Cache hit for category");
            products
        } else {
            let mut url = self.endpoint(None)?;
            url.query_pairs_mut()
                .append_pair("category", category.as_str());

            let products = self.fetch_list(url).await?.items;
            self.inner
                .cache
                .insert(key, CacheValue::Products(products.clone()))
                .await;
            products
        };

        Ok(products
            .into_iter()
            .filter(|p| &p.category == category && Some(&p.id) != exclude)
            .collect())
    }
}
