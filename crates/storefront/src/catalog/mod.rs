//! Product catalog access.
//!
//! # Backends
//!
//! - [`InMemoryCatalog`] - a shared product list, seeded from
//!   [`fixtures::demo_products`] for the demo storefront
//! - [`RemoteCatalog`] - a REST backend, responses cached via `moka`
//!
//! [`CatalogBackend`] picks one from configuration. The catalog is read-only
//! from the storefront's point of view.

mod cache;
pub mod fixtures;
mod memory;
mod remote;

pub use memory::InMemoryCatalog;
pub use remote::RemoteCatalog;

use serde::Serialize;
use shopfront_core::{Category, Page, PageRequest, Product, ProductId};
use thiserror::Error;
use tracing::instrument;

use crate::config::CatalogConfig;
use crate::error::StorefrontError;

/// How many same-category products a detail view suggests.
pub const RELATED_PRODUCTS_LIMIT: usize = 4;

/// Errors that can occur when reading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Backend answered with a non-success status.
    #[error("Catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Configured base URL cannot carry a path.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Catalog cannot be reached for another reason.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the products on sale.
pub trait Catalog {
    /// One page of the catalog, in catalog order.
    async fn list(&self, request: PageRequest) -> Result<Page<Product>, CatalogError>;

    /// A single product, or `None` if the id is unknown.
    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, CatalogError>;

    /// Every product in `category`, in catalog order, optionally leaving one
    /// product out.
    async fn get_by_category(
        &self,
        category: &Category,
        exclude: Option<&ProductId>,
    ) -> Result<Vec<Product>, CatalogError>;
}

impl<T: Catalog> Catalog for &T {
    async fn list(&self, request: PageRequest) -> Result<Page<Product>, CatalogError> {
        (**self).list(request).await
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        (**self).get_by_id(id).await
    }

    async fn get_by_category(
        &self,
        category: &Category,
        exclude: Option<&ProductId>,
    ) -> Result<Vec<Product>, CatalogError> {
        (**self).get_by_category(category, exclude).await
    }
}

// =============================================================================
// CatalogBackend
// =============================================================================

/// The catalog selected by configuration.
#[derive(Debug, Clone)]
pub enum CatalogBackend {
    /// Built-in demo products.
    Demo(InMemoryCatalog),
    /// REST catalog service.
    Remote(RemoteCatalog),
}

impl CatalogBackend {
    /// Build the catalog described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` if the HTTP client cannot be created.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        match &config.base_url {
            Some(base_url) => Ok(Self::Remote(RemoteCatalog::new(
                base_url.clone(),
                config.api_token.clone(),
                config.cache_ttl,
            )?)),
            None => Ok(Self::Demo(
                InMemoryCatalog::new(fixtures::demo_products())
                    .with_latency(config.simulated_latency),
            )),
        }
    }
}

impl Catalog for CatalogBackend {
    async fn list(&self, request: PageRequest) -> Result<Page<Product>, CatalogError> {
        match self {
            Self::Demo(catalog) => catalog.list(request).await,
            Self::Remote(catalog) => catalog.list(request).await,
        }
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        match self {
            Self::Demo(catalog) => catalog.get_by_id(id).await,
            Self::Remote(catalog) => catalog.get_by_id(id).await,
        }
    }

    async fn get_by_category(
        &self,
        category: &Category,
        exclude: Option<&ProductId>,
    ) -> Result<Vec<Product>, CatalogError> {
        match self {
            Self::Demo(catalog) => catalog.get_by_category(category, exclude).await,
            Self::Remote(catalog) => catalog.get_by_category(category, exclude).await,
        }
    }
}

// =============================================================================
// Product detail
// =============================================================================

/// A product together with the suggestions shown beside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product: Product,
    pub related: Vec<Product>,
}

/// Up to [`RELATED_PRODUCTS_LIMIT`] other products from the same category.
///
/// # Errors
///
/// Returns `CatalogError` if the catalog cannot be read.
pub async fn related_products<C: Catalog>(
    catalog: &C,
    product: &Product,
) -> Result<Vec<Product>, CatalogError> {
    let mut related = catalog
        .get_by_category(&product.category, Some(&product.id))
        .await?;
    related.truncate(RELATED_PRODUCTS_LIMIT);
    Ok(related)
}

/// Load a product and its related products for a detail view.
///
/// # Errors
///
/// Returns `StorefrontError::ProductNotFound` for an unknown id, or
/// `StorefrontError::Catalog` if the catalog cannot be read.
#[instrument(skip(catalog, id), fields(product_id = %id))]
pub async fn product_detail<C: Catalog>(
    catalog: &C,
    id: &ProductId,
) -> Result<ProductDetail, StorefrontError> {
    let product = catalog
        .get_by_id(id)
        .await?
        .ok_or_else(|| StorefrontError::ProductNotFound(id.clone()))?;
    let related = related_products(catalog, &product).await?;
    Ok(ProductDetail { product, related })
}
