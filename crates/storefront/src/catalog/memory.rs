//! In-memory catalog.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use shopfront_core::{Category, Page, PageRequest, Product, ProductId};
use tokio::sync::RwLock;
use tracing::warn;

use super::{Catalog, CatalogError};

/// A catalog held in memory.
///
/// Cheaply cloneable; clones share the product list, so a price change made
/// through one handle is seen by every reader.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<Vec<Product>>>,
    latency: Duration,
}

impl InMemoryCatalog {
    /// Create a catalog over `products`, kept in the given order.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
            latency: Duration::ZERO,
        }
    }

    /// Delay every call by `latency`, like a network round trip.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Change a product's unit price. Returns `false` for an unknown id or a
    /// negative price, leaving the catalog unchanged.
    pub async fn set_price(&self, id: &ProductId, price: Decimal) -> bool {
        if price.is_sign_negative() && !price.is_zero() {
            warn!(product_id = %id, %price, "Ignoring negative price");
            return false;
        }
        let mut products = self.products.write().await;
        match products.iter_mut().find(|p| &p.id == id) {
            Some(product) => {
                product.price = price;
                true
            }
            None => false,
        }
    }

    /// Number of products.
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    /// Whether the catalog has no products.
    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Catalog for InMemoryCatalog {
    async fn list(&self, request: PageRequest) -> Result<Page<Product>, CatalogError> {
        self.simulate_latency().await;
        let products = self.products.read().await;
        Ok(Page::slice(products.as_slice(), request))
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        self.simulate_latency().await;
        Ok(self
            .products
            .read()
            .await
            .iter()
            .find(|p| &p.id == id)
            .cloned())
    }

    async fn get_by_category(
        &self,
        category: &Category,
        exclude: Option<&ProductId>,
    ) -> Result<Vec<Product>, CatalogError> {
        self.simulate_latency().await;
        Ok(self
            .products
            .read()
            .await
            .iter()
            .filter(|p| &p.category == category && Some(&p.id) != exclude)
            .cloned()
            .collect())
    }
}
