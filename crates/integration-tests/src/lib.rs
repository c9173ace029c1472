//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - cart manager against shared stores
//! - `favorites` - favorites persistence
//! - `infinite_scroll` - paging through catalogs of various sizes
//! - `purchase` - checkout, history and cart clearing
//! - `recommendations` - category-based recommendations
//!
//! This crate holds the doubles those tests share: a store whose writes can
//! be made to fail and a catalog whose listings can be made to fail.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rust_decimal::Decimal;
use shopfront_core::{Category, Page, PageRequest, Product, ProductId, Rating};
use shopfront_storefront::catalog::fixtures::demo_products;
use shopfront_storefront::catalog::{Catalog, CatalogError, InMemoryCatalog};
use shopfront_storefront::store::{KeyValueStore, MemoryStore, StoreError};

/// The first `n` demo products (all 60 when `n` is larger).
#[must_use]
pub fn catalog_of(n: usize) -> InMemoryCatalog {
    InMemoryCatalog::new(demo_products().into_iter().take(n).collect())
}

/// A product with the fields tests care about.
#[must_use]
pub fn product(id: &str, category: &str, price_cents: i64) -> Product {
    Product {
        id: ProductId::from(id),
        name: format!("Product {id}"),
        description: String::new(),
        price: Decimal::new(price_cents, 2),
        image: None,
        category: Category::from(category),
        rating: Rating::saturating(4.0),
        stock: 10,
    }
}

/// A [`MemoryStore`] whose writes fail on demand.
///
/// Clones share both the data and the failure switch.
#[derive(Debug, Clone, Default)]
pub struct FailingStore {
    inner: MemoryStore,
    fail_writes: Arc<AtomicBool>,
    failing_key: Arc<Mutex<Option<String>>>,
}

impl FailingStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `set`/`remove` fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make following writes to `key` fail while other keys still work.
    /// `None` lifts the restriction.
    pub fn fail_writes_to(&self, key: Option<&str>) {
        *self
            .failing_key
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = key.map(str::to_string);
    }

    fn check(&self, key: &str) -> Result<(), StoreError> {
        let key_fails = self
            .failing_key
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_deref()
            == Some(key);
        if key_fails || self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Io(io::Error::other("disk full")));
        }
        Ok(())
    }
}

impl KeyValueStore for FailingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.check(key)?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check(key)?;
        self.inner.remove(key).await
    }
}

/// An [`InMemoryCatalog`] whose listings can be made to fail.
#[derive(Debug, Clone)]
pub struct FlakyCatalog {
    inner: InMemoryCatalog,
    failures_left: Arc<AtomicUsize>,
    list_calls: Arc<AtomicUsize>,
}

impl FlakyCatalog {
    #[must_use]
    pub fn new(inner: InMemoryCatalog) -> Self {
        Self {
            inner,
            failures_left: Arc::new(AtomicUsize::new(0)),
            list_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fail the next `count` calls to `list`.
    pub fn fail_next_lists(&self, count: usize) {
        self.failures_left.store(count, Ordering::SeqCst);
    }

    /// Number of `list` calls so far, failed ones included.
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

impl Catalog for FlakyCatalog {
    async fn list(&self, request: PageRequest) -> Result<Page<Product>, CatalogError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failing {
            return Err(CatalogError::Unavailable("connection reset".to_string()));
        }
        self.inner.list(request).await
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        self.inner.get_by_id(id).await
    }

    async fn get_by_category(
        &self,
        category: &Category,
        exclude: Option<&ProductId>,
    ) -> Result<Vec<Product>, CatalogError> {
        self.inner.get_by_category(category, exclude).await
    }
}
