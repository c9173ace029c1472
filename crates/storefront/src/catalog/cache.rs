//! Cache types for REST catalog responses.

use shopfront_core::{Category, Page, PageRequest, Product};

/// Cache key for catalog lookups.
///
/// Single-product lookups are not cached: they price cart lines, and a
/// price change must show up on the next read.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Page(PageRequest),
    Category(Category),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Page(Page<Product>),
    Products(Vec<Product>),
}
