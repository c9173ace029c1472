//! Product recommendations.
//!
//! Recommendations favor the categories the shopper has shown interest in:
//! first the categories of cart products, then those of past purchases. A
//! shopper with no history gets the start of the catalog.

use std::collections::HashSet;

use shopfront_core::{Category, PageRequest, Product, ProductId, PurchaseHistory};
use tracing::{debug, instrument};

use crate::cart::load_cart;
use crate::catalog::{Catalog, CatalogError};
use crate::error::Result;
use crate::store::{KeyValueStore, keys, load_json};

/// Products taken from each category of interest.
pub const PER_CATEGORY_LIMIT: usize = 4;

/// Most products ever recommended at once.
pub const RECOMMENDATION_LIMIT: usize = 8;

/// Recommend products from the categories of `cart_ids` then `history`.
///
/// Categories are visited in first-seen order and ids the catalog doesn't
/// know are skipped. Each category contributes up to
/// [`PER_CATEGORY_LIMIT`] products in catalog order, leaving out `exclude`.
/// A product reached through two categories appears once, at its first
/// position. The result holds at most [`RECOMMENDATION_LIMIT`] products.
///
/// # Errors
///
/// Returns `CatalogError` if the catalog cannot be read.
#[instrument(skip_all, fields(cart = cart_ids.len(), history = history.len()))]
pub async fn recommend<C: Catalog>(
    catalog: &C,
    cart_ids: &[ProductId],
    history: &[ProductId],
    exclude: Option<&ProductId>,
) -> std::result::Result<Vec<Product>, CatalogError> {
    let categories = interest_categories(catalog, cart_ids.iter().chain(history)).await?;

    if categories.is_empty() {
        debug!("No shopping history, recommending from the top of the catalog");
        let limit = u32::try_from(RECOMMENDATION_LIMIT).unwrap_or(u32::MAX);
        return Ok(catalog.list(PageRequest::first(limit)).await?.items);
    }

    let mut seen = HashSet::new();
    let mut picks = Vec::with_capacity(RECOMMENDATION_LIMIT);
    for category in &categories {
        let products = catalog.get_by_category(category, exclude).await?;
        for product in products.into_iter().take(PER_CATEGORY_LIMIT) {
            if seen.insert(product.id.clone()) {
                picks.push(product);
            }
        }
        if picks.len() >= RECOMMENDATION_LIMIT {
            break;
        }
    }

    picks.truncate(RECOMMENDATION_LIMIT);
    debug!(categories = categories.len(), picks = picks.len(), "Built recommendations");
    Ok(picks)
}

/// Distinct categories of `ids`, in first-seen order.
async fn interest_categories<'a, C, I>(
    catalog: &C,
    ids: I,
) -> std::result::Result<Vec<Category>, CatalogError>
where
    C: Catalog,
    I: IntoIterator<Item = &'a ProductId>,
{
    let mut looked_up = HashSet::new();
    let mut categories: Vec<Category> = Vec::new();

    for id in ids {
        if !looked_up.insert(id) {
            continue;
        }
        if let Some(product) = catalog.get_by_id(id).await?
            && !categories.contains(&product.category)
        {
            categories.push(product.category);
        }
    }

    Ok(categories)
}

/// Recommendations for the shopper whose cart and purchase history live in
/// the store.
#[derive(Debug, Clone)]
pub struct RecommendationEngine<S, C> {
    store: S,
    catalog: C,
}

impl<S: KeyValueStore, C: Catalog> RecommendationEngine<S, C> {
    #[must_use]
    pub const fn new(store: S, catalog: C) -> Self {
        Self { store, catalog }
    }

    /// Recommend products from the persisted cart and purchase history.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Store` if the store cannot be read, or
    /// `StorefrontError::Catalog` if the catalog cannot be read.
    pub async fn recommend(&self, exclude: Option<&ProductId>) -> Result<Vec<Product>> {
        let cart = load_cart(&self.store).await?;
        let history: PurchaseHistory = load_json(&self.store, keys::PURCHASE_HISTORY).await?;
        let cart_ids: Vec<ProductId> = cart.product_ids().cloned().collect();

        Ok(recommend(&self.catalog, &cart_ids, history.as_slice(), exclude).await?)
    }
}
