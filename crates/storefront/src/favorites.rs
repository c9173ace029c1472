//! Favorites manager.
//!
//! Favorites are a best-effort convenience: a failed write is logged and
//! otherwise ignored, with the in-memory set left as it was.

use shopfront_core::{FavoritesSet, Product, ProductId};
use tracing::{debug, instrument, warn};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::store::{KeyValueStore, keys, load_json, save_json};

/// Session favorites backed by a [`KeyValueStore`].
#[derive(Debug)]
pub struct FavoritesManager<S> {
    store: S,
    favorites: FavoritesSet,
}

impl<S: KeyValueStore> FavoritesManager<S> {
    /// Create a manager with no favorites. Call [`load`](Self::load) to pick
    /// up persisted favorites.
    pub const fn new(store: S) -> Self {
        Self {
            store,
            favorites: FavoritesSet::new(),
        }
    }

    /// Read the persisted favorites.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Store` if the store cannot be read.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<()> {
        self.favorites = load_json(&self.store, keys::FAVORITES).await?;
        debug!(count = self.favorites.len(), "Loaded favorites");
        Ok(())
    }

    /// Mark a product as a favorite. Returns `false` if the write failed.
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub async fn add(&mut self, product_id: ProductId) -> bool {
        self.update(|favorites| {
            favorites.insert(product_id);
        })
        .await
    }

    /// Unmark a product. Returns `false` if the write failed.
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub async fn remove(&mut self, product_id: &ProductId) -> bool {
        self.update(|favorites| {
            favorites.remove(product_id);
        })
        .await
    }

    /// Flip a product's membership and return whether it is now a favorite.
    ///
    /// If the write fails the membership is unchanged and so is the result.
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub async fn toggle(&mut self, product_id: &ProductId) -> bool {
        let id = product_id.clone();
        self.update(|favorites| {
            favorites.toggle(id);
        })
        .await;
        self.favorites.contains(product_id)
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.favorites.contains(product_id)
    }

    /// Favorite ids in the order they were added.
    #[must_use]
    pub fn ids(&self) -> Vec<ProductId> {
        self.favorites.iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// Resolve favorites to products, skipping ids the catalog doesn't know.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Catalog` if a lookup fails.
    pub async fn products<C: Catalog>(&self, catalog: &C) -> Result<Vec<Product>> {
        let mut products = Vec::with_capacity(self.favorites.len());
        for id in self.favorites.iter() {
            if let Some(product) = catalog.get_by_id(id).await? {
                products.push(product);
            }
        }
        Ok(products)
    }

    async fn update<F>(&mut self, change: F) -> bool
    where
        F: FnOnce(&mut FavoritesSet),
    {
        let mut next = self.favorites.clone();
        change(&mut next);

        match save_json(&self.store, keys::FAVORITES, &next).await {
            Ok(()) => {
                self.favorites = next;
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to save favorites");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::catalog::fixtures::demo_products;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_double_toggle_restores_membership() {
        let store = MemoryStore::new();
        let mut favorites = FavoritesManager::new(store.clone());
        let p7 = ProductId::from("7");

        assert!(favorites.toggle(&p7).await);
        assert_eq!(
            store.get(keys::FAVORITES).await.expect("get").as_deref(),
            Some(r#"["7"]"#)
        );
        assert!(!favorites.toggle(&p7).await);
        assert!(favorites.is_empty());
        assert_eq!(
            store.get(keys::FAVORITES).await.expect("get").as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_add_is_a_set_insert() {
        let mut favorites = FavoritesManager::new(MemoryStore::new());
        favorites.add(ProductId::from("2")).await;
        favorites.add(ProductId::from("1")).await;
        favorites.add(ProductId::from("2")).await;

        assert_eq!(favorites.ids(), vec![ProductId::from("2"), ProductId::from("1")]);
    }

    #[tokio::test]
    async fn test_products_skip_unknown_ids() {
        let store = MemoryStore::with_entries([(keys::FAVORITES, r#"["3","gone","5"]"#)]);
        let mut favorites = FavoritesManager::new(store);
        favorites.load().await.expect("load");

        let catalog = InMemoryCatalog::new(demo_products());
        let names: Vec<String> = favorites
            .products(&catalog)
            .await
            .expect("products")
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Running Shoes", "Coffee Maker"]);
    }
}
