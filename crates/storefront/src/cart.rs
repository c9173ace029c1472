//! Cart manager.
//!
//! Owns the session's view of the cart. Every mutation is written through to
//! the store and then re-read, so the in-memory cart always mirrors what was
//! last persisted. Mutations never return errors: failures are logged, shown
//! to the shopper as an error [`Notification`], and leave the cart as it was.

use rust_decimal::Decimal;
use shopfront_core::{Cart, CartLine, OrderSummary, ProductId};
use tracing::{debug, error, instrument, warn};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::notify::{Notification, Notifier};
use crate::store::{KeyValueStore, StoreError, keys, load_json, save_json};

/// Read the persisted cart, repairing zero-quantity and duplicate lines.
///
/// # Errors
///
/// Returns `StoreError` if the store cannot be read.
pub async fn load_cart<S: KeyValueStore>(store: &S) -> std::result::Result<Cart, StoreError> {
    let lines: Vec<CartLine> = load_json(store, keys::CART).await?;
    Ok(Cart::from_stored(lines))
}

/// Persist `cart` under the cart key.
///
/// # Errors
///
/// Returns `StoreError` if the store cannot be written.
pub async fn save_cart<S: KeyValueStore>(
    store: &S,
    cart: &Cart,
) -> std::result::Result<(), StoreError> {
    save_json(store, keys::CART, cart).await
}

/// Session cart backed by a [`KeyValueStore`].
#[derive(Debug)]
pub struct CartManager<S, C, N> {
    store: S,
    catalog: C,
    notifier: N,
    cart: Cart,
}

impl<S, C, N> CartManager<S, C, N>
where
    S: KeyValueStore,
    C: Catalog,
    N: Notifier,
{
    /// Create a manager with an empty cart. Call [`load`](Self::load) to pick
    /// up a persisted cart.
    pub const fn new(store: S, catalog: C, notifier: N) -> Self {
        Self {
            store,
            catalog,
            notifier,
            cart: Cart::new(),
        }
    }

    /// Read the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Store` if the store cannot be read; the
    /// in-memory cart is left unchanged.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<()> {
        self.cart = load_cart(&self.store).await?;
        debug!(lines = self.cart.len(), "Loaded cart");
        Ok(())
    }

    /// Reload from the store, picking up changes made elsewhere (such as a
    /// purchase). Failures are logged and the current cart is kept.
    pub async fn refresh(&mut self) {
        if let Err(e) = self.load().await {
            error!(error = %e, "Failed to refresh cart");
        }
    }

    /// Add `quantity` units of a product, merging with an existing line.
    ///
    /// Returns `true` once the change is persisted. Adding zero units does
    /// nothing and returns `false`.
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub async fn add(&mut self, product_id: ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            debug!("Ignoring add of zero units");
            return false;
        }

        let id = product_id.clone();
        match self.write_through(|cart| cart.add(id, quantity)).await {
            Ok(cart) => {
                self.cart = cart;
                let name = self.product_name(&product_id).await;
                self.notifier.notify(Notification::success(
                    "Added to cart",
                    Some(format!("{name} has been added to your cart")),
                ));
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to add item to cart");
                self.notify_failure("Failed to add item to cart");
                false
            }
        }
    }

    /// Remove a product's line. Removing an absent product still succeeds.
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub async fn remove(&mut self, product_id: &ProductId) -> bool {
        match self
            .write_through(|cart| {
                cart.remove(product_id);
            })
            .await
        {
            Ok(cart) => {
                self.cart = cart;
                self.notifier.notify(Notification::success(
                    "Removed from cart",
                    Some("Item has been removed from your cart".to_string()),
                ));
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to remove item from cart");
                self.notify_failure("Failed to remove item from cart");
                false
            }
        }
    }

    /// Overwrite a line's quantity. Zero or less removes the line.
    ///
    /// Quantities are not checked against stock.
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub async fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(product_id).await;
        }

        match self
            .write_through(|cart| {
                cart.set_quantity(product_id, quantity);
            })
            .await
        {
            Ok(cart) => {
                self.cart = cart;
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to update quantity");
                self.notify_failure("Failed to update quantity");
                false
            }
        }
    }

    /// Empty the cart and delete it from the store.
    #[instrument(skip(self))]
    pub async fn clear(&mut self) -> bool {
        match self.store.remove(keys::CART).await {
            Ok(()) => {
                self.cart.clear();
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to clear cart");
                self.notify_failure("Failed to clear cart");
                false
            }
        }
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Total number of units.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.cart.count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Sum of unit price times quantity, priced through the catalog now.
    ///
    /// Products the catalog no longer knows contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Catalog` if a price lookup fails.
    pub async fn total(&self) -> Result<Decimal> {
        let mut prices = Vec::with_capacity(self.cart.len());
        for id in self.cart.product_ids() {
            let price = self.catalog.get_by_id(id).await?.map(|p| p.price);
            if price.is_none() {
                warn!(product_id = %id, "Cart holds a product missing from the catalog");
            }
            prices.push((id.clone(), price));
        }

        Ok(self.cart.subtotal(|id| {
            prices
                .iter()
                .find(|(candidate, _)| candidate == id)
                .and_then(|(_, price)| *price)
        }))
    }

    /// Checkout totals for the current cart.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Catalog` if a price lookup fails.
    pub async fn summary(&self) -> Result<OrderSummary> {
        Ok(OrderSummary::from_subtotal(self.total().await?))
    }

    /// Read the persisted cart, apply `change`, persist, then read back.
    async fn write_through<F>(&self, change: F) -> Result<Cart>
    where
        F: FnOnce(&mut Cart),
    {
        let mut cart = load_cart(&self.store).await?;
        change(&mut cart);
        save_cart(&self.store, &cart).await?;
        Ok(load_cart(&self.store).await?)
    }

    /// Display name for a product, falling back to its id.
    async fn product_name(&self, product_id: &ProductId) -> String {
        match self.catalog.get_by_id(product_id).await {
            Ok(Some(product)) => product.name,
            Ok(None) => product_id.to_string(),
            Err(e) => {
                warn!(error = %e, "Could not resolve product name");
                product_id.to_string()
            }
        }
    }

    fn notify_failure(&self, description: &str) {
        self.notifier
            .notify(Notification::error("Error", Some(description.to_string())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::catalog::fixtures::demo_products;
    use crate::notify::RecordingNotifier;
    use crate::store::MemoryStore;

    type Manager = CartManager<MemoryStore, InMemoryCatalog, RecordingNotifier>;

    fn manager() -> (Manager, MemoryStore, RecordingNotifier) {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::new();
        let manager = CartManager::new(
            store.clone(),
            InMemoryCatalog::new(demo_products()),
            notifier.clone(),
        );
        (manager, store, notifier)
    }

    #[tokio::test]
    async fn test_add_merges_quantities() {
        let (mut cart, store, notifier) = manager();
        let p1 = ProductId::from("1");

        assert!(cart.add(p1.clone(), 2).await);
        assert!(cart.add(p1.clone(), 3).await);

        assert_eq!(cart.lines(), &[CartLine::new(p1, 5)]);
        assert_eq!(cart.count(), 5);
        assert_eq!(
            store.get(keys::CART).await.expect("get").as_deref(),
            Some(r#"[{"productId":"1","quantity":5}]"#)
        );

        let last = notifier.last().expect("notified");
        assert_eq!(last.title, "Added to cart");
        assert_eq!(
            last.description.as_deref(),
            Some("Wireless Headphones has been added to your cart")
        );
    }

    #[tokio::test]
    async fn test_add_unknown_product_names_it_by_id() {
        let (mut cart, _, notifier) = manager();
        assert!(cart.add(ProductId::from("ghost"), 1).await);
        assert_eq!(
            notifier.last().and_then(|n| n.description).as_deref(),
            Some("ghost has been added to your cart")
        );
    }

    #[tokio::test]
    async fn test_add_zero_is_ignored() {
        let (mut cart, _, notifier) = manager();
        assert!(!cart.add(ProductId::from("1"), 0).await);
        assert!(cart.is_empty());
        assert!(notifier.received().is_empty());
    }

    #[tokio::test]
    async fn test_remove_twice_is_idempotent() {
        let (mut cart, _, notifier) = manager();
        let p1 = ProductId::from("1");
        cart.add(p1.clone(), 1).await;

        assert!(cart.remove(&p1).await);
        assert!(cart.remove(&p1).await);
        assert!(cart.is_empty());
        assert_eq!(notifier.last().map(|n| n.title).as_deref(), Some("Removed from cart"));
    }

    #[tokio::test]
    async fn test_set_quantity_non_positive_removes() {
        let (mut cart, _, _) = manager();
        let p1 = ProductId::from("1");
        let p2 = ProductId::from("2");
        cart.add(p1.clone(), 4).await;
        cart.add(p2.clone(), 1).await;

        assert!(cart.set_quantity(&p1, 7).await);
        assert_eq!(cart.cart().quantity_of(&p1), 7);

        assert!(cart.set_quantity(&p1, -3).await);
        assert_eq!(cart.lines(), &[CartLine::new(p2, 1)]);
    }

    #[tokio::test]
    async fn test_total_uses_current_catalog_price() {
        let store = MemoryStore::new();
        let catalog = InMemoryCatalog::new(demo_products());
        let mut cart = CartManager::new(store, catalog.clone(), RecordingNotifier::new());
        let p6 = ProductId::from("6");

        cart.add(p6.clone(), 2).await;
        assert_eq!(cart.total().await.expect("total"), Decimal::new(7998, 2));

        catalog.set_price(&p6, Decimal::new(1000, 2)).await;
        assert_eq!(cart.total().await.expect("total"), Decimal::new(2000, 2));
    }

    #[tokio::test]
    async fn test_load_picks_up_persisted_cart() {
        let (mut first, store, _) = manager();
        first.add(ProductId::from("3"), 2).await;

        let mut second = CartManager::new(
            store,
            InMemoryCatalog::new(demo_products()),
            RecordingNotifier::new(),
        );
        assert!(second.is_empty());
        second.load().await.expect("load");
        assert_eq!(second.count(), 2);
    }

    #[tokio::test]
    async fn test_clear_deletes_persisted_cart() {
        let (mut cart, store, _) = manager();
        cart.add(ProductId::from("1"), 1).await;

        assert!(cart.clear().await);
        assert!(cart.is_empty());
        assert_eq!(store.get(keys::CART).await.expect("get"), None);
    }
}
