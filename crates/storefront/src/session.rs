//! Shopping session.
//!
//! [`Storefront`] wires the managers to one store, one catalog and one
//! notifier, the way a storefront page tree shares them. Each manager keeps
//! its own copy of what it persisted; after a purchase the cart is reloaded
//! from the store.

use shopfront_core::{Product, ProductId, ShippingAddress};
use tracing::{error, info, instrument};

use crate::cart::CartManager;
use crate::catalog::{Catalog, ProductDetail, product_detail};
use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError};
use crate::favorites::FavoritesManager;
use crate::notify::{Notification, Notifier};
use crate::pagination::InfiniteScroll;
use crate::purchase::{ClearPolicy, PurchaseReceipt, PurchaseService};
use crate::recommend::RecommendationEngine;
use crate::store::KeyValueStore;

/// Session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Products per catalog page
    pub page_size: u32,
    /// Cart lines removed by [`Storefront::checkout`]
    pub purchase_clears: ClearPolicy,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from(&StorefrontConfig::default())
    }
}

impl From<&StorefrontConfig> for SessionOptions {
    fn from(config: &StorefrontConfig) -> Self {
        Self {
            page_size: config.page_size,
            purchase_clears: config.purchase_clears,
        }
    }
}

/// One shopper's session.
#[derive(Debug)]
pub struct Storefront<S, C, N> {
    catalog: C,
    notifier: N,
    cart: CartManager<S, C, N>,
    favorites: FavoritesManager<S>,
    purchases: PurchaseService<S>,
    recommendations: RecommendationEngine<S, C>,
    scroll: InfiniteScroll,
}

impl<S, C, N> Storefront<S, C, N>
where
    S: KeyValueStore + Clone,
    C: Catalog + Clone,
    N: Notifier + Clone,
{
    /// Start a session, loading the persisted cart and favorites.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Store` if the store cannot be read.
    #[instrument(skip_all, fields(page_size = options.page_size))]
    pub async fn open(store: S, catalog: C, notifier: N, options: SessionOptions) -> Result<Self> {
        let mut cart = CartManager::new(store.clone(), catalog.clone(), notifier.clone());
        cart.load().await?;

        let mut favorites = FavoritesManager::new(store.clone());
        favorites.load().await?;

        Ok(Self {
            purchases: PurchaseService::new(store.clone(), options.purchase_clears),
            recommendations: RecommendationEngine::new(store, catalog.clone()),
            scroll: InfiniteScroll::new(options.page_size),
            catalog,
            notifier,
            cart,
            favorites,
        })
    }

    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartManager<S, C, N> {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartManager<S, C, N> {
        &mut self.cart
    }

    #[must_use]
    pub const fn favorites(&self) -> &FavoritesManager<S> {
        &self.favorites
    }

    pub const fn favorites_mut(&mut self) -> &mut FavoritesManager<S> {
        &mut self.favorites
    }

    #[must_use]
    pub const fn purchases(&self) -> &PurchaseService<S> {
        &self.purchases
    }

    #[must_use]
    pub const fn scroll(&self) -> &InfiniteScroll {
        &self.scroll
    }

    pub const fn scroll_mut(&mut self) -> &mut InfiniteScroll {
        &mut self.scroll
    }

    /// Fetch the next catalog page into the scroll list, if one may be
    /// fetched now.
    pub async fn load_more(&mut self) -> bool {
        self.scroll.on_sentinel_visible(&self.catalog).await
    }

    /// A product with related products from its category.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::ProductNotFound` for an unknown id, or
    /// `StorefrontError::Catalog` if the catalog cannot be read.
    pub async fn product(&self, id: &ProductId) -> Result<ProductDetail> {
        product_detail(&self.catalog, id).await
    }

    /// Recommendations from the persisted cart and purchase history.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError` if the store or catalog cannot be read.
    pub async fn recommendations(&self, exclude: Option<&ProductId>) -> Result<Vec<Product>> {
        self.recommendations.recommend(exclude).await
    }

    /// Favorites resolved through the catalog.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Catalog` if the catalog cannot be read.
    pub async fn favorite_products(&self) -> Result<Vec<Product>> {
        self.favorites.products(&self.catalog).await
    }

    /// Buy everything in the cart.
    ///
    /// An empty cart does nothing and returns `None`. Otherwise the outcome
    /// is reported as a notification, and `None` is returned on failure.
    #[instrument(skip(self))]
    pub async fn checkout(&mut self) -> Option<PurchaseReceipt> {
        if self.cart.is_empty() {
            return None;
        }

        let policy = self.purchases.policy();
        match self.purchase_cart(policy).await {
            Ok(receipt) => {
                self.notifier.notify(Notification::success(
                    "Purchase successful!",
                    Some(format!("Order ID: {}", receipt.order_id)),
                ));
                Some(receipt)
            }
            Err(e) => {
                error!(error = %e, "Checkout failed");
                self.notifier.notify(Notification::error(
                    "Error",
                    Some("Failed to complete purchase".to_string()),
                ));
                None
            }
        }
    }

    /// Place an order for the whole cart, shipped to `address`.
    ///
    /// The cart is emptied entirely, whatever the configured clearing policy.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::InvalidAddress` if a required address field
    /// is blank, `StorefrontError::EmptyPurchase` for an empty cart, or
    /// `StorefrontError::Store` if the order cannot be recorded. Each is also
    /// reported as an error notification.
    #[instrument(skip_all)]
    pub async fn place_order(&mut self, address: &ShippingAddress) -> Result<PurchaseReceipt> {
        let result = match address.validate() {
            Err(e) => Err(StorefrontError::from(e)),
            Ok(()) if self.cart.is_empty() => Err(StorefrontError::EmptyPurchase),
            Ok(()) => self.purchase_cart(ClearPolicy::EntireCart).await,
        };

        match &result {
            Ok(receipt) => {
                info!(order_id = %receipt.order_id, city = %address.city, "Order placed");
                self.notifier.notify(Notification::success(
                    "Order placed successfully!",
                    Some(format!("Order ID: {}", receipt.order_id)),
                ));
            }
            Err(e) => {
                error!(error = %e, "Order failed");
                self.notifier
                    .notify(Notification::error("Error", Some(e.user_message())));
            }
        }
        result
    }

    async fn purchase_cart(&mut self, policy: ClearPolicy) -> Result<PurchaseReceipt> {
        let product_ids: Vec<ProductId> = self.cart.cart().product_ids().cloned().collect();
        let receipt = self.purchases.purchase_with(&product_ids, policy).await?;
        self.cart.refresh().await;
        Ok(receipt)
    }
}
