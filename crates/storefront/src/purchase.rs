//! Purchases.
//!
//! A purchase records the bought product ids in the purchase history and
//! then takes them out of the persisted cart. The cart manager does not see
//! this directly; callers refresh it afterwards.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shopfront_core::{OrderId, ProductId, PurchaseHistory};
use tracing::{error, info, instrument, warn};

use crate::cart::{load_cart, save_cart};
use crate::error::{Result, StorefrontError};
use crate::store::{KeyValueStore, keys, load_json, save_json};

/// Which cart lines a completed purchase removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearPolicy {
    /// Only lines for the purchased products.
    #[default]
    PurchasedLines,
    /// Every line, purchased or not.
    EntireCart,
}

/// Proof of a completed purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    pub order_id: OrderId,
    pub placed_at: DateTime<Utc>,
    pub product_ids: Vec<ProductId>,
}

/// Records purchases against the persistent store.
#[derive(Debug, Clone)]
pub struct PurchaseService<S> {
    store: S,
    policy: ClearPolicy,
}

impl<S: KeyValueStore> PurchaseService<S> {
    #[must_use]
    pub const fn new(store: S, policy: ClearPolicy) -> Self {
        Self { store, policy }
    }

    /// The cart clearing policy applied by [`purchase`](Self::purchase).
    #[must_use]
    pub const fn policy(&self) -> ClearPolicy {
        self.policy
    }

    /// Purchase `product_ids` with the configured clearing policy.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::EmptyPurchase` for an empty list, or
    /// `StorefrontError::Store` if the history or cart cannot be written.
    pub async fn purchase(&self, product_ids: &[ProductId]) -> Result<PurchaseReceipt> {
        self.purchase_with(product_ids, self.policy).await
    }

    /// Purchase `product_ids`, clearing the cart according to `policy`.
    ///
    /// The history is written before the cart. If the cart cannot be updated
    /// the previous history is written back, so a failed purchase leaves
    /// neither key changed.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::EmptyPurchase` for an empty list, or
    /// `StorefrontError::Store` if the history or cart cannot be written.
    #[instrument(skip(self, product_ids), fields(products = product_ids.len()))]
    pub async fn purchase_with(
        &self,
        product_ids: &[ProductId],
        policy: ClearPolicy,
    ) -> Result<PurchaseReceipt> {
        if product_ids.is_empty() {
            return Err(StorefrontError::EmptyPurchase);
        }

        let previous = self.store.get(keys::PURCHASE_HISTORY).await?;
        let mut history: PurchaseHistory =
            load_json(&self.store, keys::PURCHASE_HISTORY).await?;
        history.extend(product_ids.iter().cloned());
        save_json(&self.store, keys::PURCHASE_HISTORY, &history).await?;

        if let Err(e) = self.clear_cart(product_ids, policy).await {
            self.restore_history(previous).await;
            return Err(e);
        }

        let placed_at = Utc::now();
        let order_id = OrderId::new(format!("order_{}", placed_at.timestamp_millis()));
        info!(order_id = %order_id, "Purchase completed");

        Ok(PurchaseReceipt {
            order_id,
            placed_at,
            product_ids: product_ids.to_vec(),
        })
    }

    async fn clear_cart(&self, product_ids: &[ProductId], policy: ClearPolicy) -> Result<()> {
        let mut cart = load_cart(&self.store).await?;
        match policy {
            ClearPolicy::PurchasedLines => cart.retain_unpurchased(product_ids),
            ClearPolicy::EntireCart => cart.clear(),
        }
        Ok(save_cart(&self.store, &cart).await?)
    }

    /// Put back the history value read before the purchase.
    async fn restore_history(&self, previous: Option<String>) {
        let restored = match previous {
            Some(raw) => self.store.set(keys::PURCHASE_HISTORY, raw).await,
            None => self.store.remove(keys::PURCHASE_HISTORY).await,
        };
        match restored {
            Ok(()) => warn!("Cart update failed, purchase history rolled back"),
            Err(e) => error!(error = %e, "Failed to roll back purchase history"),
        }
    }

    /// Every product purchased so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Store` if the store cannot be read.
    pub async fn history(&self) -> Result<PurchaseHistory> {
        Ok(load_json(&self.store, keys::PURCHASE_HISTORY).await?)
    }
}
