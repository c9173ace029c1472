//! Persistent key-value store.
//!
//! Every manager receives a store handle at construction instead of reaching
//! for a process-wide singleton. Values are JSON strings under the
//! well-known [`keys`].
//!
//! # Consistency
//!
//! There is no locking discipline across handles. A manager's
//! read-modify-write of its key is only atomic when nothing else writes the
//! same key concurrently; otherwise the last write wins.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur when reading or writing the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying storage could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded as JSON.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Well-known store keys.
pub mod keys {
    /// Cart lines: `[{"productId": "...", "quantity": n}]`.
    pub const CART: &str = "cart";

    /// Favorite product ids: `["..."]`.
    pub const FAVORITES: &str = "favorites";

    /// Purchased product ids, oldest first: `["..."]`.
    pub const PURCHASE_HISTORY: &str = "purchaseHistory";

    /// Opaque session token, owned by the authentication layer.
    pub const AUTH_TOKEN: &str = "authToken";

    /// Opaque signed-in user record, owned by the authentication layer.
    pub const USER: &str = "user";
}

/// A durable string-keyed store.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Delete `key`. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore> KeyValueStore for &S {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key).await
    }
}

/// Load and decode a JSON value.
///
/// A missing key yields `T::default()`. So does a malformed value: stored
/// garbage is logged and treated as absent rather than failing the caller.
///
/// # Errors
///
/// Returns `StoreError` only if the store itself cannot be read.
pub async fn load_json<S, T>(store: &S, key: &str) -> Result<T, StoreError>
where
    S: KeyValueStore,
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(T::default());
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(key, error = %e, "Malformed stored value, treating as empty");
            Ok(T::default())
        }
    }
}

/// Encode a value as JSON and store it.
///
/// # Errors
///
/// Returns `StoreError` if encoding fails or the store cannot be written.
pub async fn save_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), StoreError>
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, raw).await
}

#[cfg(test)]
mod tests {
    use shopfront_core::{Cart, ProductId};

    use super::*;

    #[tokio::test]
    async fn test_load_json_missing_key_is_default() {
        let store = MemoryStore::new();
        let cart: Cart = load_json(&store, keys::CART).await.expect("store readable");
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_load_json_malformed_value_is_default() {
        let store = MemoryStore::new();
        store
            .set(keys::CART, "{not json".to_string())
            .await
            .expect("store writable");

        let cart: Cart = load_json(&store, keys::CART).await.expect("store readable");
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemoryStore::new();
        let mut cart = Cart::new();
        cart.add(ProductId::from("p1"), 2);

        save_json(&store, keys::CART, &cart).await.expect("store writable");
        assert_eq!(
            store.get(keys::CART).await.expect("store readable").as_deref(),
            Some(r#"[{"productId":"p1","quantity":2}]"#)
        );

        let loaded: Cart = load_json(&store, keys::CART).await.expect("store readable");
        assert_eq!(loaded, cart);
    }
}
