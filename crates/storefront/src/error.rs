//! Unified error handling for storefront operations.
//!
//! Layer errors ([`StoreError`], [`CatalogError`]) convert into
//! [`StorefrontError`]. Managers never let these reach the caller of a
//! mutation; they log them and turn them into notifications using
//! [`StorefrontError::user_message`].

use shopfront_core::{AddressError, ProductId};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::store::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Persistent store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Catalog lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Product does not exist in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// A purchase was requested with no products.
    #[error("Nothing to purchase")]
    EmptyPurchase,

    /// Shipping address failed validation.
    #[error("Invalid shipping address: {0}")]
    InvalidAddress(#[from] AddressError),
}

impl StorefrontError {
    /// Message safe to show to a shopper.
    ///
    /// Store and catalog failures are reported generically; internal details
    /// only go to the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Store(_) => "Could not save your changes".to_string(),
            Self::Catalog(_) => "Products are unavailable right now".to_string(),
            Self::ProductNotFound(_) => "Product not found".to_string(),
            Self::EmptyPurchase => "Your cart is empty".to_string(),
            Self::InvalidAddress(err) => err.to_string(),
        }
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
