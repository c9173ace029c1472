//! Shopfront storefront library.
//!
//! Client-side shopping state over a persistent key-value store and a
//! product catalog:
//!
//! - [`cart::CartManager`] - write-through cart with notifications
//! - [`favorites::FavoritesManager`] - best-effort favorites set
//! - [`pagination::InfiniteScroll`] - page-at-a-time catalog listing
//! - [`recommend`] - category-based recommendations
//! - [`purchase::PurchaseService`] - purchase history and cart clearing
//! - [`session::Storefront`] - all of the above for one shopper

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod notify;
pub mod pagination;
pub mod purchase;
pub mod recommend;
pub mod session;
pub mod store;

pub use error::{Result, StorefrontError};
