//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod address;
pub mod cart;
pub mod favorites;
pub mod history;
pub mod id;
pub mod page;
pub mod price;
pub mod product;
pub mod summary;

pub use address::{AddressError, DEFAULT_COUNTRY, ShippingAddress};
pub use cart::{Cart, CartLine};
pub use favorites::FavoritesSet;
pub use history::PurchaseHistory;
pub use id::*;
pub use page::{Page, PageRequest};
pub use price::{CurrencyCode, Price, PriceError};
pub use product::{Category, Product, Rating, RatingError};
pub use summary::OrderSummary;
