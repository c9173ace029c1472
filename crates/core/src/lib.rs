//! Shopfront Core - Shared domain types.
//!
//! This crate provides the types used across all Shopfront components:
//! - `storefront` - Stores, catalogs, cart and favorites managers
//! - `cli` - Command-line session front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no
//! persistence, no HTTP clients. Managers in the storefront crate load these
//! types from a store, mutate them here, and write them back.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, products, carts, favorites, pages,
//!   and checkout values

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
