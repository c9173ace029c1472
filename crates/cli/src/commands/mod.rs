//! Command implementations.
//!
//! Every command runs against a [`Session`] opened from the environment and
//! prints plain text to stdout. Logs go to stderr.

pub mod cart;
pub mod catalog;
pub mod favorites;

use rust_decimal::Decimal;
use shopfront_core::{CurrencyCode, Price, Product};
use shopfront_storefront::StorefrontError;
use shopfront_storefront::catalog::{CatalogBackend, CatalogError};
use shopfront_storefront::config::{ConfigError, StorefrontConfig};
use shopfront_storefront::notify::{Level, RecordingNotifier};
use shopfront_storefront::session::{SessionOptions, Storefront};
use shopfront_storefront::store::{FileStore, StoreError};
use thiserror::Error;
use tracing::debug;

/// The session every command operates on.
pub type Session = Storefront<FileStore, CatalogBackend, RecordingNotifier>;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    /// The session refused or failed an action; details were notified.
    #[error("{0}")]
    Rejected(&'static str),
}

/// Open the shopper's session from environment configuration.
///
/// # Errors
///
/// Returns `CliError` if the configuration is invalid or the store or
/// catalog cannot be opened.
pub async fn open_session() -> Result<(Session, RecordingNotifier), CliError> {
    let config = StorefrontConfig::from_env()?;
    debug!(?config, "Loaded configuration");

    let store = FileStore::open(&config.store_path).await?;
    let catalog = CatalogBackend::from_config(&config.catalog)?;
    let notifier = RecordingNotifier::new();

    let session = Storefront::open(
        store,
        catalog,
        notifier.clone(),
        SessionOptions::from(&config),
    )
    .await?;
    Ok((session, notifier))
}

/// Print notifications raised while the command ran.
#[allow(clippy::print_stdout)]
pub fn print_notifications(notifier: &RecordingNotifier) {
    for notification in notifier.drain() {
        let marker = match notification.level {
            Level::Success => "ok",
            Level::Error => "error",
        };
        match notification.description {
            Some(description) => println!("[{marker}] {}: {description}", notification.title),
            None => println!("[{marker}] {}", notification.title),
        }
    }
}

/// Format an amount in the default currency.
fn format_price(amount: Decimal) -> String {
    Price::new(amount, CurrencyCode::default())
        .map_or_else(|_| amount.to_string(), |price| price.display())
}

/// A product's unit price for display.
fn product_price(product: &Product) -> String {
    product
        .unit_price()
        .map_or_else(|_| product.price.to_string(), |price| price.display())
}

/// One-line product summary.
fn product_line(product: &Product) -> String {
    let stock = if product.in_stock() {
        format!("{} in stock", product.stock)
    } else {
        "out of stock".to_string()
    };
    format!(
        "{:>4}  {:<26} {:>10}  {:<12} {:.1}/5  {stock}",
        product.id.as_str(),
        product.name,
        product_price(product),
        product.category.as_str(),
        product.rating.value(),
    )
}
