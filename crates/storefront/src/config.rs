//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SHOPFRONT_STORE_PATH` - Durable key-value store file (default: .shopfront/store.json)
//! - `SHOPFRONT_PAGE_SIZE` - Products per catalog page, 1-100 (default: 8)
//! - `SHOPFRONT_CATALOG_URL` - REST catalog base URL; the built-in demo catalog is used when unset
//! - `SHOPFRONT_API_TOKEN` - Bearer token sent to the REST catalog
//! - `SHOPFRONT_CATALOG_CACHE_TTL_SECS` - REST catalog response cache TTL (default: 300)
//! - `SHOPFRONT_SIMULATED_LATENCY_MS` - Artificial delay for demo catalog calls (default: 0)
//! - `SHOPFRONT_PURCHASE_CLEARS` - `purchased` or `all` (default: purchased)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::purchase::ClearPolicy;

const DEFAULT_STORE_PATH: &str = ".shopfront/store.json";
const DEFAULT_PAGE_SIZE: u32 = 8;
const MAX_PAGE_SIZE: u32 = 100;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Path of the durable key-value store file
    pub store_path: PathBuf,
    /// Products fetched per catalog page
    pub page_size: u32,
    /// Catalog source configuration
    pub catalog: CatalogConfig,
    /// Which cart lines a purchase removes
    pub purchase_clears: ClearPolicy,
}

/// Where products come from.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct CatalogConfig {
    /// REST catalog base URL (`None` selects the demo catalog)
    pub base_url: Option<Url>,
    /// Bearer token for the REST catalog
    pub api_token: Option<SecretString>,
    /// How long REST catalog responses stay cached
    pub cache_ttl: Duration,
    /// Artificial delay applied to every demo catalog call
    pub simulated_latency: Duration,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("cache_ttl", &self.cache_ttl)
            .field("simulated_latency", &self.simulated_latency)
            .finish()
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_token: None,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            simulated_latency: Duration::ZERO,
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            page_size: DEFAULT_PAGE_SIZE,
            catalog: CatalogConfig::default(),
            purchase_clears: ClearPolicy::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Lookup(lookup);

        let store_path = env
            .optional("SHOPFRONT_STORE_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_STORE_PATH), PathBuf::from);

        let page_size = env.parse_or("SHOPFRONT_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPFRONT_PAGE_SIZE".to_string(),
                format!("must be between 1 and {MAX_PAGE_SIZE} (got {page_size})"),
            ));
        }

        let purchase_clears = match env.optional("SHOPFRONT_PURCHASE_CLEARS").as_deref() {
            None | Some("purchased") => ClearPolicy::PurchasedLines,
            Some("all") => ClearPolicy::EntireCart,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "SHOPFRONT_PURCHASE_CLEARS".to_string(),
                    format!("expected 'purchased' or 'all' (got '{other}')"),
                ));
            }
        };

        let catalog = CatalogConfig::from_lookup(&env)?;

        Ok(Self {
            store_path,
            page_size,
            catalog,
            purchase_clears,
        })
    }
}

impl CatalogConfig {
    fn from_lookup<F>(env: &Lookup<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = env
            .optional("SHOPFRONT_CATALOG_URL")
            .map(|raw| {
                Url::parse(&raw).map_err(|e| {
                    ConfigError::InvalidEnvVar("SHOPFRONT_CATALOG_URL".to_string(), e.to_string())
                })
            })
            .transpose()?;

        Ok(Self {
            base_url,
            api_token: env.optional("SHOPFRONT_API_TOKEN").map(SecretString::from),
            cache_ttl: Duration::from_secs(
                env.parse_or("SHOPFRONT_CATALOG_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?,
            ),
            simulated_latency: Duration::from_millis(
                env.parse_or("SHOPFRONT_SIMULATED_LATENCY_MS", 0)?,
            ),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Lookup<F>(F);

impl<F> Lookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Parse a variable, falling back to a default when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}
