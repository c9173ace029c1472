//! Catalog product types.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::id::ProductId;
use super::price::{CurrencyCode, Price, PriceError};

/// Product category (e.g., "electronics", "footwear").
///
/// Categories are compared exactly; no case folding is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Create a new category.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The category name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

/// Errors that can occur when constructing a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RatingError {
    /// The value is outside `0.0..=5.0` or not a number.
    #[error("rating must be between {min} and {max} (got {value})")]
    OutOfRange {
        /// Rejected value.
        value: f32,
        /// Lowest accepted rating.
        min: f32,
        /// Highest accepted rating.
        max: f32,
    },
}

/// Average customer rating between 0.0 and 5.0 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Rating(f32);

impl Rating {
    /// Lowest possible rating.
    pub const MIN: f32 = 0.0;
    /// Highest possible rating.
    pub const MAX: f32 = 5.0;

    /// Create a rating.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::OutOfRange`] for values outside `0.0..=5.0`
    /// (including `NaN`).
    pub fn new(value: f32) -> Result<Self, RatingError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingError::OutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    /// Create a rating, clamping into range. `NaN` becomes 0.0.
    #[must_use]
    pub fn saturating(value: f32) -> Self {
        if value.is_nan() {
            return Self(Self::MIN);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// The rating value.
    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for Rating {
    type Error = RatingError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for f32 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// A purchasable product.
///
/// Products are immutable once loaded for a session; a catalog may still
/// replace a product wholesale (for example after a price change), and
/// readers always resolve the current value by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price in the catalog currency. Never negative.
    #[serde(deserialize_with = "non_negative_price")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub category: Category,
    pub rating: Rating,
    pub stock: u32,
}

impl Product {
    /// The unit price as a [`Price`] in the default currency.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the product was constructed by
    /// hand with a negative price.
    pub fn unit_price(&self) -> Result<Price, PriceError> {
        Price::new(self.price, CurrencyCode::default())
    }

    /// Whether any units are available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

fn non_negative_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(serde::de::Error::custom(PriceError::Negative(amount)));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0.0).is_ok());
        assert!(Rating::new(5.0).is_ok());
        assert!(Rating::new(5.1).is_err());
        assert!(Rating::new(-0.5).is_err());
        assert!(Rating::new(f32::NAN).is_err());
    }

    #[test]
    fn test_rating_saturating() {
        assert_eq!(Rating::saturating(9.0).value(), 5.0);
        assert_eq!(Rating::saturating(-1.0).value(), 0.0);
        assert_eq!(Rating::saturating(f32::NAN).value(), 0.0);
        assert_eq!(Rating::saturating(4.5).value(), 4.5);
    }

    #[test]
    fn test_product_deserializes_from_catalog_json() {
        let json = r#"{
            "id": "1",
            "name": "Wireless Headphones",
            "description": "Premium noise-cancelling wireless headphones",
            "price": 299.99,
            "image": "https://images.example.com/headphones.jpg",
            "category": "electronics",
            "rating": 4.5,
            "stock": 15
        }"#;

        let product: Product = serde_json::from_str(json).expect("valid product json");
        assert_eq!(product.id, ProductId::from("1"));
        assert_eq!(product.price, Decimal::new(29999, 2));
        assert_eq!(product.category, Category::from("electronics"));
        assert!(product.in_stock());
    }

    #[test]
    fn test_unit_price_uses_default_currency() {
        let json = r#"{"id":"4","name":"Desk Lamp","description":"","price":19.5,
            "category":"home","rating":4.0,"stock":0}"#;
        let product: Product = serde_json::from_str(json).expect("valid product json");

        let price = product.unit_price().expect("non-negative");
        assert_eq!(price.currency_code(), CurrencyCode::USD);
        assert_eq!(price.display(), "$19.50");
        assert!(!product.in_stock());
    }

    #[test]
    fn test_product_rejects_negative_price() {
        let json = r#"{"id":"1","name":"x","description":"","price":-1,
            "category":"home","rating":4.0,"stock":1}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_product_rejects_out_of_range_rating() {
        let json = r#"{"id":"1","name":"x","description":"","price":1,
            "category":"home","rating":7.5,"stock":1}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }
}
