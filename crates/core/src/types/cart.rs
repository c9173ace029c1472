//! Cart lines and the in-memory cart.
//!
//! A [`Cart`] holds at most one [`CartLine`] per product and never holds a
//! line with a zero quantity. Operations here are pure; persistence is the
//! cart manager's job in the storefront crate.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// One product/quantity pair inside a cart.
///
/// Persisted as `{"productId": "...", "quantity": n}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl CartLine {
    /// Create a new cart line.
    #[must_use]
    pub const fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// A shopping cart.
///
/// Lines keep insertion order so the persisted sequence stays stable across
/// reloads. Serializes as a plain JSON array of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from persisted lines, restoring the cart invariants.
    ///
    /// Zero-quantity lines are dropped and duplicate product ids are merged
    /// into the first occurrence by summing quantities.
    #[must_use]
    pub fn from_stored(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            cart.add(line.product_id, line.quantity);
        }
        cart
    }

    /// Add `quantity` units of a product.
    ///
    /// Merges into the existing line when present, otherwise appends a new
    /// line. Adding zero units is a no-op.
    pub fn add(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.line_mut(&product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine::new(product_id, quantity)),
        }
    }

    /// Remove the line for a product. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.product_id != product_id);
        self.lines.len() != before
    }

    /// Overwrite a line's quantity.
    ///
    /// A quantity of zero or below removes the line. Products without a line
    /// are left alone. Returns whether the cart changed.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        let Ok(quantity) = u32::try_from(quantity.max(0)) else {
            return self.set_existing(product_id, u32::MAX);
        };
        if quantity == 0 {
            return self.remove(product_id);
        }
        self.set_existing(product_id, quantity)
    }

    fn set_existing(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        match self.line_mut(product_id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Drop every line whose product is in `purchased`.
    pub fn retain_unpurchased(&mut self, purchased: &[ProductId]) {
        let purchased: HashSet<&ProductId> = purchased.iter().collect();
        self.lines
            .retain(|line| !purchased.contains(&line.product_id));
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The line for a product, if any.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.product_id == product_id)
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| &line.product_id == product_id)
    }

    /// Quantity held for a product (zero when absent).
    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.line(product_id).map_or(0, |line| line.quantity)
    }

    /// All lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Product ids in line order.
    pub fn product_ids(&self) -> impl Iterator<Item = &ProductId> {
        self.lines.iter().map(|line| &line.product_id)
    }

    /// Total number of units across all lines (not the number of lines).
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of `unit price * quantity` over all lines.
    ///
    /// Prices are supplied by the caller at read time. A product whose price
    /// is unknown contributes nothing.
    pub fn subtotal<F>(&self, mut price_of: F) -> Decimal
    where
        F: FnMut(&ProductId) -> Option<Decimal>,
    {
        self.lines
            .iter()
            .filter_map(|line| {
                price_of(&line.product_id).map(|price| price * Decimal::from(line.quantity))
            })
            .sum()
    }
}

impl FromIterator<CartLine> for Cart {
    fn from_iter<I: IntoIterator<Item = CartLine>>(iter: I) -> Self {
        Self::from_stored(iter.into_iter().collect())
    }
}
