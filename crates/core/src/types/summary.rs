//! Order totals shown at checkout.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Subtotal above which shipping is free.
const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
/// Flat shipping charge below the threshold (9.99).
const FLAT_SHIPPING: Decimal = Decimal::from_parts(999, 0, 0, false, 2);
/// Sales tax rate (10%).
const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Breakdown of what a cart will cost at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl OrderSummary {
    /// Compute shipping, tax, and total for a cart subtotal.
    ///
    /// Shipping is free strictly above 50.00. Tax is rounded half-up to
    /// cents.
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        let shipping = if subtotal > FREE_SHIPPING_THRESHOLD || subtotal.is_zero() {
            Decimal::ZERO
        } else {
            FLAT_SHIPPING
        };
        let tax = (subtotal * TAX_RATE)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_order_pays_shipping() {
        let summary = OrderSummary::from_subtotal(Decimal::new(3999, 2));
        assert_eq!(summary.shipping, Decimal::new(999, 2));
        assert_eq!(summary.tax, Decimal::new(400, 2));
        assert_eq!(summary.total, Decimal::new(5398, 2));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let at = OrderSummary::from_subtotal(Decimal::new(50, 0));
        assert_eq!(at.shipping, Decimal::new(999, 2));

        let above = OrderSummary::from_subtotal(Decimal::new(5001, 2));
        assert_eq!(above.shipping, Decimal::ZERO);
    }

    #[test]
    fn test_empty_cart_costs_nothing() {
        let summary = OrderSummary::from_subtotal(Decimal::ZERO);
        assert_eq!(summary.total, Decimal::ZERO);
    }
}
