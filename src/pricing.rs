//! Pricing
//!
//! Totals are derived from the current line items on demand and never stored.
//! All arithmetic is done in minor units; rounding happens only where a
//! percentage is applied.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};

use crate::items::LineItem;

/// Flat delivery fee charged on any non-empty cart, in minor units.
pub const DELIVERY_FEE_MINOR: i64 = 250;

/// Sales tax rate applied to the subtotal.
pub fn tax_rate() -> Percentage {
    Percentage::from(Decimal::new(10, 2))
}

/// Totals for a cart at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingSnapshot {
    subtotal: Money<'static, Currency>,
    delivery_fee: Money<'static, Currency>,
    tax: Money<'static, Currency>,
    discount: Option<Money<'static, Currency>>,
    total: Money<'static, Currency>,
}

impl PricingSnapshot {
    /// An all-zero snapshot, as produced for an empty cart.
    pub fn zero(currency: &'static Currency) -> Self {
        let zero = Money::from_minor(0, currency);

        Self {
            subtotal: zero,
            delivery_fee: zero,
            tax: zero,
            discount: None,
            total: zero,
        }
    }

    /// Sum of every line total
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }

    /// Delivery fee, zero for an empty cart
    pub fn delivery_fee(&self) -> Money<'static, Currency> {
        self.delivery_fee
    }

    /// Tax on the subtotal
    pub fn tax(&self) -> Money<'static, Currency> {
        self.tax
    }

    /// Discount taken off the total, if any was applied
    pub fn discount(&self) -> Option<Money<'static, Currency>> {
        self.discount
    }

    /// Grand total
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Currency shared by every amount in the snapshot
    pub fn currency(&self) -> &'static Currency {
        self.total.currency()
    }

    /// Returns a copy with `discount_minor` recorded and taken off the total.
    pub(crate) fn with_discount(&self, discount_minor: i64) -> Self {
        let currency = self.currency();

        Self {
            discount: Some(Money::from_minor(discount_minor, currency)),
            total: Money::from_minor(
                self.total.to_minor_units().saturating_sub(discount_minor),
                currency,
            ),
            ..*self
        }
    }
}

/// Computes the totals for a set of line items.
///
/// `discount_rate` is taken off the tax-inclusive total; pass
/// `Percentage::from(Decimal::ZERO)` for no discount.
pub fn compute_totals(
    items: &[LineItem],
    discount_rate: Percentage,
    currency: &'static Currency,
) -> PricingSnapshot {
    if items.is_empty() {
        return PricingSnapshot::zero(currency);
    }

    let subtotal = items
        .iter()
        .map(LineItem::line_total_minor)
        .fold(0_i64, i64::saturating_add);

    let tax = percent_of_minor(tax_rate(), subtotal);
    let before_discount = subtotal
        .saturating_add(DELIVERY_FEE_MINOR)
        .saturating_add(tax);
    let discount = percent_of_minor(discount_rate, before_discount).clamp(0, before_discount);

    PricingSnapshot {
        subtotal: Money::from_minor(subtotal, currency),
        delivery_fee: Money::from_minor(DELIVERY_FEE_MINOR, currency),
        tax: Money::from_minor(tax, currency),
        discount: (discount > 0).then(|| Money::from_minor(discount, currency)),
        total: Money::from_minor(before_discount - discount, currency),
    }
}

/// Applies a percentage to an amount in minor units, rounding half away from zero.
pub(crate) fn percent_of_minor(percent: Percentage, minor: i64) -> i64 {
    let applied = percent * Decimal::from(minor);

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}
