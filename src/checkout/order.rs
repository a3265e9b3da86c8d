//! Orders and order numbers.

use std::{fmt, str::FromStr};

use rand::Rng;
use thiserror::Error;

use crate::{items::LineItem, pricing::PricingSnapshot};

use super::{customer::CustomerInfo, payment::PaymentSelection};

/// Prefix of every order number.
pub const ORDER_NUMBER_PREFIX: &str = "FD-";

const ORDER_NUMBER_DIGITS: usize = 6;
const ORDER_NUMBER_SPACE: u32 = 1_000_000;

/// Errors parsing an order number.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid order number: {0}")]
pub struct OrderNumberError(String);

/// Order number shown to the customer, e.g. `FD-004217`.
///
/// Numbers are drawn at random; two orders can collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderNumber(u32);

impl OrderNumber {
    /// Draw a fresh order number from `rng`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(0..ORDER_NUMBER_SPACE))
    }

    /// Numeric part of the order number.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{ORDER_NUMBER_PREFIX}{:0width$}",
            self.0,
            width = ORDER_NUMBER_DIGITS
        )
    }
}

impl FromStr for OrderNumber {
    type Err = OrderNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || OrderNumberError(s.to_string());

        let digits = s.strip_prefix(ORDER_NUMBER_PREFIX).ok_or_else(invalid)?;

        if digits.len() != ORDER_NUMBER_DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        digits.parse().map(Self).map_err(|_err| invalid())
    }
}

/// A finalised order, immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    number: OrderNumber,
    items: Vec<LineItem>,
    customer: CustomerInfo,
    payment: PaymentSelection,
    totals: PricingSnapshot,
}

impl Order {
    pub(crate) fn new(
        number: OrderNumber,
        items: Vec<LineItem>,
        customer: CustomerInfo,
        payment: PaymentSelection,
        totals: PricingSnapshot,
    ) -> Self {
        Self {
            number,
            items,
            customer,
            payment,
            totals,
        }
    }

    /// Order number
    pub fn number(&self) -> OrderNumber {
        self.number
    }

    /// Cart contents at checkout
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Delivery details
    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    /// How the order will be paid
    pub fn payment(&self) -> &PaymentSelection {
        &self.payment
    }

    /// Totals at checkout, including any promo discount
    pub fn totals(&self) -> &PricingSnapshot {
        &self.totals
    }
}
