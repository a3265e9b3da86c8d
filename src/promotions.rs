//! Promotions
//!
//! Promo codes reduce the displayed, tax-inclusive total by a percentage.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use crate::pricing::{PricingSnapshot, percent_of_minor};

/// Code shipped with the storefront, worth 10% off.
pub const FOODIE10: &str = "FOODIE10";

/// Errors applying a promo code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromoError {
    /// The code is not in the catalog.
    #[error("Invalid promo code")]
    InvalidCode(String),

    /// The totals already carry a promo discount.
    #[error("A promo code has already been applied")]
    AlreadyApplied,
}

/// Static lookup of promo codes to the percentage they take off.
#[derive(Debug, Clone)]
pub struct PromoCatalog {
    codes: FxHashMap<String, Percentage>,
}

impl Default for PromoCatalog {
    fn default() -> Self {
        Self::empty().with_code(FOODIE10, Percentage::from(Decimal::new(10, 2)))
    }
}

impl PromoCatalog {
    /// A catalog with no codes.
    pub fn empty() -> Self {
        Self {
            codes: FxHashMap::default(),
        }
    }

    /// Add a code worth `rate` off the total.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>, rate: Percentage) -> Self {
        self.codes.insert(code.into(), rate);
        self
    }

    /// Percentage taken off by `code`, if it exists. Matching is case-sensitive.
    pub fn rate(&self, code: &str) -> Option<Percentage> {
        self.codes.get(code).cloned()
    }

    /// Apply `code` to `current`, returning the discounted totals.
    ///
    /// Surrounding whitespace in the code is ignored. The discount is taken
    /// off `current.total()`, which already includes delivery and tax.
    ///
    /// # Errors
    ///
    /// - [`PromoError::InvalidCode`]: the code is not in the catalog.
    /// - [`PromoError::AlreadyApplied`]: `current` already carries a discount.
    pub fn apply(
        &self,
        code: &str,
        current: &PricingSnapshot,
    ) -> Result<PricingSnapshot, PromoError> {
        let code = code.trim();

        let rate = self
            .rate(code)
            .ok_or_else(|| PromoError::InvalidCode(code.to_string()))?;

        if current.discount().is_some() {
            return Err(PromoError::AlreadyApplied);
        }

        let total = current.total().to_minor_units();
        let discount = percent_of_minor(rate, total).clamp(0, total);

        debug!(code, discount, "promo code applied");

        Ok(current.with_discount(discount))
    }
}

/// Apply `code` from the default catalog to `current`.
///
/// # Errors
///
/// See [`PromoCatalog::apply`].
pub fn apply_promo_code(
    code: &str,
    current: &PricingSnapshot,
) -> Result<PricingSnapshot, PromoError> {
    PromoCatalog::default().apply(code, current)
}
