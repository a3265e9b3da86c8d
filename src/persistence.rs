//! Persistence
//!
//! Serialises the cart and the theme flag into [`Storage`]. Reads and writes
//! are fail-soft: a broken or unreadable record loads as an empty cart, and a
//! failed write is logged while the in-memory state stays authoritative.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{items::LineItem, storage::Storage};

/// Storage key of the serialised cart.
pub const CART_KEY: &str = "foodieAppCart";

/// Storage key of the dark mode flag.
pub const DARK_MODE_KEY: &str = "foodieAppDarkMode";

/// One entry of the persisted cart record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLineItem {
    /// Product identifier
    pub id: String,

    /// Product name
    pub name: String,

    /// Unit price in major units, stored as a JSON number
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Quantity, validated on load
    pub quantity: i64,
}

impl From<&LineItem> for StoredLineItem {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id().to_string(),
            name: item.name().to_string(),
            price: Decimal::new(item.unit_price().to_minor_units(), 2),
            quantity: i64::from(item.quantity()),
        }
    }
}

impl StoredLineItem {
    /// Converts the record into a line item in `currency`.
    ///
    /// Returns `None` if the quantity is not positive or the price cannot be
    /// represented.
    pub fn into_line_item(self, currency: &'static Currency) -> Option<LineItem> {
        let quantity = u32::try_from(self.quantity).ok().filter(|q| *q > 0)?;
        let minor = to_minor_units(self.price)?;

        Some(LineItem::new(
            self.id,
            self.name,
            Money::from_minor(minor, currency),
            quantity,
        ))
    }
}

/// Largest unit price accepted into a cart or menu, in minor units.
///
/// Keeps `price * u32::MAX` within `i64`, so line totals never saturate.
pub const MAX_UNIT_PRICE_MINOR: i64 = 100_000_000;

/// Converts a major-unit price into minor units, rounding half away from zero.
///
/// Returns `None` for negative prices and prices above
/// [`MAX_UNIT_PRICE_MINOR`].
pub(crate) fn to_minor_units(price: Decimal) -> Option<i64> {
    price
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| {
            value
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        })
        .filter(|minor| (0..=MAX_UNIT_PRICE_MINOR).contains(minor))
}

/// Reads the persisted cart record.
///
/// Entries that fail validation are dropped individually; an unreadable or
/// malformed record yields an empty list.
pub fn load_cart_record<S: Storage + ?Sized>(storage: &S) -> Vec<StoredLineItem> {
    let raw = match storage.get(CART_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(error = %err, "failed to read persisted cart, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<StoredLineItem>>(&raw) {
        Ok(record) => record,
        Err(err) => {
            warn!(error = %err, "persisted cart is malformed, starting empty");
            Vec::new()
        }
    }
}

/// Writes the cart record.
///
/// Returns whether the write succeeded; failures are logged, never raised.
pub fn save_cart<S: Storage + ?Sized>(storage: &mut S, items: &[LineItem]) -> bool {
    let record: Vec<StoredLineItem> = items.iter().map(StoredLineItem::from).collect();

    let json = match serde_json::to_string(&record) {
        Ok(json) => json,
        Err(err) => {
            warn!(error = %err, "failed to serialise cart");
            return false;
        }
    };

    match storage.set(CART_KEY, &json) {
        Ok(()) => {
            debug!(items = record.len(), "cart persisted");
            true
        }
        Err(err) => {
            warn!(error = %err, "failed to persist cart, keeping in-memory state");
            false
        }
    }
}

/// Reads the persisted dark mode flag.
///
/// Returns `None` when nothing usable was stored.
pub fn load_dark_mode<S: Storage + ?Sized>(storage: &S) -> Option<bool> {
    match storage.get(DARK_MODE_KEY) {
        Ok(Some(raw)) => match raw.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            other => {
                warn!(value = other, "ignoring unrecognised dark mode flag");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            warn!(error = %err, "failed to read dark mode flag");
            None
        }
    }
}

/// Writes the dark mode flag as `"true"` or `"false"`.
pub fn save_dark_mode<S: Storage + ?Sized>(storage: &mut S, enabled: bool) -> bool {
    let value = if enabled { "true" } else { "false" };

    match storage.set(DARK_MODE_KEY, value) {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "failed to persist dark mode flag");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;
    use crate::storage::{MemoryStorage, MockStorage, StorageError};

    #[test]
    fn save_writes_json_array_with_numeric_prices() -> TestResult {
        let mut storage = MemoryStorage::new();
        let items = [LineItem::new(
            "b1",
            "Burger",
            Money::from_minor(499, USD),
            2,
        )];

        assert!(save_cart(&mut storage, &items), "save should succeed");

        let raw = storage.get(CART_KEY)?.unwrap_or_default();
        let value: serde_json::Value = serde_json::from_str(&raw)?;

        assert_eq!(
            value,
            serde_json::json!([{ "id": "b1", "name": "Burger", "price": 4.99, "quantity": 2 }])
        );

        Ok(())
    }

    #[test]
    fn load_reads_record_written_by_browser() -> TestResult {
        let mut storage = MemoryStorage::new();
        storage.set(
            CART_KEY,
            r#"[{"id":"p1","name":"Pizza","price":12.5,"quantity":1}]"#,
        )?;

        let record = load_cart_record(&storage);
        let items: Vec<LineItem> = record
            .into_iter()
            .filter_map(|stored| stored.into_line_item(USD))
            .collect();

        assert_eq!(
            items,
            vec![LineItem::new("p1", "Pizza", Money::from_minor(1250, USD), 1)]
        );

        Ok(())
    }

    #[test]
    fn malformed_record_loads_empty() -> TestResult {
        let mut storage = MemoryStorage::new();
        storage.set(CART_KEY, "{not json")?;

        assert!(load_cart_record(&storage).is_empty());

        Ok(())
    }

    #[test]
    fn read_failure_loads_empty() {
        let mut storage = MockStorage::new();
        storage
            .expect_get()
            .returning(|_| Err(StorageError::Io(std::io::Error::other("disk gone"))));

        assert!(load_cart_record(&storage).is_empty());
    }

    #[test]
    fn invalid_entries_are_rejected() {
        let zero = StoredLineItem {
            id: "a".to_string(),
            name: "A".to_string(),
            price: Decimal::new(100, 2),
            quantity: 0,
        };
        let negative_price = StoredLineItem {
            price: Decimal::new(-100, 2),
            quantity: 1,
            ..zero.clone()
        };

        assert_eq!(zero.into_line_item(USD), None);
        assert_eq!(negative_price.into_line_item(USD), None);
    }

    #[test]
    fn oversized_price_is_rejected() {
        let oversized = StoredLineItem {
            id: "b1".to_string(),
            name: "Burger".to_string(),
            price: Decimal::from(90_000_000_000_000_000_i64),
            quantity: 1,
        };

        assert_eq!(oversized.into_line_item(USD), None);
        assert_eq!(to_minor_units(Decimal::new(1_000_000, 0)), Some(MAX_UNIT_PRICE_MINOR));
        assert_eq!(to_minor_units(Decimal::new(1_000_001, 0)), None);
    }

    #[test]
    fn minor_units_round_half_away_from_zero() {
        assert_eq!(to_minor_units(Decimal::new(125, 3)), Some(13));
        assert_eq!(to_minor_units(Decimal::new(135, 3)), Some(14));
        assert_eq!(to_minor_units(Decimal::new(124, 3)), Some(12));
    }

    #[test]
    fn dark_mode_flag_round_trips() {
        let mut storage = MemoryStorage::new();

        assert_eq!(load_dark_mode(&storage), None);

        assert!(save_dark_mode(&mut storage, true), "save should succeed");
        assert_eq!(load_dark_mode(&storage), Some(true));

        assert!(save_dark_mode(&mut storage, false), "save should succeed");
        assert_eq!(load_dark_mode(&storage), Some(false));
    }

    #[test]
    fn unrecognised_dark_mode_flag_is_ignored() -> TestResult {
        let mut storage = MemoryStorage::new();
        storage.set(DARK_MODE_KEY, "yes")?;

        assert_eq!(load_dark_mode(&storage), None);

        Ok(())
    }
}
