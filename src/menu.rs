//! Menu
//!
//! The product catalog a front end offers for adding to the cart, loaded from
//! a YAML file:
//!
//! ```yaml
//! menu:
//!   - id: b1
//!     name: Classic Burger
//!     category: burgers
//!     price: "5.00 USD"
//! ```

use std::{fs, path::Path};

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use thiserror::Error;

use crate::{items::ProductId, persistence::to_minor_units};

/// Category name that matches every entry.
pub const ALL_CATEGORIES: &str = "all";

/// Menu parsing errors
#[derive(Debug, Error)]
pub enum MenuError {
    /// IO error reading the menu file
    #[error("Failed to read menu file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Entries priced in different currencies
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),
}

#[derive(Debug, Deserialize)]
struct MenuFile {
    menu: Vec<MenuEntryFile>,
}

#[derive(Debug, Deserialize)]
struct MenuEntryFile {
    id: String,
    name: String,
    category: String,
    price: String,
}

/// A product on the menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    /// Product identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Category used for filtering, e.g. "burgers"
    pub category: String,

    /// Unit price in major units
    pub price: Decimal,
}

/// Product catalog in a single currency, in file order.
#[derive(Debug, Clone)]
pub struct Menu {
    entries: Vec<MenuEntry>,
    currency: &'static Currency,
}

impl Menu {
    /// Load a menu from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if prices are
    /// malformed or use more than one currency.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MenuError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Parse a menu from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid, or if prices are malformed or
    /// use more than one currency.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, MenuError> {
        let file: MenuFile = serde_norway::from_str(yaml)?;

        let mut currency: Option<&'static Currency> = None;
        let mut entries = Vec::with_capacity(file.menu.len());

        for entry in file.menu {
            let (price, entry_currency) = parse_price(&entry.price)?;

            match currency {
                Some(existing) if existing != entry_currency => {
                    return Err(MenuError::CurrencyMismatch(
                        existing.iso_alpha_code.to_string(),
                        entry_currency.iso_alpha_code.to_string(),
                    ));
                }
                Some(_) => {}
                None => currency = Some(entry_currency),
            }

            entries.push(MenuEntry {
                id: ProductId::new(entry.id),
                name: entry.name,
                category: entry.category,
                price,
            });
        }

        Ok(Self {
            entries,
            currency: currency.unwrap_or(USD),
        })
    }

    /// Currency the menu is priced in; USD for an empty menu.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Look up a product by id.
    pub fn get(&self, id: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(|entry| entry.id.as_str() == id)
    }

    /// Entries in `category`, or every entry for [`ALL_CATEGORIES`].
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a MenuEntry> {
        self.entries
            .iter()
            .filter(move |entry| category == ALL_CATEGORIES || entry.category == category)
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();

        for entry in &self.entries {
            if !categories.contains(&entry.category.as_str()) {
                categories.push(&entry.category);
            }
        }

        categories
    }

    /// Unit price of an entry as money in the menu currency.
    pub fn price_of(&self, entry: &MenuEntry) -> Money<'static, Currency> {
        Money::from_minor(to_minor_units(entry.price).unwrap_or_default(), self.currency)
    }

    /// Every entry in file order.
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }
}

/// Parse price string (e.g., "2.99 USD") into a major-unit amount and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a non-negative decimal, or if the currency code is not
/// recognized.
pub fn parse_price(s: &str) -> Result<(Decimal, &'static Currency), MenuError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(MenuError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| MenuError::InvalidPrice(s.to_string()))?;

    if to_minor_units(amount).is_none() {
        return Err(MenuError::InvalidPrice(s.to_string()));
    }

    let currency = match code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(MenuError::UnknownCurrency(other.to_string())),
    };

    Ok((amount, currency))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn bundled_menu_fixture_loads() -> TestResult {
        let menu = Menu::from_yaml_str(include_str!("../fixtures/menu.yml"))?;

        assert_eq!(menu.currency(), USD);
        assert_eq!(
            menu.categories(),
            ["burgers", "pizza", "sides", "drinks", "desserts"]
        );

        Ok(())
    }

    const MENU: &str = r#"
menu:
  - id: b1
    name: Classic Burger
    category: burgers
    price: "5.00 USD"
  - id: p1
    name: Margherita
    category: pizza
    price: "12.50 USD"
  - id: b2
    name: Veggie Burger
    category: burgers
    price: "6.25 USD"
"#;

    #[test]
    fn parses_entries_in_file_order() -> TestResult {
        let menu = Menu::from_yaml_str(MENU)?;

        let ids: Vec<&str> = menu.entries().iter().map(|e| e.id.as_str()).collect();

        assert_eq!(ids, ["b1", "p1", "b2"]);
        assert_eq!(menu.currency(), USD);

        Ok(())
    }

    #[test]
    fn get_finds_entry_by_id() -> TestResult {
        let menu = Menu::from_yaml_str(MENU)?;

        let entry = menu.get("p1");

        assert_eq!(entry.map(|e| e.name.as_str()), Some("Margherita"));
        assert_eq!(entry.map(|e| e.price), Some(Decimal::new(1250, 2)));
        assert!(menu.get("zz").is_none());

        Ok(())
    }

    #[test]
    fn filters_by_category() -> TestResult {
        let menu = Menu::from_yaml_str(MENU)?;

        let burgers: Vec<&str> = menu.by_category("burgers").map(|e| e.id.as_str()).collect();
        let everything = menu.by_category(ALL_CATEGORIES).count();

        assert_eq!(burgers, ["b1", "b2"]);
        assert_eq!(everything, 3);
        assert_eq!(menu.by_category("drinks").count(), 0);
        assert_eq!(menu.categories(), ["burgers", "pizza"]);

        Ok(())
    }

    #[test]
    fn price_of_converts_to_money() -> TestResult {
        let menu = Menu::from_yaml_str(MENU)?;
        let entry = menu.get("b2").ok_or("missing b2")?;

        assert_eq!(menu.price_of(entry), Money::from_minor(625, USD));

        Ok(())
    }

    #[test]
    fn mixed_currencies_are_rejected() {
        let yaml = r#"
menu:
  - id: a
    name: A
    category: x
    price: "1.00 USD"
  - id: b
    name: B
    category: x
    price: "1.00 GBP"
"#;

        assert!(matches!(
            Menu::from_yaml_str(yaml),
            Err(MenuError::CurrencyMismatch(_, _))
        ));
    }

    #[test]
    fn parse_price_rejects_bad_input() {
        assert!(matches!(parse_price("5.00"), Err(MenuError::InvalidPrice(_))));
        assert!(matches!(parse_price("abc USD"), Err(MenuError::InvalidPrice(_))));
        assert!(matches!(parse_price("-1 USD"), Err(MenuError::InvalidPrice(_))));
        assert!(matches!(
            parse_price("1.00 JPY"),
            Err(MenuError::UnknownCurrency(code)) if code == "JPY"
        ));
    }
}
