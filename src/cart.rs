//! Cart
//!
//! [`CartStore`] is the only writer of cart state. Every mutation is written
//! through to [`Storage`] and then announced to a [`CartListener`], which is
//! where a front end hooks its re-rendering.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tracing::{debug, warn};

use crate::{
    items::{LineItem, ProductId},
    persistence::{self, to_minor_units},
    pricing::{PricingSnapshot, compute_totals},
    storage::Storage,
};

/// A change made to the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    /// Units of a product were added, either as a new line or merged into an existing one.
    Added {
        /// Product identifier
        id: ProductId,
        /// Name of the line the units ended up in
        name: String,
        /// Number of units added
        quantity: u32,
    },

    /// A line was removed.
    Removed {
        /// Product identifier
        id: ProductId,
        /// Name of the removed line
        name: String,
    },

    /// A line's quantity was set to a new value.
    QuantityChanged {
        /// Product identifier
        id: ProductId,
        /// New quantity
        quantity: u32,
    },

    /// Every line was removed.
    Cleared,
}

/// Render sink notified after each cart mutation has been persisted.
pub trait CartListener {
    /// Called with the event and the cart contents after the change.
    fn cart_changed(&mut self, event: &CartEvent, items: &[LineItem]);
}

/// Listener that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl CartListener for NoopListener {
    fn cart_changed(&mut self, _event: &CartEvent, _items: &[LineItem]) {}
}

impl<F> CartListener for F
where
    F: FnMut(&CartEvent, &[LineItem]),
{
    fn cart_changed(&mut self, event: &CartEvent, items: &[LineItem]) {
        self(event, items);
    }
}

/// Owned cart state for one session.
#[derive(Debug)]
pub struct CartStore<S: Storage, L: CartListener = NoopListener> {
    items: Vec<LineItem>,
    storage: S,
    listener: L,
    currency: &'static Currency,
}

impl<S: Storage> CartStore<S> {
    /// Rehydrate a cart from `storage`.
    pub fn load(storage: S, currency: &'static Currency) -> Self {
        Self::load_with_listener(storage, currency, NoopListener)
    }
}

impl<S: Storage, L: CartListener> CartStore<S, L> {
    /// Rehydrate a cart from `storage`, reporting later changes to `listener`.
    ///
    /// Invalid persisted entries are dropped and duplicate ids merged, so the
    /// loaded cart always satisfies the one-line-per-product invariant.
    pub fn load_with_listener(storage: S, currency: &'static Currency, listener: L) -> Self {
        let mut items: Vec<LineItem> = Vec::new();

        for stored in persistence::load_cart_record(&storage) {
            let Some(item) = stored.into_line_item(currency) else {
                warn!("dropping invalid persisted cart entry");
                continue;
            };

            match items.iter_mut().find(|existing| existing.id() == item.id()) {
                Some(existing) => existing.increase_quantity(item.quantity()),
                None => items.push(item),
            }
        }

        debug!(items = items.len(), "cart loaded");

        Self {
            items,
            storage,
            listener,
            currency,
        }
    }

    /// Add `quantity` units of a product.
    ///
    /// If the product is already in the cart its quantity is increased; its
    /// name and price stay as they were first added. Adding zero units does
    /// nothing.
    pub fn add(
        &mut self,
        id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) {
        let id = id.into();

        if quantity == 0 {
            debug!(%id, "ignoring add of zero units");
            return;
        }

        let name = if let Some(existing) = self.items.iter_mut().find(|item| *item.id() == id) {
            existing.increase_quantity(quantity);
            existing.name().to_string()
        } else {
            let Some(minor) = to_minor_units(unit_price) else {
                warn!(%id, %unit_price, "refusing to add item with unrepresentable price");
                return;
            };

            let name = name.into();
            self.items.push(LineItem::new(
                id.clone(),
                name.clone(),
                Money::from_minor(minor, self.currency),
                quantity,
            ));
            name
        };

        debug!(%id, quantity, "added to cart");

        self.commit(&CartEvent::Added { id, name, quantity });
    }

    /// Remove a product's line. Unknown ids are ignored.
    pub fn remove(&mut self, id: &str) {
        let Some(idx) = self.position(id) else {
            return;
        };

        let removed = self.items.remove(idx);

        debug!(id, "removed from cart");

        self.commit(&CartEvent::Removed {
            id: removed.id().clone(),
            name: removed.name().to_string(),
        });
    }

    /// Set a product's quantity. Zero or a negative value removes the line.
    ///
    /// Unknown ids are ignored.
    pub fn set_quantity(&mut self, id: &str, quantity: i64) {
        let Some(idx) = self.position(id) else {
            return;
        };

        let Ok(quantity) = u32::try_from(quantity) else {
            if quantity <= 0 {
                self.remove(id);
            } else {
                self.set_quantity_at(idx, u32::MAX);
            }
            return;
        };

        if quantity == 0 {
            self.remove(id);
        } else {
            self.set_quantity_at(idx, quantity);
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();

        debug!("cart cleared");

        self.commit(&CartEvent::Cleared);
    }

    /// Line items in the order they were first added.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity())).sum()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currency every price in the cart is held in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Totals for the current contents, without any discount.
    pub fn totals(&self) -> PricingSnapshot {
        compute_totals(&self.items, Percentage::from(Decimal::ZERO), self.currency)
    }

    /// Backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Listener receiving change events.
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// End the session, handing back the storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id().as_str() == id)
    }

    fn set_quantity_at(&mut self, idx: usize, quantity: u32) {
        let Some(item) = self.items.get_mut(idx) else {
            return;
        };

        item.set_quantity(quantity);
        let id = item.id().clone();

        debug!(%id, quantity, "quantity updated");

        self.commit(&CartEvent::QuantityChanged { id, quantity });
    }

    fn commit(&mut self, event: &CartEvent) {
        persistence::save_cart(&mut self.storage, &self.items);
        self.listener.cart_changed(event, &self.items);
    }
}
