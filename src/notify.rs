//! Notifications
//!
//! User-facing messages a front end can show as transient toasts.

use std::fmt;

use crate::{
    cart::CartEvent,
    checkout::{CheckoutError, OrderNumber},
    promotions::PromoError,
};

/// Severity of a notification, deciding how it is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Something the customer asked for happened.
    Success,

    /// Something needs the customer's attention.
    Error,

    /// Neutral information.
    Info,
}

/// A message for the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity
    pub kind: NotificationKind,

    /// Text to display
    pub message: String,
}

impl Notification {
    /// Success notification
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    /// Error notification
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    /// Informational notification
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }

    /// Notification for a cart change, if the change is worth announcing.
    pub fn for_cart_event(event: &CartEvent) -> Option<Self> {
        match event {
            CartEvent::Added { name, .. } => Some(Self::success(format!("Added {name} to cart!"))),
            CartEvent::Removed { name, .. } => Some(Self::info(format!("Removed {name} from cart"))),
            CartEvent::Cleared => Some(Self::info("Cart has been cleared")),
            CartEvent::QuantityChanged { .. } => None,
        }
    }

    /// Confirmation shown once an order has been handed off.
    pub fn order_placed(number: OrderNumber) -> Self {
        Self::success(format!("Order #{number} placed successfully!"))
    }

    /// Shown while an online payment is being taken.
    pub fn processing_payment() -> Self {
        Self::info("Processing payment...")
    }

    /// Confirmation shown once a promo code has been applied.
    pub fn promo_applied() -> Self {
        Self::success("Promo code applied successfully!")
    }
}

impl From<&CheckoutError> for Notification {
    fn from(err: &CheckoutError) -> Self {
        Self::error(err.to_string())
    }
}

impl From<&PromoError> for Notification {
    fn from(err: &PromoError) -> Self {
        Self::error(err.to_string())
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.kind {
            NotificationKind::Success => "✓",
            NotificationKind::Error => "✗",
            NotificationKind::Info => "i",
        };

        write!(f, "[{marker}] {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ProductId;

    #[test]
    fn cart_events_map_to_storefront_messages() {
        let added = CartEvent::Added {
            id: ProductId::from("b1"),
            name: "Burger".to_string(),
            quantity: 1,
        };
        let removed = CartEvent::Removed {
            id: ProductId::from("b1"),
            name: "Burger".to_string(),
        };
        let changed = CartEvent::QuantityChanged {
            id: ProductId::from("b1"),
            quantity: 2,
        };

        assert_eq!(
            Notification::for_cart_event(&added),
            Some(Notification::success("Added Burger to cart!"))
        );
        assert_eq!(
            Notification::for_cart_event(&removed),
            Some(Notification::info("Removed Burger from cart"))
        );
        assert_eq!(
            Notification::for_cart_event(&CartEvent::Cleared),
            Some(Notification::info("Cart has been cleared"))
        );
        assert_eq!(Notification::for_cart_event(&changed), None);
    }

    #[test]
    fn errors_become_error_notifications() {
        let note = Notification::from(&CheckoutError::NoPaymentMethodSelected);

        assert_eq!(note.kind, NotificationKind::Error);
        assert_eq!(note.message, "Please select a payment method");

        let note = Notification::from(&PromoError::InvalidCode("XYZ".to_string()));

        assert_eq!(note.message, "Invalid promo code");
    }

    #[test]
    fn processing_payment_is_informational() {
        assert_eq!(
            Notification::processing_payment().to_string(),
            "[i] Processing payment..."
        );
    }

    #[test]
    fn display_prefixes_marker() {
        assert_eq!(Notification::info("hello").to_string(), "[i] hello");
    }
}
