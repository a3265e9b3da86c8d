//! Checkout errors.

use thiserror::Error;

use super::payment::PaymentMethodKind;

/// Reasons a checkout attempt was rejected.
///
/// Every variant is correctable by the customer; the display text is the
/// message shown to them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutError {
    /// There is nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Name, phone or address is empty.
    #[error("Please fill all delivery information fields")]
    MissingDeliveryInfo,

    /// Neither cash on delivery nor online payment was chosen.
    #[error("Please select a payment method")]
    NoPaymentMethodSelected,

    /// Online payment was chosen without picking a card or wallet.
    #[error("Please select an online payment method")]
    NoOnlineMethodSelected,

    /// The chosen online method is missing some of its fields.
    #[error("Please fill all {0} details")]
    IncompletePaymentDetails(PaymentMethodKind),
}
