//! Checkout
//!
//! Validates what the customer entered against the current cart and, if every
//! check passes, freezes it all into an [`Order`].
//!
//! Checks run in a fixed order and stop at the first failure, so one attempt
//! reports exactly one [`CheckoutError`]:
//!
//! 1. the cart has items
//! 2. name, phone and address are filled in
//! 3. a payment option is chosen
//! 4. online payment has a specific method
//! 5. that method's fields are filled in

use rand::Rng;
use tracing::{debug, info};

use crate::{items::LineItem, pricing::PricingSnapshot};

pub mod customer;
pub mod errors;
pub mod order;
pub mod payment;

pub use customer::CustomerInfo;
pub use errors::CheckoutError;
pub use order::{Order, OrderNumber, OrderNumberError};
pub use payment::{
    CardDetails, MobileWalletRef, OnlineMethod, PaymentChoice, PaymentMethodKind,
    PaymentSelection,
};

/// Everything the customer filled in on the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    /// Delivery details
    pub customer: CustomerInfo,

    /// Payment option, if one was picked
    pub payment: Option<PaymentChoice>,
}

/// Validate `form` against the cart and build an order.
///
/// `totals` are the totals the customer was shown, including any promo code.
///
/// # Errors
///
/// Returns the first [`CheckoutError`] encountered, in the order listed in the
/// [module documentation](self).
pub fn validate_and_build_order(
    items: &[LineItem],
    totals: &PricingSnapshot,
    form: &CheckoutForm,
) -> Result<Order, CheckoutError> {
    validate_and_build_order_with_rng(items, totals, form, &mut rand::thread_rng())
}

/// As [`validate_and_build_order`], drawing the order number from `rng`.
///
/// # Errors
///
/// See [`validate_and_build_order`].
pub fn validate_and_build_order_with_rng<R: Rng + ?Sized>(
    items: &[LineItem],
    totals: &PricingSnapshot,
    form: &CheckoutForm,
    rng: &mut R,
) -> Result<Order, CheckoutError> {
    let payment = validate(items, form).inspect_err(|err| {
        debug!(error = ?err, "checkout rejected");
    })?;

    let order = Order::new(
        OrderNumber::generate(rng),
        items.to_vec(),
        form.customer.clone(),
        payment,
        *totals,
    );

    info!(
        order = %order.number(),
        items = order.items().len(),
        total = %order.totals().total(),
        "order built"
    );

    Ok(order)
}

fn validate(items: &[LineItem], form: &CheckoutForm) -> Result<PaymentSelection, CheckoutError> {
    if items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    if !form.customer.has_delivery_details() {
        return Err(CheckoutError::MissingDeliveryInfo);
    }

    match &form.payment {
        None => Err(CheckoutError::NoPaymentMethodSelected),
        Some(PaymentChoice::CashOnDelivery) => Ok(PaymentSelection::CashOnDelivery),
        Some(PaymentChoice::Online(None)) => Err(CheckoutError::NoOnlineMethodSelected),
        Some(PaymentChoice::Online(Some(method))) if !method.is_complete() => {
            Err(CheckoutError::IncompletePaymentDetails(method.kind()))
        }
        Some(PaymentChoice::Online(Some(method))) => {
            Ok(PaymentSelection::OnlinePayment(method.clone()))
        }
    }
}
