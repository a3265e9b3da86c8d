//! Order dispatch
//!
//! Renders a finished order as a plain-text message and hands it to an
//! external channel. Delivery is fire and forget: the channel's outcome is
//! not observable here, and clearing the cart afterwards is the caller's job.

use std::{fmt::Write as _, io};

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{info, warn};

use crate::checkout::{OnlineMethod, Order, PaymentSelection};

/// One-way sink for order messages.
#[cfg_attr(test, mockall::automock)]
pub trait OrderChannel {
    /// Hand `message` to the channel without waiting for an answer.
    fn deliver(&mut self, message: &str);
}

/// Channel that turns a message into a pre-addressed deep link, e.g.
/// `https://wa.me/15551234567?text=...`, and writes it out to be opened.
#[derive(Debug)]
pub struct DeepLinkChannel<W: io::Write> {
    base_url: String,
    destination: String,
    out: W,
}

impl<W: io::Write> DeepLinkChannel<W> {
    /// Create a channel addressed to `destination` under `base_url`.
    pub fn new(base_url: impl Into<String>, destination: impl Into<String>, out: W) -> Self {
        Self {
            base_url: base_url.into(),
            destination: destination.into(),
            out,
        }
    }

    /// Deep link carrying `message`.
    pub fn link_for(&self, message: &str) -> String {
        format!(
            "{}/{}?text={}",
            self.base_url.trim_end_matches('/'),
            self.destination,
            utf8_percent_encode(message, NON_ALPHANUMERIC)
        )
    }

    /// Release the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> OrderChannel for DeepLinkChannel<W> {
    fn deliver(&mut self, message: &str) {
        let link = self.link_for(message);

        if let Err(err) = writeln!(self.out, "{link}").and_then(|()| self.out.flush()) {
            warn!(error = %err, "failed to hand order link to channel");
        }
    }
}

/// Render `order` as a human-readable multi-line message.
///
/// The output depends only on the order, so the same order always renders
/// the same text.
pub fn format_order_message(order: &Order) -> String {
    let mut msg = String::new();
    let customer = order.customer();
    let totals = order.totals();

    // Writing to a String cannot fail.
    _ = writeln!(msg, "New order {}", order.number());
    _ = writeln!(msg);
    _ = writeln!(msg, "Name: {}", customer.name.trim());
    _ = writeln!(msg, "Phone: {}", customer.phone.trim());
    _ = writeln!(msg, "Address: {}", customer.address.trim());
    if let Some(notes) = customer.notes() {
        _ = writeln!(msg, "Notes: {}", notes.trim());
    }

    _ = writeln!(msg);
    _ = writeln!(msg, "Items:");
    for item in order.items() {
        _ = writeln!(
            msg,
            "- {} x{} @ {} = {}",
            item.name(),
            item.quantity(),
            item.unit_price(),
            item.line_total()
        );
    }

    _ = writeln!(msg);
    _ = writeln!(msg, "Payment: {}", payment_label(order.payment()));
    _ = writeln!(msg);
    _ = writeln!(msg, "Subtotal: {}", totals.subtotal());
    _ = writeln!(msg, "Delivery: {}", totals.delivery_fee());
    _ = writeln!(msg, "Tax: {}", totals.tax());
    if let Some(discount) = totals.discount() {
        _ = writeln!(msg, "Discount: -{discount}");
    }
    _ = write!(msg, "Total: {}", totals.total());

    msg
}

/// Format `order` and hand it to `channel`.
pub fn dispatch<C: OrderChannel + ?Sized>(order: &Order, channel: &mut C) {
    let message = format_order_message(order);

    channel.deliver(&message);

    info!(order = %order.number(), "order dispatched");
}

fn payment_label(payment: &PaymentSelection) -> String {
    match payment {
        PaymentSelection::CashOnDelivery => "Cash on delivery".to_string(),
        PaymentSelection::OnlinePayment(OnlineMethod::Card(card)) => {
            format!("Card ending {}", card.last_four())
        }
        PaymentSelection::OnlinePayment(OnlineMethod::MobileWallet(wallet)) => {
            format!(
                "{} wallet ({})",
                wallet.provider.trim(),
                wallet.account_number.trim()
            )
        }
    }
}
