//! Payment selection.

use std::fmt;

/// The payment options offered at checkout, as entered by the customer.
///
/// This is the unvalidated counterpart of [`PaymentSelection`]: online
/// payment may be picked before a specific method is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentChoice {
    /// Pay the courier in cash.
    CashOnDelivery,

    /// Pay online, with the method if one has been picked.
    Online(Option<OnlineMethod>),
}

/// A validated payment selection carried by an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentSelection {
    /// Pay the courier in cash.
    CashOnDelivery,

    /// Pay online with a fully filled-in method.
    OnlinePayment(OnlineMethod),
}

/// Specific online payment method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnlineMethod {
    /// Debit or credit card.
    Card(CardDetails),

    /// Mobile wallet account.
    MobileWallet(MobileWalletRef),
}

impl OnlineMethod {
    /// Which kind of method this is.
    pub fn kind(&self) -> PaymentMethodKind {
        match self {
            Self::Card(_) => PaymentMethodKind::Card,
            Self::MobileWallet(_) => PaymentMethodKind::MobileWallet,
        }
    }

    /// Check that every field the method needs has been filled in.
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Card(card) => [&card.number, &card.expiry, &card.cvv]
                .iter()
                .all(|field| !field.is_empty()),
            Self::MobileWallet(wallet) => {
                !wallet.provider.is_empty() && !wallet.account_number.is_empty()
            }
        }
    }
}

/// Card fields as entered.
#[derive(Clone, PartialEq, Eq)]
pub struct CardDetails {
    /// Card number
    pub number: String,

    /// Expiry, e.g. "MM/YY"
    pub expiry: String,

    /// Security code
    pub cvv: String,
}

impl CardDetails {
    /// Last four digits of the card number, for display.
    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self.number.chars().filter(char::is_ascii_digit).collect();
        let start = digits.len().saturating_sub(4);

        digits.get(start..).unwrap_or_default().iter().collect()
    }
}

// Keep card secrets out of logs.
impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &format_args!("**** {}", self.last_four()))
            .field("expiry", &"**/**")
            .field("cvv", &"***")
            .finish()
    }
}

/// Mobile wallet account as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobileWalletRef {
    /// Wallet provider, e.g. "bKash"
    pub provider: String,

    /// Account number registered with the provider
    pub account_number: String,
}

/// Kind of online payment method, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethodKind {
    /// Card payment
    Card,

    /// Mobile wallet payment
    MobileWallet,
}

impl fmt::Display for PaymentMethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card => f.write_str("card"),
            Self::MobileWallet => f.write_str("mobile wallet"),
        }
    }
}
