//! Foodie prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartEvent, CartListener, CartStore, NoopListener},
    checkout::{
        CardDetails, CheckoutError, CheckoutForm, CustomerInfo, MobileWalletRef, OnlineMethod,
        Order, OrderNumber, PaymentChoice, PaymentMethodKind, PaymentSelection,
        validate_and_build_order,
    },
    dispatch::{DeepLinkChannel, OrderChannel, dispatch, format_order_message},
    items::{LineItem, ProductId},
    menu::{Menu, MenuEntry, MenuError},
    notify::{Notification, NotificationKind},
    pricing::{PricingSnapshot, compute_totals},
    promotions::{PromoCatalog, PromoError, apply_promo_code},
    storage::{FileStorage, MemoryStorage, Storage, StorageError},
    theme::DarkMode,
};
