//! Foodie
//!
//! Cart, pricing and checkout core for the Foodie restaurant storefront.
//!
//! The crate owns the cart state machine (merge-on-add line items kept in sync
//! with a persisted key-value store), the pricing rules, promo codes and the
//! checkout pipeline that validates customer input and hands a finished order
//! to an external messaging channel. Rendering is left to whatever front end
//! drives it.

pub mod cart;
pub mod checkout;
pub mod dispatch;
pub mod items;
pub mod menu;
pub mod notify;
pub mod persistence;
pub mod prelude;
pub mod pricing;
pub mod promotions;
pub mod storage;
pub mod theme;
