//! CLI errors

use std::io;

use thiserror::Error;

use foodie::{checkout::CheckoutError, menu::MenuError, promotions::PromoError};

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Menu could not be loaded.
    #[error(transparent)]
    Menu(#[from] MenuError),

    /// No menu item has the requested id.
    #[error("Unknown menu item: {0}")]
    UnknownItem(String),

    /// Checkout rejected the form.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Promo code rejected.
    #[error(transparent)]
    Promo(#[from] PromoError),

    /// Writing to stdout failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}
