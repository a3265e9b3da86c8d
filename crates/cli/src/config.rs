//! Command line configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use foodie::{
    checkout::{CardDetails, CheckoutForm, CustomerInfo, MobileWalletRef, OnlineMethod, PaymentChoice},
    menu::ALL_CATEGORIES,
};

/// Foodie storefront configuration
#[derive(Debug, Parser)]
#[command(name = "foodie", about = "Foodie storefront cart and checkout", long_about = None)]
pub struct CliConfig {
    /// Directory the cart and preferences are kept in
    #[arg(long, env = "FOODIE_DATA_DIR", default_value = ".foodie")]
    pub data_dir: PathBuf,

    /// Menu YAML file
    #[arg(long, env = "FOODIE_MENU", default_value = "fixtures/menu.yml")]
    pub menu: PathBuf,

    /// Phone number orders are sent to
    #[arg(long, env = "FOODIE_ORDER_DESTINATION", default_value = "15551234567")]
    pub order_destination: String,

    /// Base URL of the messaging deep link
    #[arg(long, env = "FOODIE_ORDER_LINK_BASE", default_value = "https://wa.me")]
    pub order_link_base: String,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "FOODIE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Storefront actions.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the menu
    Menu {
        /// Only show this category
        #[arg(long, default_value = ALL_CATEGORIES)]
        category: String,
    },

    /// Add a menu item to the cart
    Add {
        /// Menu item id
        id: String,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },

    /// Remove a line from the cart
    Remove {
        /// Menu item id
        id: String,
    },

    /// Set the quantity of a line; zero or less removes it
    Set {
        /// Menu item id
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Empty the cart
    Clear,

    /// Show the cart and its totals
    Show {
        /// Promo code to preview
        #[arg(long)]
        promo: Option<String>,
    },

    /// Place an order for the cart
    Checkout(CheckoutArgs),

    /// Show or change the dark mode preference
    Theme {
        /// Flip the stored preference
        #[arg(long)]
        toggle: bool,

        /// Whether the system prefers a dark colour scheme
        #[arg(long)]
        system_dark: bool,
    },
}

/// Payment option picked at checkout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PaymentArg {
    /// Pay the courier
    Cod,

    /// Pay now
    Online,
}

/// Online payment method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OnlineMethodArg {
    /// Bank card
    Card,

    /// Mobile wallet
    Wallet,
}

/// Checkout form fields.
///
/// Everything is optional on the command line; missing fields are reported by
/// checkout validation in the same way the storefront form reports them.
#[derive(Debug, Default, Args)]
pub struct CheckoutArgs {
    /// Customer name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Contact phone number
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Delivery address
    #[arg(long, default_value = "")]
    pub address: String,

    /// Delivery notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Payment option
    #[arg(long, value_enum)]
    pub payment: Option<PaymentArg>,

    /// Online payment method
    #[arg(long, value_enum)]
    pub online_method: Option<OnlineMethodArg>,

    /// Card number
    #[arg(long)]
    pub card_number: Option<String>,

    /// Card expiry, e.g. 12/29
    #[arg(long)]
    pub card_expiry: Option<String>,

    /// Card security code
    #[arg(long)]
    pub card_cvv: Option<String>,

    /// Mobile wallet provider
    #[arg(long)]
    pub wallet_provider: Option<String>,

    /// Mobile wallet account number
    #[arg(long)]
    pub wallet_account: Option<String>,

    /// Promo code
    #[arg(long)]
    pub promo: Option<String>,
}

impl CheckoutArgs {
    /// Build the checkout form these arguments describe.
    pub fn form(&self) -> CheckoutForm {
        let payment = self.payment.map(|payment| match payment {
            PaymentArg::Cod => PaymentChoice::CashOnDelivery,
            PaymentArg::Online => PaymentChoice::Online(self.online_method()),
        });

        CheckoutForm {
            customer: CustomerInfo {
                name: self.name.clone(),
                phone: self.phone.clone(),
                address: self.address.clone(),
                notes: self.notes.clone(),
            },
            payment,
        }
    }

    fn online_method(&self) -> Option<OnlineMethod> {
        let method = match self.online_method? {
            OnlineMethodArg::Card => OnlineMethod::Card(CardDetails {
                number: self.card_number.clone().unwrap_or_default(),
                expiry: self.card_expiry.clone().unwrap_or_default(),
                cvv: self.card_cvv.clone().unwrap_or_default(),
            }),
            OnlineMethodArg::Wallet => OnlineMethod::MobileWallet(MobileWalletRef {
                provider: self.wallet_provider.clone().unwrap_or_default(),
                account_number: self.wallet_account.clone().unwrap_or_default(),
            }),
        };

        Some(method)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        CliConfig::command().debug_assert();
    }

    #[test]
    fn set_accepts_negative_quantity() -> TestResult {
        let config = CliConfig::try_parse_from(["foodie", "set", "b1", "-1"])?;

        assert!(matches!(
            config.command,
            Command::Set { ref id, quantity: -1 } if id == "b1"
        ));

        Ok(())
    }

    #[test]
    fn online_without_method_leaves_method_empty() {
        let args = CheckoutArgs {
            payment: Some(PaymentArg::Online),
            ..CheckoutArgs::default()
        };

        assert_eq!(args.form().payment, Some(PaymentChoice::Online(None)));
    }

    #[test]
    fn card_fields_fill_card_details() {
        let args = CheckoutArgs {
            name: "Ada".to_string(),
            payment: Some(PaymentArg::Online),
            online_method: Some(OnlineMethodArg::Card),
            card_number: Some("4242424242424242".to_string()),
            card_expiry: Some("12/29".to_string()),
            ..CheckoutArgs::default()
        };

        let form = args.form();

        assert_eq!(form.customer.name, "Ada");
        assert_eq!(
            form.payment,
            Some(PaymentChoice::Online(Some(OnlineMethod::Card(CardDetails {
                number: "4242424242424242".to_string(),
                expiry: "12/29".to_string(),
                cvv: String::new(),
            }))))
        );
    }

    #[test]
    fn no_payment_flag_means_no_choice() {
        assert_eq!(CheckoutArgs::default().form().payment, None);
    }
}
