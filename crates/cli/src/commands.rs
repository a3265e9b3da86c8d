//! Command handlers
//!
//! Each invocation rehydrates the cart from the data directory, applies one
//! command and prints the result, so consecutive runs behave like page
//! reloads of the same session.

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Style, Theme, object::Columns},
};
use tracing::info;

use foodie::{
    cart::{CartEvent, CartListener, CartStore},
    checkout::{PaymentSelection, validate_and_build_order},
    dispatch::{DeepLinkChannel, dispatch},
    items::LineItem,
    menu::{Menu, MenuEntry},
    notify::Notification,
    pricing::PricingSnapshot,
    promotions::apply_promo_code,
    storage::FileStorage,
    theme::DarkMode,
};

use crate::{
    config::{CheckoutArgs, CliConfig, Command},
    errors::CliError,
};

/// Collects the notifications cart changes produce until they are printed.
#[derive(Debug, Default)]
struct Toasts {
    pending: Vec<Notification>,
}

impl CartListener for Toasts {
    fn cart_changed(&mut self, event: &CartEvent, _items: &[LineItem]) {
        if let Some(note) = Notification::for_cart_event(event) {
            self.pending.push(note);
        }
    }
}

type Cart = CartStore<FileStorage, Toasts>;

/// Run the configured command, writing its output to `out`.
///
/// # Errors
///
/// Returns an error if the menu cannot be loaded, an item id is unknown, a
/// promo code or checkout is rejected, or output cannot be written.
pub fn run(config: &CliConfig, out: &mut impl io::Write) -> Result<(), CliError> {
    let storage = FileStorage::new(&config.data_dir);

    if let Command::Theme {
        toggle,
        system_dark,
    } = config.command
    {
        return theme(storage, toggle, system_dark, out);
    }

    let menu = Menu::load(&config.menu)?;
    let mut cart = CartStore::load_with_listener(storage, menu.currency(), Toasts::default());

    match &config.command {
        Command::Menu { category } => write_menu(out, &menu, category)?,
        Command::Add { id, quantity } => {
            let entry = menu
                .get(id)
                .ok_or_else(|| CliError::UnknownItem(id.clone()))?;

            cart.add(entry.id.clone(), entry.name.clone(), entry.price, *quantity);
        }
        Command::Remove { id } => cart.remove(id),
        Command::Set { id, quantity } => cart.set_quantity(id, *quantity),
        Command::Clear => cart.clear(),
        Command::Show { promo } => show(&cart, promo.as_deref(), out)?,
        Command::Checkout(args) => checkout(config, &mut cart, args, out)?,
        Command::Theme { .. } => {}
    }

    for note in cart.listener_mut().pending.drain(..) {
        writeln!(out, "{note}")?;
    }

    Ok(())
}

fn show(cart: &Cart, promo: Option<&str>, out: &mut impl io::Write) -> Result<(), CliError> {
    let mut totals = cart.totals();

    if let Some(code) = promo {
        match apply_promo_code(code, &totals) {
            Ok(discounted) => {
                totals = discounted;
                writeln!(out, "{}", Notification::promo_applied())?;
            }
            Err(err) => writeln!(out, "{}", Notification::from(&err))?,
        }
    }

    write_cart(out, cart.items(), &totals)
}

fn checkout(
    config: &CliConfig,
    cart: &mut Cart,
    args: &CheckoutArgs,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let mut totals = cart.totals();

    if let Some(code) = &args.promo {
        totals = apply_promo_code(code, &totals)?;
    }

    let order = validate_and_build_order(cart.items(), &totals, &args.form())?;

    if matches!(order.payment(), PaymentSelection::OnlinePayment(_)) {
        writeln!(out, "{}", Notification::processing_payment())?;
    }

    let mut channel = DeepLinkChannel::new(
        config.order_link_base.as_str(),
        config.order_destination.as_str(),
        &mut *out,
    );
    dispatch(&order, &mut channel);

    cart.clear();

    info!(order = %order.number(), "order placed");

    writeln!(out, "{}", Notification::order_placed(order.number()))?;

    Ok(())
}

fn theme(
    mut storage: FileStorage,
    toggle: bool,
    system_dark: bool,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let mut mode = DarkMode::load(&storage, system_dark);

    if toggle {
        mode.toggle(&mut storage);
    }

    let state = if mode.is_enabled() { "on" } else { "off" };

    writeln!(out, "Dark mode: {state}")?;

    Ok(())
}

fn write_menu(out: &mut impl io::Write, menu: &Menu, category: &str) -> Result<(), CliError> {
    let entries: Vec<&MenuEntry> = menu.by_category(category).collect();

    if entries.is_empty() {
        writeln!(out, "No items in category {category}")?;

        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["Id", "Item", "Category", "Price"]);

    for entry in entries {
        builder.push_record([
            entry.id.to_string(),
            entry.name.clone(),
            entry.category.clone(),
            menu.price_of(entry).to_string(),
        ]);
    }

    write_table(out, builder, 3..4)
}

fn write_cart(
    out: &mut impl io::Write,
    items: &[LineItem],
    totals: &PricingSnapshot,
) -> Result<(), CliError> {
    if items.is_empty() {
        writeln!(out, "Your cart is empty")?;

        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["Item", "Qty", "Price", "Total"]);

    for item in items {
        builder.push_record([
            item.name().to_string(),
            item.quantity().to_string(),
            item.unit_price().to_string(),
            item.line_total().to_string(),
        ]);
    }

    write_table(out, builder, 1..4)?;
    write_summary(out, totals)
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric_columns: std::ops::Range<usize>,
) -> Result<(), CliError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Columns::new(numeric_columns), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

/// Writes totals as right-aligned label and value columns.
fn write_summary(out: &mut impl io::Write, totals: &PricingSnapshot) -> Result<(), CliError> {
    let mut lines = vec![
        ("Subtotal:", totals.subtotal().to_string()),
        ("Delivery:", totals.delivery_fee().to_string()),
        ("Tax:", totals.tax().to_string()),
    ];

    if let Some(discount) = totals.discount() {
        lines.push(("Discount:", format!("-{discount}")));
    }

    lines.push(("Total:", totals.total().to_string()));

    let label_width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = lines.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    for (label, value) in lines {
        writeln!(out, " {label:>label_width$}  {value:>value_width$}")?;
    }

    Ok(())
}
