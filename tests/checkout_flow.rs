//! End-to-end storefront session: browse the menu, fill the cart, apply a
//! promo code, check out and hand the order off.
//!
//! The cart lives in a file-backed store so that the session can be torn down
//! and resumed the way a page reload would.

use std::{cell::RefCell, rc::Rc};

use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use foodie::prelude::*;

const MENU: &str = r#"
menu:
  - id: b1
    name: Burger
    category: burgers
    price: "5.00 USD"
  - id: f1
    name: Fries
    category: sides
    price: "2.25 USD"
"#;

fn add_from_menu<S: Storage, L: CartListener>(
    cart: &mut CartStore<S, L>,
    menu: &Menu,
    id: &str,
    quantity: u32,
) -> TestResult {
    let entry = menu.get(id).ok_or("unknown menu id")?;

    cart.add(entry.id.clone(), entry.name.clone(), entry.price, quantity);

    Ok(())
}

fn delivery_form(payment: Option<PaymentChoice>) -> CheckoutForm {
    CheckoutForm {
        customer: CustomerInfo {
            name: "Grace".to_string(),
            phone: "555-0199".to_string(),
            address: "7 Compiler Court".to_string(),
            notes: None,
        },
        payment,
    }
}

#[test]
fn cart_survives_reload_in_order() -> TestResult {
    let dir = tempfile::tempdir()?;
    let menu = Menu::from_yaml_str(MENU)?;

    let before = {
        let mut cart = CartStore::load(FileStorage::new(dir.path()), menu.currency());
        add_from_menu(&mut cart, &menu, "f1", 1)?;
        add_from_menu(&mut cart, &menu, "b1", 2)?;
        add_from_menu(&mut cart, &menu, "f1", 2)?;
        cart.items().to_vec()
    };

    let reloaded = CartStore::load(FileStorage::new(dir.path()), menu.currency());

    assert_eq!(reloaded.items(), before.as_slice());
    assert_eq!(reloaded.item_count(), 5);
    assert_eq!(
        reloaded.items().first().map(LineItem::quantity),
        Some(3),
        "fries merged into the first line"
    );

    Ok(())
}

#[test]
fn burger_scenario_promo_and_cash_checkout() -> TestResult {
    let menu = Menu::from_yaml_str(MENU)?;
    let mut cart = CartStore::load(MemoryStorage::new(), menu.currency());
    add_from_menu(&mut cart, &menu, "b1", 2)?;

    let totals = cart.totals();
    assert_eq!(totals.subtotal(), Money::from_minor(1000, USD));
    assert_eq!(totals.delivery_fee(), Money::from_minor(250, USD));
    assert_eq!(totals.tax(), Money::from_minor(100, USD));
    assert_eq!(totals.total(), Money::from_minor(1350, USD));

    assert!(matches!(
        apply_promo_code("XYZ", &totals),
        Err(PromoError::InvalidCode(_))
    ));
    let discounted = apply_promo_code("FOODIE10", &totals)?;
    assert_eq!(discounted.total(), Money::from_minor(1215, USD));

    let order = validate_and_build_order(
        cart.items(),
        &discounted,
        &delivery_form(Some(PaymentChoice::CashOnDelivery)),
    )?;

    assert_eq!(order.payment(), &PaymentSelection::CashOnDelivery);
    assert_eq!(order.items(), cart.items());
    assert_eq!(order.totals().total(), Money::from_minor(1215, USD));
    assert!(order.number().to_string().starts_with("FD-"));
    assert_eq!(order.number().to_string().len(), 9);

    let mut channel = DeepLinkChannel::new("https://wa.me", "15550000000", Vec::new());
    dispatch(&order, &mut channel);
    cart.clear();

    let link = String::from_utf8(channel.into_inner())?;
    assert!(link.starts_with("https://wa.me/15550000000?text=New%20order%20FD%2D"));
    assert!(cart.is_empty());
    assert_eq!(cart.totals(), PricingSnapshot::zero(USD));

    // The order is a snapshot and is unaffected by clearing the cart.
    assert_eq!(order.items().len(), 1);

    Ok(())
}

#[test]
fn failed_checkout_leaves_cart_alone() -> TestResult {
    let menu = Menu::from_yaml_str(MENU)?;
    let mut cart = CartStore::load(MemoryStorage::new(), menu.currency());
    add_from_menu(&mut cart, &menu, "b1", 1)?;
    let before = cart.items().to_vec();

    let result = validate_and_build_order(
        cart.items(),
        &cart.totals(),
        &delivery_form(Some(PaymentChoice::Online(None))),
    );

    assert_eq!(result, Err(CheckoutError::NoOnlineMethodSelected));
    assert_eq!(cart.items(), before.as_slice());

    Ok(())
}

#[test]
fn listener_drives_notifications() -> TestResult {
    let menu = Menu::from_yaml_str(MENU)?;
    let shown: Rc<RefCell<Vec<Notification>>> = Rc::default();
    let toasts = Rc::clone(&shown);

    let mut cart = CartStore::load_with_listener(
        MemoryStorage::new(),
        menu.currency(),
        move |event: &CartEvent, _items: &[LineItem]| {
            if let Some(note) = Notification::for_cart_event(event) {
                toasts.borrow_mut().push(note);
            }
        },
    );

    add_from_menu(&mut cart, &menu, "b1", 1)?;
    cart.set_quantity("b1", 4);
    cart.remove("b1");

    let messages: Vec<String> = shown.borrow().iter().map(|n| n.message.clone()).collect();

    assert_eq!(messages, ["Added Burger to cart!", "Removed Burger from cart"]);

    Ok(())
}
