//! Integration test for the complete ordering journey over the anytown
//! fixture set.
//!
//! This test walks the storefront end to end: browse the catalog with the
//! search and cuisine filters, open a restaurant, build a cart from its menu,
//! drive the checkout wizard through every gate, and place the order.
//!
//! Expected totals for the cart it builds:
//!
//! 1. Spaghetti Carbonara: $14.99 x 2 = $29.98 (added twice, merged into
//!    one line)
//! 2. Garlic Bread: $5.99 x 1 = $5.99
//!
//! Subtotal: $35.97 (3597 minor units)
//! Taxes at 8%: 3597 x 0.08 = 287.76 -> $2.88 (rounded half away from zero)
//! Delivery fee: $5.00 (flat, charged because the cart is non-empty)
//! Total: $43.85 (4385 minor units)
//!
//! The order id is minted from the clock at submission: the wizard submits
//! at 1_723_456_791_123 ms, and the last six digits give FF791123.

use std::time::Duration;

use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use foodfleet::{
    cart::Cart,
    catalog::CatalogBrowse,
    checkout::{Checkout, CheckoutError, CheckoutStep},
    clock::ManualClock,
    fixtures::Fixture,
    latency::{CONFIRMATION_DELAY, DelayedFetch},
    receipt::write_order_receipt,
};

#[test]
fn browse_to_placed_order() -> TestResult {
    let fixture = Fixture::from_set("anytown")?;

    // Search plus a cuisine chip narrows the catalog to Pasta Paradise.
    let mut browse = CatalogBrowse::new();
    browse.set_search("pasta");
    browse.toggle_cuisine("Italian");

    let visible = browse.visible(fixture.catalog());
    assert_eq!(visible.len(), 1, "Filters should leave a single restaurant");

    let Some(summary) = visible.first() else {
        panic!("Expected a visible restaurant");
    };
    assert_eq!(summary.id, "1");

    // Open the restaurant and build a cart from its menu.
    let detail = fixture.restaurant(&summary.id)?;
    let Some(carbonara) = detail.find_item("m3") else {
        panic!("Expected Spaghetti Carbonara on the menu");
    };
    let Some(garlic_bread) = detail.find_item("m1") else {
        panic!("Expected Garlic Bread on the menu");
    };

    let mut cart = Cart::new(fixture.currency()?);
    cart.add_item(carbonara)?;
    cart.add_item(carbonara)?;
    cart.add_item(garlic_bread)?;

    assert_eq!(cart.len(), 2, "Repeat adds should merge into one line");
    assert_eq!(cart.total_quantity(), 3);

    // The wizard refuses to leave the address step until the form is valid.
    let mut checkout = Checkout::new(cart);

    assert_eq!(checkout.advance()?, CheckoutStep::DeliveryAddress);
    assert!(matches!(
        checkout.advance(),
        Err(CheckoutError::InvalidAddress(_))
    ));
    assert_eq!(checkout.step(), CheckoutStep::DeliveryAddress);

    let address = &mut checkout.form_mut().address;
    address.full_name = "Alex Johnson".to_string();
    address.address_line1 = "123 Main Street".to_string();
    address.city = "Anytown".to_string();
    address.postal_code = "12345".to_string();
    address.phone = "+15551234567".to_string();

    assert_eq!(checkout.advance()?, CheckoutStep::Payment);

    checkout.form_mut().payment_method = "paypal".parse()?;
    checkout.form_mut().promo_code = Some("WELCOME10".to_string());

    assert_eq!(checkout.advance()?, CheckoutStep::Confirmation);

    let totals = checkout.totals()?;
    assert_eq!(totals.subtotal(), Money::from_minor(3597, USD));
    assert_eq!(totals.taxes(), Money::from_minor(288, USD));
    assert_eq!(totals.delivery_fee(), Money::from_minor(500, USD));
    assert_eq!(totals.total(), Money::from_minor(4385, USD));

    // Confirmation hands off after a simulated delay; the order id is minted
    // from the clock once the delay has run down.
    let clock = ManualClock::new(Duration::from_millis(1_723_456_789_123));
    let mut confirmation = DelayedFetch::schedule(&clock, CONFIRMATION_DELAY, ());

    assert_eq!(confirmation.poll(&clock), None);
    clock.advance(CONFIRMATION_DELAY);
    assert_eq!(confirmation.poll(&clock), Some(()));

    let order = checkout.submit(&clock)?;

    assert_eq!(order.id, "FF791123");
    assert_eq!(order.payment_method.label(), "PayPal");
    assert_eq!(order.promo_code.as_deref(), Some("WELCOME10"));

    // The receipt shows the lines, the derived amounts and the delivery
    // details the wizard collected.
    let mut out = Vec::new();
    write_order_receipt(&mut out, &order)?;
    let receipt = String::from_utf8(out)?;

    assert!(receipt.contains("Order FF791123"));
    assert!(receipt.contains("Spaghetti Carbonara"));
    assert!(receipt.contains("$29.98"));
    assert!(receipt.contains("Taxes (8%):"));
    assert!(receipt.contains("$43.85"));
    assert!(receipt.contains("Anytown, 12345"));
    assert!(receipt.contains("PayPal"));

    Ok(())
}

#[test]
fn empty_cart_cannot_enter_the_wizard() -> TestResult {
    let fixture = Fixture::from_set("anytown")?;
    let mut checkout = Checkout::new(Cart::new(fixture.currency()?));

    let Err(error) = checkout.advance() else {
        panic!("Expected the cart review gate to fail");
    };

    assert_eq!(error, CheckoutError::EmptyCart);
    assert_eq!(
        error.to_string(),
        "Please add items to your cart before proceeding."
    );
    assert_eq!(checkout.step(), CheckoutStep::CartReview);

    Ok(())
}

#[test]
fn address_gate_reports_every_missing_field() -> TestResult {
    let fixture = Fixture::from_set("anytown")?;
    let detail = fixture.restaurant("1")?;
    let Some(item) = detail.find_item("m1") else {
        panic!("Expected Garlic Bread on the menu");
    };

    let mut cart = Cart::new(fixture.currency()?);
    cart.add_item(item)?;

    let mut checkout = Checkout::new(cart);
    checkout.advance()?;

    let Err(CheckoutError::InvalidAddress(errors)) = checkout.advance() else {
        panic!("Expected the address gate to fail");
    };

    assert_eq!(errors.len(), 5, "Every field should be reported at once");
    assert_eq!(
        errors.message_for("full_name"),
        Some("Full name must be at least 2 characters.")
    );
    assert_eq!(errors.message_for("phone"), Some("Valid phone number is required."));

    Ok(())
}

#[test]
fn navigating_away_cancels_a_scheduled_confirmation() {
    let clock = ManualClock::default();
    let mut confirmation = DelayedFetch::schedule(&clock, CONFIRMATION_DELAY, "FF000001");

    confirmation.cancel();
    clock.advance(Duration::from_secs(5));

    assert_eq!(confirmation.poll(&clock), None);
    assert!(!confirmation.is_pending());
}
