use std::{fmt::Write, io};

use clap::Args;
use foodfleet::{
    cart::Cart,
    checkout::{
        Checkout, CheckoutError, CheckoutStep,
        form::{DeliveryAddressForm, PaymentMethod},
    },
    clock::SystemClock,
    latency::CONFIRMATION_DELAY,
    receipt::{render_table, write_order_receipt, write_totals_block},
};
use tabled::builder::Builder;

use super::{fetch_after, load_fixture};

/// Build a cart and walk it through the four-step checkout wizard.
#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Fixture set to load
    #[arg(short, long, default_value = "anytown")]
    fixture: String,

    /// Restaurant to order from
    #[arg(long)]
    restaurant: String,

    /// Menu item to add; repeatable
    #[arg(long = "item", value_name = "ITEM_ID[:QTY]")]
    items: Vec<String>,

    /// Recipient full name
    #[arg(long)]
    name: String,

    /// Street address
    #[arg(long)]
    address: String,

    /// City
    #[arg(long)]
    city: String,

    /// Postal code
    #[arg(long)]
    postal: String,

    /// Contact phone number
    #[arg(long)]
    phone: String,

    /// Payment method: creditCard, paypal or cod
    #[arg(long, default_value = "creditCard")]
    payment: PaymentMethod,

    /// Card number, held as typed and never validated
    #[arg(long)]
    card_number: Option<String>,

    /// Card expiry, held as typed
    #[arg(long)]
    expiry: Option<String>,

    /// Card security code, held as typed
    #[arg(long)]
    cvv: Option<String>,

    /// Promo code to record with the order
    #[arg(long)]
    promo: Option<String>,
}

pub(crate) fn run(args: CheckoutArgs) -> Result<(), String> {
    let fixture = load_fixture(&args.fixture)?;
    let currency = fixture.currency().map_err(|error| error.to_string())?;

    let mut cart = Cart::new(currency);

    for spec in &args.items {
        let (item_id, quantity) = parse_item_spec(spec)?;

        let item = fixture
            .menu_item(&args.restaurant, item_id)
            .map_err(|error| error.to_string())?;

        cart.add_item(item).map_err(|error| error.to_string())?;

        if let Some(quantity) = quantity {
            cart.set_quantity(item_id, quantity);
        }
    }

    let mut checkout = Checkout::new(cart);

    checkout.form_mut().address = DeliveryAddressForm {
        full_name: args.name,
        address_line1: args.address,
        city: args.city,
        postal_code: args.postal,
        phone: args.phone,
    };

    checkout.form_mut().payment_method = args.payment;
    checkout.form_mut().card_number = args.card_number;
    checkout.form_mut().expiry_date = args.expiry;
    checkout.form_mut().cvv = args.cvv;
    checkout.form_mut().promo_code = args.promo;

    print_step_banner(checkout.step());
    print_cart_review(&checkout)?;
    advance(&mut checkout)?;

    print_step_banner(checkout.step());
    print_delivery_address(&checkout);
    advance(&mut checkout)?;

    print_step_banner(checkout.step());
    print_payment(&checkout);
    advance(&mut checkout)?;

    print_step_banner(checkout.step());
    print_confirmation(&checkout)?;

    println!("\nPlacing your order...");
    fetch_after(CONFIRMATION_DELAY, ());

    let order = checkout
        .submit(&SystemClock)
        .map_err(|error| gate_failure(&error))?;

    println!("Order Placed!");
    println!("Your order has been successfully placed. You will be redirected to tracking.");

    write_order_receipt(io::stdout(), &order).map_err(|error| error.to_string())?;

    println!("\nTrack it with: foodfleet track --order {}", order.id);

    Ok(())
}

/// Parse an `ITEM_ID` or `ITEM_ID:QTY` argument.
fn parse_item_spec(spec: &str) -> Result<(&str, Option<u32>), String> {
    match spec.split_once(':') {
        None => Ok((spec, None)),
        Some((item_id, quantity)) => {
            let quantity: u32 = quantity
                .parse()
                .map_err(|_err| format!("invalid quantity in {spec:?}"))?;

            Ok((item_id, Some(quantity)))
        }
    }
}

fn advance(checkout: &mut Checkout) -> Result<(), String> {
    checkout.advance().map_err(|error| gate_failure(&error))?;

    Ok(())
}

/// Format a wizard failure as a titled notice with any per-field lines.
fn gate_failure(error: &CheckoutError) -> String {
    match error {
        CheckoutError::EmptyCart => format!("Empty Cart: {error}"),
        CheckoutError::InvalidAddress(fields) => {
            let mut message = format!("Invalid Address: {error}");

            for field in fields.iter() {
                _ = write!(message, "\n  {}: {}", field.field, field.message);
            }

            message
        }
        CheckoutError::InvalidForm(fields) => {
            let mut message = error.to_string();

            for field in fields.iter() {
                _ = write!(message, "\n  {}: {}", field.field, field.message);
            }

            message
        }
        _ => error.to_string(),
    }
}

fn print_step_banner(step: CheckoutStep) {
    println!("\nStep {} of 4: {}", step.number(), step.title());
    println!("{}", step_blurb(step));
}

fn step_blurb(step: CheckoutStep) -> &'static str {
    match step {
        CheckoutStep::CartReview => "Check your items before proceeding.",
        CheckoutStep::DeliveryAddress => "Where should we send your order?",
        CheckoutStep::Payment => "Choose how you'd like to pay.",
        CheckoutStep::Confirmation => "Please review all details before placing your order.",
    }
}

fn print_cart_review(checkout: &Checkout) -> Result<(), String> {
    if checkout.cart().is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Item", "Qty", "Unit Price", "Line Total"]);

    for line in checkout.cart().iter() {
        builder.push_record([
            line.name().to_string(),
            line.quantity().to_string(),
            line.unit_price().to_string(),
            line.line_total()
                .map_err(|error| error.to_string())?
                .to_string(),
        ]);
    }

    println!("{}", render_table(builder, &[], 1..4, vec![]));

    let totals = checkout.totals().map_err(|error| error.to_string())?;

    write_totals_block(io::stdout(), &totals).map_err(|error| error.to_string())
}

fn print_delivery_address(checkout: &Checkout) {
    let address = &checkout.form().address;

    println!("  Name: {}", address.full_name);
    println!("  Address: {}", address.address_line1);
    println!("  City: {}", address.city);
    println!("  Postal Code: {}", address.postal_code);
    println!("  Phone: {}", address.phone);
}

fn print_payment(checkout: &Checkout) {
    println!("  {}", checkout.form().payment_method.label());

    if let Some(promo) = &checkout.form().promo_code {
        println!("  Promo code: {promo}");
    }
}

fn print_confirmation(checkout: &Checkout) -> Result<(), String> {
    println!("Items:");

    for line in checkout.cart().iter() {
        println!(
            "  {} (x{}) - {}",
            line.name(),
            line.quantity(),
            line.line_total().map_err(|error| error.to_string())?
        );
    }

    let address = &checkout.form().address;

    println!("Delivery Address:");
    println!("  {}", address.full_name);
    println!("  {}", address.address_line1);
    println!("  {}, {}", address.city, address.postal_code);
    println!("  Phone: {}", address.phone);
    println!("Payment Method:");
    println!("  {}", checkout.form().payment_method.label());

    let totals = checkout.totals().map_err(|error| error.to_string())?;

    println!("Total: {}", totals.total());

    Ok(())
}
