use clap::Args;
use decimal_percentage::Percentage;
use foodfleet::{
    fixtures::FixtureError,
    latency::LOOKUP_DELAY,
    receipt::render_table,
    tracking::{Order, StatusProjection, TrackingError},
};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use tabled::builder::Builder;

use super::{fetch_after, load_fixture};

/// Track an order through the fulfilment sequence.
#[derive(Debug, Args)]
pub(crate) struct TrackArgs {
    /// Fixture set to load
    #[arg(short, long, default_value = "anytown")]
    fixture: String,

    /// Order identifier, e.g. FF123456
    #[arg(long)]
    order: String,
}

pub(crate) fn run(args: TrackArgs) -> Result<(), String> {
    let fixture = load_fixture(&args.fixture)?;

    fetch_after(LOOKUP_DELAY, ());

    let order = fixture.order(&args.order).map_err(|error| match error {
        FixtureError::OrderNotFound(id) => TrackingError::OrderNotFound(id).to_string(),
        other => other.to_string(),
    })?;

    let projection = order.project().map_err(|error| error.to_string())?;

    print_status(order, projection);
    print_items(order);

    Ok(())
}

fn print_status(order: &Order, projection: StatusProjection) {
    println!("Order Tracking");
    println!("Order ID: {}", order.id);
    println!("Restaurant: {}", order.restaurant_name);
    println!("Estimated Delivery: {}", order.estimated_delivery);
    println!("Deliver to: {}", order.delivery_address);
    println!();

    for step in projection.completed() {
        println!("  [x] {}", step.label);
    }

    let active_marker = if projection.is_delivered() { "[x]" } else { "[>]" };

    println!(
        "  \x1b[1m{} {}\x1b[0m",
        active_marker,
        projection.active().label
    );

    for step in projection.pending() {
        println!("  [ ] {}", step.label);
    }

    if projection.progress_visible() {
        println!("\nProgress: {}%", percent_points(projection.progress()));
    }
}

fn print_items(order: &Order) {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Qty", "Price"]);

    for item in &order.items {
        builder.push_record([
            item.name.clone(),
            item.quantity.to_string(),
            item.price.to_string(),
        ]);
    }

    println!("{}", render_table(builder, &[], 1..3, vec![]));
    println!("Total: {}", order.total_amount);
}

/// Convert a fractional percentage to whole percent points for display.
fn percent_points(progress: Percentage) -> Decimal {
    ((progress * Decimal::ONE) * Decimal::from_i64(100).unwrap_or(Decimal::ZERO)).normalize()
}
