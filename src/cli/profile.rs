use clap::Args;
use foodfleet::{fixtures::profile::ProfileData, receipt::render_table};
use tabled::builder::Builder;

use super::load_fixture;

/// Show the signed-in user's settings, saved addresses and order history.
#[derive(Debug, Args)]
pub(crate) struct ProfileArgs {
    /// Fixture set to load
    #[arg(short, long, default_value = "anytown")]
    fixture: String,
}

pub(crate) fn run(args: ProfileArgs) -> Result<(), String> {
    let fixture = load_fixture(&args.fixture)?;
    let profile = fixture.profile().map_err(|error| error.to_string())?;

    println!("Profile");
    println!("  Name: {}", profile.user.full_name);
    println!("  Email: {}", profile.user.email);
    println!("  Phone: {}", profile.user.phone);

    print_addresses(profile);
    print_order_history(profile);

    Ok(())
}

fn print_addresses(profile: &ProfileData) {
    println!("\nAddresses");

    if profile.addresses.is_empty() {
        println!("  No saved addresses.");
        return;
    }

    let mut builder = Builder::default();

    builder.push_record(["Label", "Address", "City", "Postal Code"]);

    for address in profile.addresses.iter() {
        builder.push_record([
            address.label.clone(),
            address.address_line1.clone(),
            address.city.clone(),
            address.postal_code.clone(),
        ]);
    }

    println!("{}", render_table(builder, &[], 0..0, vec![]));
}

fn print_order_history(profile: &ProfileData) {
    println!("Order History");

    if profile.order_history.is_empty() {
        println!("  No past orders.");
        return;
    }

    let mut builder = Builder::default();

    builder.push_record(["Order", "Date", "Restaurant", "Status", "Items", "Total"]);

    for order in &profile.order_history {
        let items = order
            .items
            .iter()
            .map(|item| format!("{} x{}", item.name, item.quantity))
            .collect::<Vec<_>>()
            .join(", ");

        builder.push_record([
            order.id.clone(),
            order.date.clone(),
            order.restaurant.clone(),
            order.status.clone(),
            items,
            order.total.to_string(),
        ]);
    }

    println!("{}", render_table(builder, &[], 5..6, vec![]));
}
