use clap::Args;
use foodfleet::{
    latency::LOOKUP_DELAY,
    menu::RestaurantDetail,
    receipt::{color_dark_grey, render_table},
};
use tabled::builder::Builder;

use super::{fetch_after, load_fixture};

/// Show one restaurant's details, menu and reviews.
#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    /// Fixture set to load
    #[arg(short, long, default_value = "anytown")]
    fixture: String,

    /// Restaurant identifier
    #[arg(long)]
    restaurant: String,
}

pub(crate) fn run(args: MenuArgs) -> Result<(), String> {
    let fixture = load_fixture(&args.fixture)?;

    let detail = fixture
        .restaurant(&args.restaurant)
        .map_err(|error| error.to_string())?
        .clone();

    let detail = fetch_after(LOOKUP_DELAY, detail);

    print_header(&detail);
    print_menu(&detail);
    print_reviews(&detail);

    Ok(())
}

fn print_header(detail: &RestaurantDetail) {
    let summary = &detail.summary;

    println!("{}", summary.name);

    println!(
        "Cuisines: {}",
        summary.cuisine_types.iter().collect::<Vec<_>>().join(", ")
    );

    if let Some(rating) = summary.rating {
        println!("Rating: {rating:.1} / 5");
    }

    if let Some(delivery_time) = &summary.delivery_time {
        println!("Delivery: {delivery_time}");
    }

    if let Some(address) = &detail.address {
        println!("Address: {address}");
    }

    if let Some(hours) = &detail.operating_hours {
        println!("Hours: {hours}");
    }
}

fn print_menu(detail: &RestaurantDetail) {
    if detail.sections.is_empty() {
        println!("\nNo menu published yet.");
        return;
    }

    let mut builder = Builder::default();
    let mut section_rows = Vec::new();
    let mut color_ops = Vec::new();
    let mut row = 1;

    builder.push_record(["Category", "Item", "Description", "Price"]);

    for section in &detail.sections {
        section_rows.push(row);

        for (position, item) in section.items.iter().enumerate() {
            // The category cell is only filled on the section's first row.
            let category = if position == 0 {
                section.category.as_str()
            } else {
                ""
            };

            builder.push_record([
                category.to_string(),
                item.name.clone(),
                item.description.clone().unwrap_or_default(),
                item.price.to_string(),
            ]);

            color_ops.push((row, 2, color_dark_grey()));
            row += 1;
        }
    }

    println!("\nMenu");
    println!("{}", render_table(builder, &section_rows, 3..4, color_ops));
}

fn print_reviews(detail: &RestaurantDetail) {
    if detail.reviews.is_empty() {
        return;
    }

    println!("Reviews");

    for review in &detail.reviews {
        println!(
            "  {} ({}/5) {}: {}",
            review.author, review.rating, review.date, review.comment
        );
    }
}
