use clap::Args;
use foodfleet::{
    catalog::{CatalogBrowse, all_cuisines},
    latency::CATALOG_DELAY,
    receipt::{color_dark_grey, render_table},
};
use tabled::builder::Builder;

use super::{fetch_after, load_fixture};

/// Browse the restaurant catalog, with optional search and cuisine filters.
#[derive(Debug, Args)]
pub(crate) struct RestaurantsArgs {
    /// Fixture set to load
    #[arg(short, long, default_value = "anytown")]
    fixture: String,

    /// Case-insensitive name search
    #[arg(long)]
    search: Option<String>,

    /// Show only restaurants advertising this cuisine
    #[arg(long)]
    cuisine: Option<String>,
}

pub(crate) fn run(args: RestaurantsArgs) -> Result<(), String> {
    let fixture = load_fixture(&args.fixture)?;
    let summaries = fetch_after(CATALOG_DELAY, fixture.catalog().to_vec());

    let mut browse = CatalogBrowse::new();

    if let Some(search) = &args.search {
        browse.set_search(search);
    }

    if let Some(cuisine) = &args.cuisine {
        browse.toggle_cuisine(cuisine);
    }

    println!("Find Your Next Meal");
    println!("Discover amazing restaurants near you.");
    println!();

    let cuisines = all_cuisines(&summaries);
    let mut chips = vec!["All Restaurants"];
    chips.extend(cuisines.iter());

    println!("Cuisines: {}", chips.join(" | "));
    println!();

    let heading = browse.selected_cuisine().map_or_else(
        || "All Restaurants".to_string(),
        |cuisine| format!("{cuisine} Restaurants"),
    );

    println!("{heading}");

    let visible = browse.visible(&summaries);

    if visible.is_empty() {
        println!("No restaurants found matching your criteria.");
        return Ok(());
    }

    let mut builder = Builder::default();
    let mut color_ops = Vec::new();

    builder.push_record(["Name", "Cuisines", "Rating", "Delivery Time"]);

    for (row, restaurant) in visible.iter().enumerate() {
        builder.push_record([
            restaurant.name.clone(),
            restaurant
                .cuisine_types
                .iter()
                .collect::<Vec<_>>()
                .join(", "),
            restaurant
                .rating
                .map_or_else(|| "-".to_string(), |rating| format!("{rating:.1}")),
            restaurant
                .delivery_time
                .clone()
                .unwrap_or_else(|| "-".to_string()),
        ]);

        color_ops.push((row + 1, 1, color_dark_grey()));
    }

    println!("{}", render_table(builder, &[], 2..3, color_ops));

    Ok(())
}
