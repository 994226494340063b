use std::{thread, time::Duration};

use clap::{Parser, Subcommand};
use foodfleet::{clock::SystemClock, fixtures::Fixture, latency::DelayedFetch};

mod checkout;
mod menu;
mod profile;
mod restaurants;
mod track;

#[derive(Debug, Parser)]
#[command(name = "foodfleet", about = "FoodFleet storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Restaurants(restaurants::RestaurantsArgs),
    Menu(menu::MenuArgs),
    Checkout(checkout::CheckoutArgs),
    Track(track::TrackArgs),
    Profile(profile::ProfileArgs),
}

impl Cli {
    pub(crate) fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Restaurants(args) => restaurants::run(args),
            Commands::Menu(args) => menu::run(args),
            Commands::Checkout(args) => checkout::run(args),
            Commands::Track(args) => track::run(args),
            Commands::Profile(args) => profile::run(args),
        }
    }
}

/// How often a pending fetch is re-polled while its delay runs down.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Resolve a simulated fetch by polling it until its delay has elapsed.
pub(crate) fn fetch_after<T>(delay: Duration, value: T) -> T {
    let clock = SystemClock;
    let mut fetch = DelayedFetch::schedule(&clock, delay, value);

    loop {
        if let Some(value) = fetch.poll(&clock) {
            return value;
        }

        thread::sleep(POLL_INTERVAL);
    }
}

/// Load a fixture set by name, mapping the failure for terminal display.
pub(crate) fn load_fixture(name: &str) -> Result<Fixture, String> {
    Fixture::from_set(name).map_err(|error| format!("failed to load fixture set {name:?}: {error}"))
}
