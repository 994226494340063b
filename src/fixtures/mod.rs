//! Fixtures
//!
//! YAML-backed data sets standing in for the delivery platform's backend.
//! A set is three files under the base path, `restaurants/<name>.yml`,
//! `orders/<name>.yml`, and `profile/<name>.yml`, loaded together by
//! [`Fixture::from_set`]. Every price in one set must share a single
//! currency.

use std::{fs, path::PathBuf};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::iso::{Currency, EUR, GBP, USD};
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    catalog::RestaurantSummary,
    fixtures::{
        orders::OrdersFixture,
        profile::{ProfileData, ProfileFixture},
        restaurants::RestaurantsFixture,
    },
    menu::{MenuItem, RestaurantDetail, RestaurantKey},
    tracking::Order,
};

pub mod orders;
pub mod profile;
pub mod restaurants;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch within a fixture set
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Restaurant not found
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    /// Menu item not found
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    /// Order not found
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// No prices loaded yet
    #[error("No prices loaded yet; currency unknown")]
    NoCurrency,

    /// No profile loaded
    #[error("No profile loaded")]
    NoProfile,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// `SlotMap` storing restaurant details with generated keys
    restaurant_meta: SlotMap<RestaurantKey, RestaurantDetail>,

    /// String id -> `SlotMap` key mappings for lookups
    restaurant_keys: FxHashMap<String, RestaurantKey>,

    /// Catalog summaries in fixture order
    catalog: Vec<RestaurantSummary>,

    /// Trackable orders
    orders: Vec<Order>,

    /// Profile data, once loaded
    profile: Option<ProfileData>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            restaurant_meta: SlotMap::with_key(),
            restaurant_keys: FxHashMap::default(),
            catalog: Vec::new(),
            orders: Vec::new(),
            profile: None,
            currency: None,
        }
    }

    /// Load restaurants from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are
    /// currency mismatches.
    pub fn load_restaurants(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self
            .base_path
            .join("restaurants")
            .join(format!("{name}.yml"));

        let contents = fs::read_to_string(&file_path)?;
        let fixture: RestaurantsFixture = serde_norway::from_str(&contents)?;

        for record in fixture.restaurants {
            // Parse every menu price first to validate the set currency
            for section in &record.menu {
                for item in &section.items {
                    let (_minor_units, currency) = parse_price(&item.price)?;

                    self.note_currency(currency)?;
                }
            }

            let id = record.id.clone();
            let detail: RestaurantDetail = record.try_into()?;

            self.catalog.push(detail.summary.clone());

            let key = self.restaurant_meta.insert(detail);

            self.restaurant_keys.insert(id, key);
        }

        Ok(self)
    }

    /// Load trackable orders from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are
    /// currency mismatches.
    pub fn load_orders(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("orders").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: OrdersFixture = serde_norway::from_str(&contents)?;

        for record in fixture.orders {
            for item in &record.items {
                let (_minor_units, currency) = parse_price(&item.price)?;

                self.note_currency(currency)?;
            }

            let (_total_minor, currency) = parse_price(&record.total)?;

            self.note_currency(currency)?;
            self.orders.push(record.try_into()?);
        }

        Ok(self)
    }

    /// Load the profile document from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are
    /// currency mismatches.
    pub fn load_profile(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("profile").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProfileFixture = serde_norway::from_str(&contents)?;

        for record in &fixture.order_history {
            let (_total_minor, currency) = parse_price(&record.total)?;

            self.note_currency(currency)?;
        }

        self.profile = Some(fixture.try_into()?);

        Ok(self)
    }

    /// Load a complete fixture set (restaurants, orders, and profile with
    /// the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_restaurants(name)?
            .load_orders(name)?
            .load_profile(name)?;

        Ok(fixture)
    }

    /// Get the catalog summaries in fixture order
    pub fn catalog(&self) -> &[RestaurantSummary] {
        &self.catalog
    }

    /// Get a restaurant's detail by its string id
    ///
    /// # Errors
    ///
    /// Returns an error if the restaurant is not found.
    pub fn restaurant(&self, id: &str) -> Result<&RestaurantDetail, FixtureError> {
        let key = self
            .restaurant_keys
            .get(id)
            .ok_or_else(|| FixtureError::RestaurantNotFound(id.to_string()))?;

        self.restaurant_meta
            .get(*key)
            .ok_or_else(|| FixtureError::RestaurantNotFound(id.to_string()))
    }

    /// Get a menu item from a restaurant's menu
    ///
    /// # Errors
    ///
    /// Returns an error if the restaurant or the menu item is not found.
    pub fn menu_item(&self, restaurant_id: &str, item_id: &str) -> Result<&MenuItem, FixtureError> {
        self.restaurant(restaurant_id)?
            .find_item(item_id)
            .ok_or_else(|| FixtureError::MenuItemNotFound(item_id.to_string()))
    }

    /// Get all trackable orders
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Get a trackable order by its id
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found.
    pub fn order(&self, id: &str) -> Result<&Order, FixtureError> {
        self.orders
            .iter()
            .find(|order| order.id == id)
            .ok_or_else(|| FixtureError::OrderNotFound(id.to_string()))
    }

    /// Get the profile data
    ///
    /// # Errors
    ///
    /// Returns an error if no profile has been loaded yet.
    pub fn profile(&self) -> Result<&ProfileData, FixtureError> {
        self.profile.as_ref().ok_or(FixtureError::NoProfile)
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no prices have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    /// Record a price's currency, rejecting a mismatch with the set currency
    fn note_currency(&mut self, currency: &'static Currency) -> Result<(), FixtureError> {
        match self.currency {
            Some(existing) if existing != currency => Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            )),
            Some(_) => Ok(()),
            None => {
                self.currency = Some(currency);

                Ok(())
            }
        }
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse price string (e.g., "14.99 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "USD" => USD,
        "GBP" => GBP,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}
