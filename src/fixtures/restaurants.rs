//! Restaurant Fixtures

use rusty_money::Money;
use serde::Deserialize;

use crate::{
    catalog::{CuisineSet, RestaurantSummary},
    fixtures::{FixtureError, parse_price},
    menu::{MenuItem, MenuSection, RestaurantDetail, Review},
};

/// Wrapper for restaurants in YAML
#[derive(Debug, Deserialize)]
pub struct RestaurantsFixture {
    /// Restaurant records in catalog order
    pub restaurants: Vec<RestaurantFixture>,
}

/// Restaurant Fixture
#[derive(Debug, Deserialize)]
pub struct RestaurantFixture {
    /// Catalog identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Hero image location
    #[serde(default)]
    pub image_url: Option<String>,

    /// Cuisine labels
    #[serde(default)]
    pub cuisine_types: Vec<String>,

    /// Average review rating
    #[serde(default)]
    pub rating: Option<f32>,

    /// Expected delivery window
    #[serde(default)]
    pub delivery_time: Option<String>,

    /// Street address
    #[serde(default)]
    pub address: Option<String>,

    /// Opening hours
    #[serde(default)]
    pub operating_hours: Option<String>,

    /// Menu sections in display order
    #[serde(default)]
    pub menu: Vec<MenuSectionFixture>,

    /// Published reviews
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// Menu Section Fixture
#[derive(Debug, Deserialize)]
pub struct MenuSectionFixture {
    /// Category heading
    pub category: String,

    /// Items under the heading
    pub items: Vec<MenuItemFixture>,
}

/// Menu Item Fixture
#[derive(Debug, Deserialize)]
pub struct MenuItemFixture {
    /// Menu identifier, unique within the restaurant
    pub id: String,

    /// Display name
    pub name: String,

    /// Short description
    #[serde(default)]
    pub description: Option<String>,

    /// Item price (e.g., "14.99 USD")
    pub price: String,

    /// Photo location
    #[serde(default)]
    pub image_url: Option<String>,
}

impl TryFrom<RestaurantFixture> for RestaurantDetail {
    type Error = FixtureError;

    fn try_from(fixture: RestaurantFixture) -> Result<Self, Self::Error> {
        let summary = RestaurantSummary {
            id: fixture.id,
            name: fixture.name,
            image_url: fixture.image_url,
            cuisine_types: CuisineSet::from(fixture.cuisine_types),
            rating: fixture.rating,
            delivery_time: fixture.delivery_time,
        };

        let sections = fixture
            .menu
            .into_iter()
            .map(MenuSection::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RestaurantDetail {
            summary,
            address: fixture.address,
            operating_hours: fixture.operating_hours,
            sections,
            reviews: fixture.reviews,
        })
    }
}

impl TryFrom<MenuSectionFixture> for MenuSection {
    type Error = FixtureError;

    fn try_from(fixture: MenuSectionFixture) -> Result<Self, Self::Error> {
        let category = fixture.category;

        let items = fixture
            .items
            .into_iter()
            .map(|item| item.into_menu_item(&category))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MenuSection { category, items })
    }
}

impl MenuItemFixture {
    /// Build a menu item listed under `category`, parsing the price string
    ///
    /// # Errors
    ///
    /// Returns an error if the price string cannot be parsed.
    pub fn into_menu_item(self, category: &str) -> Result<MenuItem, FixtureError> {
        let (minor_units, currency) = parse_price(&self.price)?;

        Ok(MenuItem {
            id: self.id,
            name: self.name,
            description: self.description,
            price: Money::from_minor(minor_units, currency),
            image_url: self.image_url,
            category: category.to_string(),
        })
    }
}
