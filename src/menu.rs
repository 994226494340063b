//! Restaurant detail and menu.
//!
//! The detail page's data: the catalog summary plus address and opening
//! hours, the menu grouped by category, and published reviews. Menu items
//! carry real [`Money`] prices; the raw fixture price strings are parsed at
//! load time by the fixtures module.

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use slotmap::new_key_type;

use crate::catalog::RestaurantSummary;

new_key_type! {
    /// Restaurant Key
    pub struct RestaurantKey;
}

/// One orderable dish on a restaurant's menu.
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Menu identifier, unique within the restaurant.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Short description, when the menu carries one.
    pub description: Option<String>,

    /// Unit price.
    pub price: Money<'static, Currency>,

    /// Photo location.
    pub image_url: Option<String>,

    /// The category heading the item is listed under.
    pub category: String,
}

/// A menu category and its items, in menu order.
#[derive(Debug, Clone)]
pub struct MenuSection {
    /// Category heading.
    pub category: String,

    /// Items listed under the heading.
    pub items: Vec<MenuItem>,
}

/// A diner's published review of a restaurant.
#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    /// Reviewer display name.
    pub author: String,

    /// Star rating out of five.
    pub rating: u8,

    /// Free-text comment.
    pub comment: String,

    /// Publication date, free text.
    pub date: String,
}

/// Everything the restaurant page shows.
#[derive(Debug, Clone)]
pub struct RestaurantDetail {
    /// The summary as listed in the catalog.
    pub summary: RestaurantSummary,

    /// Street address, free text.
    pub address: Option<String>,

    /// Opening hours, free text.
    pub operating_hours: Option<String>,

    /// Menu grouped by category, preserving menu order.
    pub sections: Vec<MenuSection>,

    /// Published reviews, newest first as supplied.
    pub reviews: Vec<Review>,
}

impl RestaurantDetail {
    /// Find a menu item by id across every section.
    pub fn find_item(&self, item_id: &str) -> Option<&MenuItem> {
        self.sections
            .iter()
            .flat_map(|section| section.items.iter())
            .find(|item| item.id == item_id)
    }

    /// Total number of items across every section.
    pub fn item_count(&self) -> usize {
        self.sections
            .iter()
            .map(|section| section.items.len())
            .sum()
    }
}
