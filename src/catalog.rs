//! Restaurant catalog.
//!
//! Summaries of the restaurants available for browsing, the cuisine-type sets
//! they advertise, and the browse state (search term plus optional cuisine
//! selection) from which the visible subset is derived.

use serde::Deserialize;
use smallvec::SmallVec;

/// A sorted, deduplicated set of cuisine labels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct CuisineSet {
    cuisines: SmallVec<[String; 4]>,
}

impl CuisineSet {
    /// Create a cuisine set, sorting and deduplicating the labels.
    #[must_use]
    pub fn new(cuisines: SmallVec<[String; 4]>) -> Self {
        let mut set = Self { cuisines };

        set.cuisines.sort();
        set.cuisines.dedup();

        set
    }

    /// Create a cuisine set from string slices.
    pub fn from_strs(cuisines: &[&str]) -> Self {
        Self::new(
            cuisines
                .iter()
                .map(ToString::to_string)
                .collect::<SmallVec<[String; 4]>>(),
        )
    }

    /// Exact membership test.
    pub fn contains(&self, cuisine: &str) -> bool {
        self.cuisines
            .binary_search_by(|probe| probe.as_str().cmp(cuisine))
            .is_ok()
    }

    /// Iterate over the labels in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cuisines.iter().map(String::as_str)
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.cuisines.len()
    }

    /// Whether the set has no labels.
    pub fn is_empty(&self) -> bool {
        self.cuisines.is_empty()
    }
}

impl From<Vec<String>> for CuisineSet {
    fn from(cuisines: Vec<String>) -> Self {
        Self::new(cuisines.into_iter().collect())
    }
}

/// One restaurant as listed on the catalog page.
#[derive(Debug, Clone, Deserialize)]
pub struct RestaurantSummary {
    /// Opaque catalog identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Hero image location.
    #[serde(default)]
    pub image_url: Option<String>,

    /// Cuisine labels the catalog filter matches against.
    pub cuisine_types: CuisineSet,

    /// Average review rating, when the catalog carries one.
    #[serde(default)]
    pub rating: Option<f32>,

    /// Expected delivery window, free text.
    #[serde(default)]
    pub delivery_time: Option<String>,
}

/// Filter restaurants by name substring and cuisine membership.
///
/// Name matching is case-insensitive; cuisine matching is exact membership in
/// the restaurant's cuisine-type set. Both filters apply conjunctively. An
/// empty `search_term` disables text filtering and a `None` cuisine disables
/// cuisine filtering, so the empty browse state returns the whole catalog.
#[must_use]
pub fn filter_restaurants<'a>(
    restaurants: &'a [RestaurantSummary],
    search_term: &str,
    selected_cuisine: Option<&str>,
) -> Vec<&'a RestaurantSummary> {
    let needle = search_term.to_lowercase();

    restaurants
        .iter()
        .filter(|restaurant| {
            let matches_search =
                needle.is_empty() || restaurant.name.to_lowercase().contains(&needle);

            let matches_cuisine =
                selected_cuisine.is_none_or(|cuisine| restaurant.cuisine_types.contains(cuisine));

            matches_search && matches_cuisine
        })
        .collect()
}

/// Every cuisine label appearing anywhere in `restaurants`, deduplicated.
///
/// This is the source for the cuisine chip row on the catalog page.
#[must_use]
pub fn all_cuisines(restaurants: &[RestaurantSummary]) -> CuisineSet {
    CuisineSet::new(
        restaurants
            .iter()
            .flat_map(|restaurant| restaurant.cuisine_types.iter())
            .map(ToString::to_string)
            .collect(),
    )
}

/// Browse state for the catalog page.
///
/// Holds the search term and the optional cuisine selection; the visible
/// subset is derived on demand rather than stored, so it can never go stale.
#[derive(Debug, Default, Clone)]
pub struct CatalogBrowse {
    search_term: String,
    selected_cuisine: Option<String>,
}

impl CatalogBrowse {
    /// Start with no search term and no cuisine selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the free-text search term.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Select a cuisine, or clear the selection when `cuisine` is the one
    /// already selected.
    pub fn toggle_cuisine(&mut self, cuisine: &str) {
        if self.selected_cuisine.as_deref() == Some(cuisine) {
            self.selected_cuisine = None;
        } else {
            self.selected_cuisine = Some(cuisine.to_string());
        }
    }

    /// Clear the cuisine selection unconditionally.
    pub fn clear_cuisine(&mut self) {
        self.selected_cuisine = None;
    }

    /// The current search term.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// The currently selected cuisine, if any.
    pub fn selected_cuisine(&self) -> Option<&str> {
        self.selected_cuisine.as_deref()
    }

    /// Apply both filters to `restaurants`, preserving catalog order.
    #[must_use]
    pub fn visible<'a>(&self, restaurants: &'a [RestaurantSummary]) -> Vec<&'a RestaurantSummary> {
        filter_restaurants(
            restaurants,
            &self.search_term,
            self.selected_cuisine.as_deref(),
        )
    }
}
