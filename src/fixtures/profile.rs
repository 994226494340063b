//! Profile Fixtures

use rusty_money::Money;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, parse_price},
    profile::{AddressBook, PastOrder, PastOrderItem, SavedAddress, UserProfile},
};

/// Wrapper for the profile document in YAML
#[derive(Debug, Deserialize)]
pub struct ProfileFixture {
    /// The signed-in user's settings
    pub user: UserProfile,

    /// Saved addresses in book order
    #[serde(default)]
    pub addresses: Vec<SavedAddress>,

    /// Completed orders, most recent first
    #[serde(default)]
    pub order_history: Vec<PastOrderFixture>,
}

/// Past Order Fixture
#[derive(Debug, Deserialize)]
pub struct PastOrderFixture {
    /// Order identifier
    pub id: String,

    /// Order date, free text
    pub date: String,

    /// Total as charged (e.g., "45.50 USD")
    pub total: String,

    /// Final status label
    pub status: String,

    /// Restaurant ordered from
    pub restaurant: String,

    /// Item summaries
    #[serde(default)]
    pub items: Vec<PastOrderItem>,
}

/// Everything the profile screen needs from one fixture set.
#[derive(Debug, Clone)]
pub struct ProfileData {
    /// The signed-in user's settings.
    pub user: UserProfile,

    /// Saved addresses in book order.
    pub addresses: AddressBook,

    /// Completed orders, most recent first.
    pub order_history: Vec<PastOrder>,
}

impl TryFrom<ProfileFixture> for ProfileData {
    type Error = FixtureError;

    fn try_from(fixture: ProfileFixture) -> Result<Self, Self::Error> {
        let order_history = fixture
            .order_history
            .into_iter()
            .map(PastOrder::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ProfileData {
            user: fixture.user,
            addresses: AddressBook::with_addresses(fixture.addresses),
            order_history,
        })
    }
}

impl TryFrom<PastOrderFixture> for PastOrder {
    type Error = FixtureError;

    fn try_from(fixture: PastOrderFixture) -> Result<Self, Self::Error> {
        let (total_minor, currency) = parse_price(&fixture.total)?;

        Ok(PastOrder {
            id: fixture.id,
            date: fixture.date,
            total: Money::from_minor(total_minor, currency),
            status: fixture.status,
            restaurant: fixture.restaurant,
            items: fixture.items,
        })
    }
}
