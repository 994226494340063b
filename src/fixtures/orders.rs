//! Order Fixtures

use rusty_money::Money;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, parse_price},
    tracking::{Order, OrderItem},
};

/// Wrapper for orders in YAML
#[derive(Debug, Deserialize)]
pub struct OrdersFixture {
    /// Trackable orders
    pub orders: Vec<OrderFixture>,
}

/// Order Fixture
#[derive(Debug, Deserialize)]
pub struct OrderFixture {
    /// Order identifier
    pub id: String,

    /// Restaurant the order was placed with
    pub restaurant_name: String,

    /// Current status identifier
    pub status: String,

    /// Delivery estimate, free text
    pub estimated_delivery: String,

    /// Destination address
    pub delivery_address: String,

    /// Ordered items
    pub items: Vec<OrderItemFixture>,

    /// Order total (e.g., "30.99 USD")
    pub total: String,
}

/// Order Item Fixture
#[derive(Debug, Deserialize)]
pub struct OrderItemFixture {
    /// Item name as ordered
    pub name: String,

    /// Units ordered
    pub quantity: u32,

    /// Unit price (e.g., "14.99 USD")
    pub price: String,
}

impl TryFrom<OrderFixture> for Order {
    type Error = FixtureError;

    fn try_from(fixture: OrderFixture) -> Result<Self, Self::Error> {
        let items = fixture
            .items
            .into_iter()
            .map(OrderItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let (total_minor, currency) = parse_price(&fixture.total)?;

        Ok(Order {
            id: fixture.id,
            items,
            total_amount: Money::from_minor(total_minor, currency),
            estimated_delivery: fixture.estimated_delivery,
            delivery_address: fixture.delivery_address,
            current_status_id: fixture.status,
            restaurant_name: fixture.restaurant_name,
        })
    }
}

impl TryFrom<OrderItemFixture> for OrderItem {
    type Error = FixtureError;

    fn try_from(fixture: OrderItemFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(OrderItem {
            name: fixture.name,
            quantity: fixture.quantity,
            price: Money::from_minor(minor_units, currency),
        })
    }
}
