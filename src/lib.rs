//! FoodFleet
//!
//! FoodFleet is a food-ordering storefront: a browsable restaurant catalog,
//! per-restaurant menus, a cart with derived totals, a four-step checkout
//! wizard, and order tracking against a fixed fulfilment sequence. Data comes
//! from YAML fixture sets; network latency is simulated with explicit,
//! cancellable delays.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod clock;
pub mod fixtures;
pub mod latency;
pub mod menu;
pub mod pricing;
pub mod profile;
pub mod receipt;
pub mod routes;
pub mod tracking;
