//! Cart
//!
//! The in-progress order: one line per menu item with a quantity, held
//! against a fixed currency. The mutating operations are total functions over
//! the current line set; the only gate is currency safety when a line enters
//! the cart. Adding an item that is already present merges into the existing
//! line rather than appending a duplicate, so `item_id` stays a unique key.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::menu::MenuItem;

/// Errors related to cart construction or totals.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// An item's currency differs from the cart currency (item id, item currency, cart currency).
    #[error("Item {0} is priced in {1}, but the cart holds {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// A money amount exceeded the representable range of minor units.
    #[error("money amount cannot be represented in minor units")]
    AmountNotRepresentable,
}

/// One (menu item, quantity) pairing in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    item_id: String,
    name: String,
    unit_price: Money<'static, Currency>,
    quantity: u32,
}

impl CartLine {
    /// Create a line directly.
    #[must_use]
    pub fn new(
        item_id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money<'static, Currency>,
        quantity: u32,
    ) -> Self {
        CartLine {
            item_id: item_id.into(),
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Create a quantity-1 line from a menu item.
    #[must_use]
    pub fn from_item(item: &MenuItem) -> Self {
        CartLine {
            item_id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.price,
            quantity: 1,
        }
    }

    /// The menu item this line refers to.
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// Display name captured when the line was added.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price per unit.
    #[must_use]
    pub fn unit_price(&self) -> Money<'static, Currency> {
        self.unit_price
    }

    /// Units ordered; always at least one while the line exists.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `unit_price × quantity`, in exact minor units.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::AmountNotRepresentable`] if the product overflows
    /// `i64` minor units.
    pub fn line_total(&self) -> Result<Money<'static, Currency>, CartError> {
        let minor = self
            .unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or(CartError::AmountNotRepresentable)?;

        Ok(Money::from_minor(minor, self.unit_price.currency()))
    }
}

/// Cart
#[derive(Debug)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Create a cart from existing lines.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::CurrencyMismatch`] if any line is priced in a
    /// different currency.
    pub fn with_lines(
        lines: impl Into<Vec<CartLine>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let lines = lines.into();

        lines.iter().try_for_each(|line| {
            let line_currency = line.unit_price.currency();

            if line_currency == currency {
                Ok(())
            } else {
                Err(CartError::CurrencyMismatch(
                    line.item_id.clone(),
                    line_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ))
            }
        })?;

        Ok(Cart { lines, currency })
    }

    /// Add one unit of a menu item.
    ///
    /// Merges into the existing line when the item is already in the cart;
    /// otherwise appends a new quantity-1 line. Line order is insertion
    /// order, and merging never reorders.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::CurrencyMismatch`] if the item is priced in a
    /// different currency than the cart.
    pub fn add_item(&mut self, item: &MenuItem) -> Result<(), CartError> {
        let item_currency = item.price.currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                item.id.clone(),
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.item_id == item.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine::from_item(item));
        }

        Ok(())
    }

    /// Replace a line's quantity; a quantity of zero removes the line.
    ///
    /// A line id not present in the cart is a no-op.
    pub fn set_quantity(&mut self, item_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(item_id);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.item_id == item_id) {
            line.quantity = quantity;
        }
    }

    /// Delete a line unconditionally; a line id not present is a no-op.
    pub fn remove_item(&mut self, item_id: &str) {
        self.lines.retain(|line| line.item_id != item_id);
    }

    /// Find a line by its item id.
    pub fn line(&self, item_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item_id == item_id)
    }

    /// Calculate the cart subtotal.
    ///
    /// An empty cart has a zero subtotal in the cart currency.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::AmountNotRepresentable`] if any line total or
    /// the running sum overflows `i64` minor units.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, CartError> {
        let minor = self.lines.iter().try_fold(0_i64, |acc, line| {
            let line_minor = line.line_total()?.to_minor_units();

            acc.checked_add(line_minor)
                .ok_or(CartError::AmountNotRepresentable)
        })?;

        Ok(Money::from_minor(minor, self.currency))
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across every line.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
