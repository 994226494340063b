//! Order totals
//!
//! The derived checkout amounts: an 8% tax on the subtotal and a flat
//! delivery fee charged whenever the cart is non-empty. Totals are computed
//! fresh from the cart on every use; nothing here caches.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::cart::{Cart, CartError};

/// Flat delivery fee in minor units, charged whenever the subtotal is
/// positive.
pub const DELIVERY_FEE_MINOR: i64 = 500;

/// Fractional sales-tax rate applied to the subtotal.
#[must_use]
pub fn tax_rate() -> Percentage {
    Percentage::from(0.08)
}

/// Errors that can occur while deriving order totals.
#[derive(Debug, Error, PartialEq)]
pub enum TotalsError {
    /// Wrapped cart subtotal error.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// A derived amount exceeded the representable range of minor units.
    #[error("derived amount cannot be represented in minor units")]
    AmountNotRepresentable,
}

/// The derived amounts for one cart, all in the cart currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals {
    subtotal: Money<'static, Currency>,
    taxes: Money<'static, Currency>,
    delivery_fee: Money<'static, Currency>,
    total: Money<'static, Currency>,
}

impl OrderTotals {
    /// Compute totals from the cart's current lines.
    ///
    /// # Errors
    ///
    /// - [`TotalsError::Cart`]: the cart subtotal could not be computed.
    /// - [`TotalsError::AmountNotRepresentable`]: a derived amount overflowed
    ///   `i64` minor units.
    pub fn from_cart(cart: &Cart) -> Result<Self, TotalsError> {
        let currency = cart.currency();
        let subtotal_minor = cart.subtotal()?.to_minor_units();
        let taxes_minor = tax_on_minor(subtotal_minor)?;

        let delivery_fee_minor = if subtotal_minor > 0 {
            DELIVERY_FEE_MINOR
        } else {
            0
        };

        let total_minor = subtotal_minor
            .checked_add(taxes_minor)
            .and_then(|sum| sum.checked_add(delivery_fee_minor))
            .ok_or(TotalsError::AmountNotRepresentable)?;

        Ok(OrderTotals {
            subtotal: Money::from_minor(subtotal_minor, currency),
            taxes: Money::from_minor(taxes_minor, currency),
            delivery_fee: Money::from_minor(delivery_fee_minor, currency),
            total: Money::from_minor(total_minor, currency),
        })
    }

    /// Sum of every line total before tax and fees.
    #[must_use]
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }

    /// Sales tax on the subtotal.
    #[must_use]
    pub fn taxes(&self) -> Money<'static, Currency> {
        self.taxes
    }

    /// Flat delivery fee, zero for an empty cart.
    #[must_use]
    pub fn delivery_fee(&self) -> Money<'static, Currency> {
        self.delivery_fee
    }

    /// `subtotal + taxes + delivery_fee`.
    #[must_use]
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }
}

/// Calculate the tax in minor units on a subtotal in minor units.
///
/// Equivalent to `round(subtotal × 0.08, 2)` in major units. 8% of a whole
/// number of cents can never land on a half-cent midpoint, so the rounding
/// strategy only states the display convention.
fn tax_on_minor(subtotal_minor: i64) -> Result<i64, TotalsError> {
    let Some(subtotal) = Decimal::from_i64(subtotal_minor) else {
        unreachable!("always returns `Some` for every `i64`")
    };

    let taxed = tax_rate() * subtotal;
    let rounded = taxed.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    rounded.to_i64().ok_or(TotalsError::AmountNotRepresentable)
}
