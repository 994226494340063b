//! Order tracking
//!
//! Fixture order records and the projection of an order's current status onto
//! the canonical fulfilment sequence: every status before the current one is
//! completed, the current one is active, the rest are pending. A status id
//! outside the sequence is an error, never a garbage percentage.

use decimal_percentage::Percentage;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// One entry in the canonical fulfilment sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStep {
    /// Stable status identifier, as stored on order records.
    pub id: &'static str,

    /// Display label.
    pub label: &'static str,
}

/// The fixed, ordered list of fulfilment states an order moves through.
pub const CANONICAL_STATUSES: [StatusStep; 4] = [
    StatusStep {
        id: "confirmed",
        label: "Confirmed",
    },
    StatusStep {
        id: "preparing",
        label: "Preparing Food",
    },
    StatusStep {
        id: "out_for_delivery",
        label: "Out for Delivery",
    },
    StatusStep {
        id: "delivered",
        label: "Delivered",
    },
];

/// Errors related to order lookup or status projection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackingError {
    /// The order id is not in the data set.
    #[error("We couldn't find an order with ID: {0}. Please check the ID and try again.")]
    OrderNotFound(String),

    /// The order's status id is not in the canonical sequence.
    #[error("order status {0:?} is not part of the fulfilment sequence")]
    UnknownStatus(String),
}

/// One line on an order record.
#[derive(Debug, Clone)]
pub struct OrderItem {
    /// Item name as ordered.
    pub name: String,

    /// Units ordered.
    pub quantity: u32,

    /// Unit price.
    pub price: Money<'static, Currency>,
}

/// An order record, as a backend would return it.
#[derive(Debug, Clone)]
pub struct Order {
    /// Order identifier.
    pub id: String,

    /// Ordered items.
    pub items: Vec<OrderItem>,

    /// Item total before tax and delivery.
    pub total_amount: Money<'static, Currency>,

    /// Estimated delivery, free text.
    pub estimated_delivery: String,

    /// Destination address, free text.
    pub delivery_address: String,

    /// Current status id; must appear in [`CANONICAL_STATUSES`].
    pub current_status_id: String,

    /// Restaurant the order was placed with.
    pub restaurant_name: String,
}

impl Order {
    /// Project this order's status onto the canonical sequence.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::UnknownStatus`] if the record carries a
    /// status id outside the sequence.
    pub fn project(&self) -> Result<StatusProjection, TrackingError> {
        project_status(&self.current_status_id)
    }
}

/// An order's position along the canonical sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusProjection {
    active_index: usize,
    active: StatusStep,
}

impl StatusProjection {
    /// Statuses the order has already passed, in sequence order.
    #[must_use]
    pub fn completed(&self) -> &'static [StatusStep] {
        CANONICAL_STATUSES.get(..self.active_index).unwrap_or(&[])
    }

    /// The status the order is currently in.
    #[must_use]
    pub fn active(&self) -> StatusStep {
        self.active
    }

    /// Statuses still ahead of the order, in sequence order.
    #[must_use]
    pub fn pending(&self) -> &'static [StatusStep] {
        CANONICAL_STATUSES
            .get(self.active_index.saturating_add(1)..)
            .unwrap_or(&[])
    }

    /// Fractional progress through the sequence: `(index + 1) / length`.
    #[must_use]
    pub fn progress(&self) -> Percentage {
        let position = self.active_index.saturating_add(1);

        let Some(position) = Decimal::from_usize(position) else {
            unreachable!("sequence positions are tiny")
        };

        let Some(length) = Decimal::from_usize(CANONICAL_STATUSES.len()) else {
            unreachable!("sequence length is tiny")
        };

        Percentage::from(position / length)
    }

    /// Whether the order has reached the terminal status.
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        self.active_index == CANONICAL_STATUSES.len().saturating_sub(1)
    }

    /// Whether the progress bar should be rendered.
    ///
    /// Progress display is suppressed once the order is delivered, even
    /// though the fraction reads 100% at that point.
    #[must_use]
    pub fn progress_visible(&self) -> bool {
        !self.is_delivered()
    }
}

/// Project a status id onto the canonical sequence.
///
/// # Errors
///
/// Returns [`TrackingError::UnknownStatus`] if the id does not appear in the
/// sequence; a position outside the sequence has no meaningful projection.
pub fn project_status(current_status_id: &str) -> Result<StatusProjection, TrackingError> {
    let (active_index, active) = CANONICAL_STATUSES
        .iter()
        .enumerate()
        .find(|(_, step)| step.id == current_status_id)
        .ok_or_else(|| TrackingError::UnknownStatus(current_status_id.to_string()))?;

    Ok(StatusProjection {
        active_index,
        active: *active,
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn labels(steps: &[StatusStep]) -> Vec<&'static str> {
        steps.iter().map(|step| step.label).collect()
    }

    #[test]
    fn preparing_partitions_the_sequence() -> TestResult {
        let projection = project_status("preparing")?;

        assert_eq!(labels(projection.completed()), ["Confirmed"]);
        assert_eq!(projection.active().id, "preparing");
        assert_eq!(
            labels(projection.pending()),
            ["Out for Delivery", "Delivered"]
        );
        assert_eq!(projection.progress(), Percentage::from(0.5));
        assert!(projection.progress_visible());

        Ok(())
    }

    #[test]
    fn confirmed_has_nothing_completed() -> TestResult {
        let projection = project_status("confirmed")?;

        assert!(projection.completed().is_empty());
        assert_eq!(projection.pending().len(), 3);
        assert_eq!(projection.progress(), Percentage::from(0.25));

        Ok(())
    }

    #[test]
    fn delivered_is_terminal_with_full_progress() -> TestResult {
        let projection = project_status("delivered")?;

        assert_eq!(projection.completed().len(), 3);
        assert!(projection.pending().is_empty());
        assert_eq!(projection.progress(), Percentage::from(1.0));
        assert!(projection.is_delivered());
        assert!(!projection.progress_visible());

        Ok(())
    }

    #[test]
    fn unknown_status_is_an_error_not_a_percentage() {
        let result = project_status("refunded");

        assert_eq!(
            result,
            Err(TrackingError::UnknownStatus("refunded".to_string()))
        );
    }

    #[test]
    fn order_projection_uses_the_record_status() -> TestResult {
        use rusty_money::iso::USD;

        let order = Order {
            id: "FF123456".to_string(),
            items: vec![OrderItem {
                name: "Spaghetti Carbonara".to_string(),
                quantity: 1,
                price: Money::from_minor(1499, USD),
            }],
            total_amount: Money::from_minor(1499, USD),
            estimated_delivery: "Approximately 35 minutes".to_string(),
            delivery_address: "123 Main St, Anytown, 12345".to_string(),
            current_status_id: "out_for_delivery".to_string(),
            restaurant_name: "Pasta Paradise".to_string(),
        };

        let projection = order.project()?;

        assert_eq!(projection.active().label, "Out for Delivery");
        assert_eq!(projection.progress(), Percentage::from(0.75));

        Ok(())
    }

    #[test]
    fn not_found_error_names_the_order() {
        let error = TrackingError::OrderNotFound("FF999999".to_string());

        assert_eq!(
            error.to_string(),
            "We couldn't find an order with ID: FF999999. Please check the ID and try again."
        );
    }
}
