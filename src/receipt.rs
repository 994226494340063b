//! Receipt
//!
//! Terminal rendering for a placed order, plus the table styling shared by
//! every screen that prints one.

use std::{fmt::Write, io, ops::Range};

use rust_decimal::{Decimal, prelude::FromPrimitive};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::CartError,
    checkout::PlacedOrder,
    pricing::{OrderTotals, tax_rate},
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error totalling a cart line.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Writes the full receipt for a placed order.
///
/// The order identifier, the line items as a bordered table, the totals
/// block, then the delivery and payment details captured at submission.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if a line total cannot be computed or the
/// output cannot be written.
pub fn write_order_receipt(
    mut out: impl io::Write,
    order: &PlacedOrder,
) -> Result<(), ReceiptError> {
    writeln!(out, "\nOrder {}", order.id).map_err(|_err| ReceiptError::IO)?;

    let mut builder = Builder::default();

    builder.push_record(["Item", "Qty", "Unit Price", "Line Total"]);

    for line in &order.lines {
        builder.push_record([
            line.name().to_string(),
            line.quantity().to_string(),
            line.unit_price().to_string(),
            line.line_total()?.to_string(),
        ]);
    }

    let table = render_table(builder, &[], 1..4, vec![]);

    writeln!(out, "{table}").map_err(|_err| ReceiptError::IO)?;

    write_totals_block(&mut out, &order.totals)?;
    write_delivery_details(&mut out, order)?;

    Ok(())
}

/// Writes the totals block: subtotal, taxes, delivery fee, and a bold total.
///
/// The same block the cart review and confirmation screens show under the
/// line items.
///
/// # Errors
///
/// Returns a [`ReceiptError::IO`] error if the output cannot be written.
pub fn write_totals_block(
    mut out: impl io::Write,
    totals: &OrderTotals,
) -> Result<(), ReceiptError> {
    let taxes_label = format!(" Taxes ({}%):", tax_percent_points());

    let subtotal_label = " Subtotal:";
    let fee_label = " Delivery Fee:";
    let total_label = " \x1b[1mTotal:\x1b[0m";

    let subtotal_val = format!("{}  ", totals.subtotal());
    let taxes_val = format!("{}  ", totals.taxes());
    let fee_val = format!("{}  ", totals.delivery_fee());
    let total_val = format!("{}  ", totals.total());

    let label_width = visible_width(subtotal_label)
        .max(visible_width(&taxes_label))
        .max(visible_width(fee_label))
        .max(visible_width(total_label));

    let value_width = subtotal_val
        .len()
        .max(taxes_val.len())
        .max(fee_val.len())
        .max(total_val.len());

    write_summary_line(&mut out, subtotal_label, &subtotal_val, label_width, value_width)?;
    write_summary_line(&mut out, &taxes_label, &taxes_val, label_width, value_width)?;
    write_summary_line(&mut out, fee_label, &fee_val, label_width, value_width)?;

    write_summary_line(
        &mut out,
        total_label,
        &format!("\x1b[1m{total_val}\x1b[0m"),
        label_width,
        value_width,
    )?;

    writeln!(out).map_err(|_err| ReceiptError::IO)
}

fn write_delivery_details(
    out: &mut impl io::Write,
    order: &PlacedOrder,
) -> Result<(), ReceiptError> {
    writeln!(out, "Delivery Address:").map_err(|_err| ReceiptError::IO)?;
    writeln!(out, "  {}", order.address.full_name).map_err(|_err| ReceiptError::IO)?;
    writeln!(out, "  {}", order.address.address_line1).map_err(|_err| ReceiptError::IO)?;

    writeln!(out, "  {}, {}", order.address.city, order.address.postal_code)
        .map_err(|_err| ReceiptError::IO)?;

    writeln!(out, "  Phone: {}", order.address.phone).map_err(|_err| ReceiptError::IO)?;
    writeln!(out).map_err(|_err| ReceiptError::IO)?;
    writeln!(out, "Payment Method:").map_err(|_err| ReceiptError::IO)?;
    writeln!(out, "  {}", order.payment_method.label()).map_err(|_err| ReceiptError::IO)?;

    Ok(())
}

/// Renders a builder as a rounded-border table with grey borders and a bold
/// header row.
///
/// A separator line is drawn under the header and above each row listed in
/// `section_rows`; `right_columns` are right-aligned; `color_ops` colors
/// individual `(row, column)` cells.
#[must_use]
pub fn render_table(
    builder: Builder,
    section_rows: &[usize],
    right_columns: Range<usize>,
    color_ops: Vec<(usize, usize, Color)>,
) -> String {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    for &row in section_rows {
        if row > 1 {
            theme.insert_horizontal_line(row, separator);
        }
    }

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(right_columns), Alignment::right());

    for (row, col, color) in color_ops {
        table.modify((row, col), color);
    }

    colorize_borders(&table.to_string())
}

/// ANSI dark grey foreground, for secondary table cells.
#[must_use]
pub fn color_dark_grey() -> Color {
    Color::new("\x1b[90m", "\x1b[0m")
}

/// The tax rate in percent points for display.
fn tax_percent_points() -> Decimal {
    // `tax_rate` is a fraction (e.g. 0.08), so multiply by 100 to print percent points.
    ((tax_rate() * Decimal::ONE) * Decimal::from_i64(100).unwrap_or(Decimal::ZERO)).normalize()
}

/// Wraps runs of UTF-8 box-drawing characters in ANSI dark-grey escape codes.
///
/// Box-drawing characters occupy the Unicode range U+2500..U+257F. This
/// function scans each character, grouping consecutive border characters and
/// emitting a single grey escape sequence around each run, leaving cell
/// content untouched.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            _ = out.write_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            _ = out.write_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}

/// Returns the visible (non-ANSI) width of a string.
fn visible_width(s: &str) -> usize {
    let mut width = 0usize;
    let mut in_escape = false;

    for ch in s.chars() {
        if in_escape {
            if ch.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if ch == '\x1b' {
            in_escape = true;
        } else {
            width += 1;
        }
    }

    width
}

/// Writes a summary line with a right-aligned label and a fixed-width value column.
fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    label_col_width: usize,
    value_col_width: usize,
) -> Result<(), ReceiptError> {
    let label_vis = visible_width(label);
    let value_vis = visible_width(value);

    // 2 chars of spacing between label and value column.
    let label_pad = label_col_width.saturating_sub(label_vis);
    let value_pad = value_col_width.saturating_sub(value_vis);

    writeln!(
        out,
        "{:>label_pad$}{label}  {value_pad}{value}",
        "",
        value_pad = " ".repeat(value_pad)
    )
    .map_err(|_err| ReceiptError::IO)
}

#[cfg(test)]
mod tests {
    use num_traits::FromPrimitive;
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use super::*;
    use crate::{
        cart::{Cart, CartLine},
        checkout::form::{DeliveryAddressForm, PaymentMethod},
        pricing::TotalsError,
    };

    fn sample_order() -> Result<PlacedOrder, TotalsError> {
        let cart = Cart::with_lines(
            vec![
                CartLine::new("m3", "Spaghetti Carbonara", Money::from_minor(1499, USD), 1),
                CartLine::new("m5", "Tiramisu", Money::from_minor(800, USD), 2),
            ],
            USD,
        )?;

        let totals = OrderTotals::from_cart(&cart)?;

        Ok(PlacedOrder {
            id: "FF789123".to_string(),
            lines: cart.iter().cloned().collect(),
            totals,
            address: DeliveryAddressForm {
                full_name: "Alex Johnson".to_string(),
                address_line1: "123 Main Street".to_string(),
                city: "Anytown".to_string(),
                postal_code: "12345".to_string(),
                phone: "+15551234567".to_string(),
            },
            payment_method: PaymentMethod::CreditCard,
            promo_code: None,
        })
    }

    fn rendered(order: &PlacedOrder) -> TestResult<String> {
        let mut out = Vec::new();

        write_order_receipt(&mut out, order)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn receipt_shows_the_order_id_and_every_line() -> TestResult {
        let output = rendered(&sample_order()?)?;

        assert!(output.contains("Order FF789123"));
        assert!(output.contains("Spaghetti Carbonara"));
        assert!(output.contains("$14.99"));
        assert!(output.contains("Tiramisu"));
        // 2 × 8.00
        assert!(output.contains("$16.00"));

        Ok(())
    }

    #[test]
    fn receipt_shows_the_totals_block() -> TestResult {
        let output = rendered(&sample_order()?)?;

        assert!(output.contains("Subtotal:"));
        assert!(output.contains("$30.99"));
        assert!(output.contains("Taxes (8%):"));
        assert!(output.contains("$2.48"));
        assert!(output.contains("Delivery Fee:"));
        assert!(output.contains("$5.00"));
        assert!(output.contains("\x1b[1mTotal:\x1b[0m"));
        assert!(output.contains("$38.47"));

        Ok(())
    }

    #[test]
    fn receipt_shows_delivery_and_payment_details() -> TestResult {
        let output = rendered(&sample_order()?)?;

        assert!(output.contains("Delivery Address:"));
        assert!(output.contains("  Alex Johnson"));
        assert!(output.contains("  Anytown, 12345"));
        assert!(output.contains("  Phone: +15551234567"));
        assert!(output.contains("Payment Method:"));
        assert!(output.contains("  Credit Card"));

        Ok(())
    }

    #[test]
    fn render_table_bolds_the_header_and_greys_the_borders() {
        let mut builder = Builder::default();
        builder.push_record(["Name", "Rating"]);
        builder.push_record(["Pasta Paradise", "4.5"]);

        let table = render_table(builder, &[], 1..2, vec![]);

        assert!(table.contains("\x1b[1m"));
        assert!(table.contains("\x1b[90m"));
        assert!(table.contains('╭'));
    }

    #[test]
    fn render_table_draws_a_separator_per_section_row() {
        let mut builder = Builder::default();
        builder.push_record(["Item", "Price"]);
        builder.push_record(["Garlic Bread", "$5.99"]);
        builder.push_record(["Tiramisu", "$8.00"]);

        let table = render_table(builder, &[2], 1..2, vec![]);

        // One separator under the header, one above row 2.
        assert_eq!(table.matches('├').count(), 2);
    }

    #[test]
    fn color_ops_color_individual_cells() {
        let mut builder = Builder::default();
        builder.push_record(["Item", "Category"]);
        builder.push_record(["Bruschetta", "Appetizers"]);

        let table = render_table(builder, &[], 1..2, vec![(1, 1, color_dark_grey())]);

        assert!(table.contains("\x1b[90mAppetizers\x1b[0m"));
    }

    #[test]
    fn tax_label_prints_whole_percent_points() {
        assert_eq!(
            tax_percent_points(),
            Decimal::from_i64(8).expect("Failed to convert to Decimal")
        );
    }

    #[test]
    fn colorize_borders_wraps_border_runs_only() {
        assert_eq!(
            colorize_borders("│ cell │"),
            "\x1b[90m│\x1b[0m cell \x1b[90m│\x1b[0m"
        );
    }

    #[test]
    fn visible_width_ignores_ansi_escapes() {
        assert_eq!(visible_width(" \x1b[1mTotal:\x1b[0m"), 7);
        assert_eq!(visible_width("Subtotal:"), 9);
    }

    #[test]
    fn summary_lines_right_align_labels_and_values() -> TestResult {
        let mut out = Vec::new();

        write_summary_line(&mut out, "Total:", "$38.47", 14, 10)?;

        assert_eq!(String::from_utf8(out)?, "        Total:      $38.47\n");

        Ok(())
    }
}
