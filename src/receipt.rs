//! Receipt
//!
//! Renders an order as a human-readable summary table: one row per line at
//! its snapshotted prices, followed by the subtotal, shipping and grand
//! total. This is what checkout shows the shopper for confirmation.

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::orders::Order;

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Write an order summary to the given writer.
///
/// # Errors
///
/// Returns [`ReceiptError::IO`] if the writer fails.
pub fn write_order_summary(
    out: &mut impl io::Write,
    order: &Order<'_>,
) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Tamanho", "Cor", "Qtd", "Unit.", "Total"]);

    for item in &order.items {
        builder.push_record([
            item.product_name.clone(),
            item.size.clone(),
            item.color.clone().unwrap_or_default(),
            item.quantity.to_string(),
            item.unit_price.to_string(),
            item.line_total.to_string(),
        ]);
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..6), Alignment::right());

    writeln!(out, "{table}").map_err(|_err| ReceiptError::IO)?;

    write_totals(out, order)
}

/// Render an order summary to a string.
///
/// # Errors
///
/// Returns [`ReceiptError::IO`] if rendering fails.
pub fn render_order_summary(order: &Order<'_>) -> Result<String, ReceiptError> {
    let mut out = Vec::new();
    write_order_summary(&mut out, order)?;

    String::from_utf8(out).map_err(|_err| ReceiptError::IO)
}

fn write_totals(out: &mut impl io::Write, order: &Order<'_>) -> Result<(), ReceiptError> {
    let frete = if order.shipping_cost.to_minor_units() == 0 {
        format!("{} (GRÁTIS)", order.shipping_method)
    } else {
        format!("{} {}", order.shipping_method, order.shipping_cost)
    };

    writeln!(
        out,
        " Peças:    {pieces} ({items} itens)",
        pieces = order.total_pieces,
        items = order.total_items,
    )
    .map_err(|_err| ReceiptError::IO)?;
    writeln!(out, " Subtotal: {subtotal}", subtotal = order.subtotal)
        .map_err(|_err| ReceiptError::IO)?;
    writeln!(out, " Frete:    {frete}").map_err(|_err| ReceiptError::IO)?;
    writeln!(out, " Total:    {total}", total = order.total).map_err(|_err| ReceiptError::IO)
}
