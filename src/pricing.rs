//! Price resolution
//!
//! Resolves the unit price for a product at a given quantity against the
//! product's tiered price table. When several bands qualify (overlapping or
//! otherwise malformed tables), the band with the highest qualifying `min`
//! wins, so the most specific tier always takes priority. Tables that leave a
//! quantity uncovered fall back to the flat wholesale price rather than
//! erroring.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::products::{PriceRange, Product};

/// Errors that can occur while resolving a unit price.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The requested quantity was not a positive number of pieces.
    #[error("quantity must be at least one piece, got {0}")]
    InvalidQuantity(u32),
}

/// Guard against non-positive quantities.
///
/// # Errors
///
/// Returns [`PricingError::InvalidQuantity`] if `quantity` is zero.
pub fn ensure_positive_quantity(quantity: u32) -> Result<(), PricingError> {
    if quantity == 0 {
        return Err(PricingError::InvalidQuantity(quantity));
    }

    Ok(())
}

/// Returns the price band that applies to the given quantity, if any.
///
/// Among all bands containing the quantity, the one with the highest `min`
/// is chosen.
#[must_use]
pub fn applicable_range<'p, 'a>(
    product: &'p Product<'a>,
    quantity: u32,
) -> Option<&'p PriceRange<'a>> {
    product
        .price_ranges
        .iter()
        .filter(|range| range.contains(quantity))
        .max_by_key(|range| range.min)
}

/// Resolves the unit price for `quantity` pieces of `product`.
///
/// Products without a price table, and quantities no band covers, resolve to
/// the flat wholesale price.
///
/// # Errors
///
/// Returns [`PricingError::InvalidQuantity`] if `quantity` is zero.
pub fn resolve_unit_price<'a>(
    product: &Product<'a>,
    quantity: u32,
) -> Result<Money<'a, Currency>, PricingError> {
    ensure_positive_quantity(quantity)?;

    Ok(applicable_range(product, quantity)
        .map_or(product.wholesale_price, |range| range.price))
}
