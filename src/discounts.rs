//! Discounts
//!
//! Aggregates wholesale savings across a cart: per-line discount figures
//! relative to the list price, cart-wide totals, and the "buy a few more
//! pieces to reach a cheaper band" query shown next to quantity steppers.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    cart::Cart,
    pricing::{PricingError, resolve_unit_price},
    products::{Catalog, Product, ProductKey},
};

/// Errors specific to discount calculations.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// A cart line referenced a product that is not in the catalog.
    #[error("product {0:?} not found in catalog")]
    MissingProduct(ProductKey),

    /// A monetary amount overflowed the minor-unit range.
    #[error("monetary amount overflowed while extending a line total")]
    Overflow,

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Errors bubbled up from price resolution.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Discount figures for a single cart line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineDiscount<'a> {
    /// List (pre-discount) unit price.
    pub original_price: Money<'a, Currency>,

    /// Resolved wholesale unit price at the line's quantity.
    pub discounted_price: Money<'a, Currency>,

    /// Rounded percentage saved per unit, clamped to zero when the resolved
    /// price is not below the list price.
    pub percentage: u8,

    /// Absolute savings for the whole line.
    pub savings: Money<'a, Currency>,
}

/// One line of a cart-wide discount summary.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBreakdown<'a> {
    /// Product this line refers to.
    pub product: ProductKey,

    /// Product display name, snapshotted for rendering.
    pub product_name: String,

    /// Pieces on the line.
    pub quantity: u32,

    /// List price extended over the quantity.
    pub original_total: Money<'a, Currency>,

    /// Resolved price extended over the quantity.
    pub discounted_total: Money<'a, Currency>,

    /// Difference between the two extended totals.
    pub savings: Money<'a, Currency>,

    /// Rounded per-unit percentage saved.
    pub percentage: u8,
}

/// Cart-wide discount summary.
#[derive(Debug, Clone, PartialEq)]
pub struct CartDiscountSummary<'a> {
    /// Sum of list-price-extended line totals.
    pub total_original: Money<'a, Currency>,

    /// Sum of resolved-price-extended line totals.
    pub total_discounted: Money<'a, Currency>,

    /// Difference between original and discounted totals.
    pub total_savings: Money<'a, Currency>,

    /// Rounded percentage saved across the cart; zero for an empty cart.
    pub savings_percentage: u8,

    /// Per-line breakdown, in cart order.
    pub lines: Vec<LineBreakdown<'a>>,
}

/// A cheaper price band reachable by increasing a line's quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NextTier<'a> {
    /// Minimum quantity of the cheaper band.
    pub min: u32,

    /// Unit price of the cheaper band.
    pub price: Money<'a, Currency>,

    /// Pieces still needed to reach the band.
    pub needed: u32,

    /// Per-unit savings relative to the currently resolved price.
    pub unit_savings: Money<'a, Currency>,
}

/// Computes the discount figures for one line.
///
/// The baseline is the product's list price; the discounted price comes from
/// the price resolver. The percentage is rounded midpoint-away-from-zero and
/// clamped so a resolved price at or above list never reads as a negative
/// discount.
///
/// # Errors
///
/// - [`DiscountError::Pricing`] if `quantity` is zero.
/// - [`DiscountError::Overflow`] if a line total cannot be represented.
/// - [`DiscountError::Money`] if money arithmetic fails.
pub fn line_discount<'a>(
    product: &Product<'a>,
    quantity: u32,
) -> Result<LineDiscount<'a>, DiscountError> {
    let original_price = product.list_price;
    let discounted_price = resolve_unit_price(product, quantity)?;

    let unit_savings = original_price.sub(discounted_price)?;
    let savings = extend(unit_savings, quantity)?;

    Ok(LineDiscount {
        original_price,
        discounted_price,
        percentage: rounded_percent(
            unit_savings.to_minor_units(),
            original_price.to_minor_units(),
        ),
        savings,
    })
}

/// Computes the cart-wide discount summary.
///
/// Pure derivation over the cart snapshot; the savings percentage is defined
/// as zero when the cart is empty or the original total is zero.
///
/// # Errors
///
/// - [`DiscountError::MissingProduct`] if a line's product is not in the
///   catalog.
/// - [`DiscountError::Pricing`], [`DiscountError::Overflow`] or
///   [`DiscountError::Money`] bubbled up from the per-line figures.
pub fn cart_discount_summary<'a>(
    cart: &Cart,
    catalog: &Catalog<'a>,
) -> Result<CartDiscountSummary<'a>, DiscountError> {
    let currency = cart.currency();

    let mut total_original = Money::from_minor(0, currency);
    let mut total_discounted = Money::from_minor(0, currency);
    let mut lines = Vec::with_capacity(cart.len());

    for line in cart.iter() {
        let product = catalog
            .get(line.product())
            .ok_or(DiscountError::MissingProduct(line.product()))?;

        let discount = line_discount(product, line.quantity())?;
        let original_total = extend(discount.original_price, line.quantity())?;
        let discounted_total = extend(discount.discounted_price, line.quantity())?;

        total_original = total_original.add(original_total)?;
        total_discounted = total_discounted.add(discounted_total)?;

        lines.push(LineBreakdown {
            product: line.product(),
            product_name: product.name.clone(),
            quantity: line.quantity(),
            original_total,
            discounted_total,
            savings: original_total.sub(discounted_total)?,
            percentage: discount.percentage,
        });
    }

    let total_savings = total_original.sub(total_discounted)?;

    Ok(CartDiscountSummary {
        total_original,
        total_discounted,
        total_savings,
        savings_percentage: rounded_percent(
            total_savings.to_minor_units(),
            total_original.to_minor_units(),
        ),
        lines,
    })
}

/// Finds the nearest price band above the current quantity that is strictly
/// cheaper than the currently resolved price.
///
/// Returns `None` when no cheaper higher band exists, including for products
/// without a price table.
///
/// # Errors
///
/// - [`DiscountError::Pricing`] if `current_quantity` is zero.
/// - [`DiscountError::Money`] if money arithmetic fails.
pub fn next_discount_threshold<'a>(
    product: &Product<'a>,
    current_quantity: u32,
) -> Result<Option<NextTier<'a>>, DiscountError> {
    let current_price = resolve_unit_price(product, current_quantity)?;

    let next = product
        .price_ranges
        .iter()
        .filter(|range| {
            range.min > current_quantity
                && range.price.to_minor_units() < current_price.to_minor_units()
        })
        .min_by_key(|range| range.min);

    let Some(range) = next else {
        return Ok(None);
    };

    Ok(Some(NextTier {
        min: range.min,
        price: range.price,
        needed: range.min - current_quantity,
        unit_savings: current_price.sub(range.price)?,
    }))
}

/// Extends a unit amount over a quantity of pieces.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] if the extended amount does not fit in
/// minor units.
pub fn extend<'a>(
    unit: Money<'a, Currency>,
    quantity: u32,
) -> Result<Money<'a, Currency>, DiscountError> {
    let minor = unit
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(DiscountError::Overflow)?;

    Ok(Money::from_minor(minor, unit.currency()))
}

/// Calculates a percentage of a minor-unit amount, rounded midpoint away
/// from zero.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the calculation overflows
/// or cannot be safely represented.
pub fn percent_of_minor(percent: Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    (percent * Decimal::ONE)
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// Rounded percentage of `saved` over `original`, clamped to zero for
/// non-positive inputs so malformed tables and empty carts never produce a
/// negative or undefined percentage.
fn rounded_percent(saved: i64, original: i64) -> u8 {
    if saved <= 0 || original <= 0 {
        return 0;
    }

    let (Some(saved), Some(original)) = (Decimal::from_i64(saved), Decimal::from_i64(original))
    else {
        return 0;
    };

    saved
        .checked_div(original)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|percent| percent.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|percent| percent.to_u8())
        .unwrap_or(u8::MAX)
}
