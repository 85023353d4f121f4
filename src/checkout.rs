//! Checkout
//!
//! Stitches the pricing pieces into one quote: the discount aggregator runs
//! first, shipping is evaluated over the cart's piece count, and only then
//! are coupon overrides applied, because a percentage coupon discounts the
//! combined subtotal-plus-shipping total. Quoting is a pure function of the
//! cart snapshot, so re-quoting with the same coupon never compounds it.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    cart::Cart,
    coupons::{self, CouponError, CouponTable},
    discounts::{CartDiscountSummary, DiscountError, cart_discount_summary, percent_of_minor},
    products::Catalog,
    shipping::{ShippingConfig, ShippingDecision, evaluate_shipping},
};

/// Errors that can occur while building a quote.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Errors bubbled up from the discount aggregator.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// The supplied coupon code was rejected.
    #[error(transparent)]
    Coupon(#[from] CouponError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A fully priced cart, ready to be turned into an order.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutQuote<'a> {
    /// Number of distinct lines in the cart.
    pub total_items: usize,

    /// Total pieces across all lines.
    pub total_pieces: u32,

    /// Per-line and cart-wide discount figures.
    pub discounts: CartDiscountSummary<'a>,

    /// Sum of discounted line totals, before shipping.
    pub subtotal: Money<'a, Currency>,

    /// Shipping decision, with any coupon cost override already applied.
    pub shipping: ShippingDecision<'a>,

    /// Grand total: subtotal plus shipping, minus any percentage coupon.
    pub total: Money<'a, Currency>,

    /// The normalized coupon code that was applied, if any.
    pub applied_coupon: Option<String>,
}

/// Builds a quote for the cart.
///
/// `coupon_code` is validated against the injected table; `None` quotes
/// without a coupon. A free-shipping coupon zeroes the shipping cost but
/// leaves the method and delivery window untouched; a percentage coupon is
/// taken off subtotal plus shipping, rounded midpoint-away-from-zero.
///
/// # Errors
///
/// - [`CheckoutError::Discount`] if a line cannot be priced.
/// - [`CheckoutError::Coupon`] if the supplied code is not in the table.
/// - [`CheckoutError::Money`] if money arithmetic fails.
pub fn quote<'a>(
    cart: &Cart,
    catalog: &Catalog<'a>,
    shipping_config: &ShippingConfig,
    coupons: &CouponTable,
    coupon_code: Option<&str>,
) -> Result<CheckoutQuote<'a>, CheckoutError> {
    let discounts = cart_discount_summary(cart, catalog)?;
    let subtotal = discounts.total_discounted;

    let mut shipping = evaluate_shipping(cart.total_pieces(), shipping_config, cart.currency());

    let coupon = coupon_code
        .map(|code| coupons.validate(code))
        .transpose()?;

    if coupon.is_some_and(|coupon| coupon.free_shipping) {
        shipping.cost = Money::from_minor(0, cart.currency());
    }

    let combined = subtotal.add(shipping.cost)?;
    let total = match coupon.and_then(|coupon| coupon.rate()) {
        Some(rate) => {
            let off = percent_of_minor(rate, combined.to_minor_units())?;
            combined.sub(Money::from_minor(off, cart.currency()))?
        }
        None => combined,
    };

    Ok(CheckoutQuote {
        total_items: cart.len(),
        total_pieces: cart.total_pieces(),
        discounts,
        subtotal,
        shipping,
        total,
        applied_coupon: coupon_code.map(coupons::normalize),
    })
}
