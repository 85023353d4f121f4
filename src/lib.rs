//! Atacado
//!
//! Atacado is the tiered wholesale pricing, discount and shipping-policy
//! engine behind a sporting-goods storefront. Given an immutable product
//! catalog and a cart snapshot, it resolves each line's unit price against
//! the product's quantity-band table, aggregates savings relative to list
//! prices, decides the shipping method from the cart's total piece count,
//! reconciles coupon codes, and assembles the resulting quote into an order
//! record.
//!
//! Everything is pure, synchronous computation over the snapshots supplied
//! by the caller: no state is held between invocations, and concurrent
//! recomputations of the same cart are independent.

pub mod cart;
pub mod checkout;
pub mod coupons;
pub mod discounts;
pub mod fixtures;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod shipping;
