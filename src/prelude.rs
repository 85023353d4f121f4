//! Atacado prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine},
    checkout::{CheckoutError, CheckoutQuote, quote},
    coupons::{Coupon, CouponError, CouponTable},
    discounts::{
        CartDiscountSummary, DiscountError, LineBreakdown, LineDiscount, NextTier,
        cart_discount_summary, line_discount, next_discount_threshold,
    },
    orders::{Order, OrderError, OrderItem, OrderStatus},
    pricing::{PricingError, applicable_range, resolve_unit_price},
    products::{Catalog, PriceRange, Product, ProductKey},
    receipt::{ReceiptError, render_order_summary, write_order_summary},
    shipping::{
        ShippingConfig, ShippingConfigError, ShippingDecision, ShippingMethod, evaluate_shipping,
    },
};
