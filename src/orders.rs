//! Orders
//!
//! The order record assembled from a quote, plus the recorded order-status
//! lifecycle. The pricing core never advances an order by itself; statuses
//! are recorded by the order-management side and only validated here.

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::Cart,
    checkout::CheckoutQuote,
    discounts::{DiscountError, extend},
    pricing::resolve_unit_price,
    products::{Catalog, ProductKey},
    shipping::ShippingMethod,
};

/// Errors that can occur while assembling or updating an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// A cart line referenced a product that is not in the catalog.
    #[error("product {0:?} not found in catalog")]
    MissingProduct(ProductKey),

    /// Errors bubbled up from pricing a line.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// The requested status change is not part of the lifecycle.
    #[error("order cannot move from {from} to {to}")]
    InvalidTransition {
        /// Current status
        from: OrderStatus,
        /// Rejected target status
        to: OrderStatus,
    },
}

/// Lifecycle of a recorded order.
///
/// Orders progress one step at a time along the fulfilment chain. A
/// cancellation can interrupt any non-terminal status; a return is only
/// possible once the order has left the warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Waiting for the shopper to pay.
    AguardandoPagamento,

    /// Payment confirmed.
    PagamentoConfirmado,

    /// Being picked and packed.
    PreparandoPedido,

    /// Handed to the carrier or courier.
    Enviado,

    /// In transit.
    EmTransito,

    /// Delivered.
    Entregue,

    /// Cancelled before completion.
    Cancelado,

    /// Returned after shipping.
    Devolvido,
}

impl OrderStatus {
    /// The next status along the fulfilment chain, if any.
    #[must_use]
    pub fn successor(self) -> Option<Self> {
        match self {
            Self::AguardandoPagamento => Some(Self::PagamentoConfirmado),
            Self::PagamentoConfirmado => Some(Self::PreparandoPedido),
            Self::PreparandoPedido => Some(Self::Enviado),
            Self::Enviado => Some(Self::EmTransito),
            Self::EmTransito => Some(Self::Entregue),
            Self::Entregue | Self::Cancelado | Self::Devolvido => None,
        }
    }

    /// Whether no further transitions are possible.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelado | Self::Devolvido)
    }

    /// Whether a recorded transition to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        if self.successor() == Some(next) {
            return true;
        }

        match next {
            Self::Cancelado => !self.is_terminal() && self != Self::Entregue,
            Self::Devolvido => matches!(self, Self::Enviado | Self::EmTransito | Self::Entregue),
            _ => false,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            Self::AguardandoPagamento => "aguardando_pagamento",
            Self::PagamentoConfirmado => "pagamento_confirmado",
            Self::PreparandoPedido => "preparando_pedido",
            Self::Enviado => "enviado",
            Self::EmTransito => "em_transito",
            Self::Entregue => "entregue",
            Self::Cancelado => "cancelado",
            Self::Devolvido => "devolvido",
        };

        write!(f, "{status}")
    }
}

/// A snapshot of one cart line at the prices the order was placed at.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem<'a> {
    /// Product display name at order time.
    pub product_name: String,

    /// Selected size.
    pub size: String,

    /// Selected colour, if one was chosen.
    pub color: Option<String>,

    /// Pieces ordered.
    pub quantity: u32,

    /// Resolved unit price at order time.
    pub unit_price: Money<'a, Currency>,

    /// Unit price extended over the quantity.
    pub line_total: Money<'a, Currency>,
}

/// An order record assembled from a quote.
///
/// Prices are snapshotted; later catalog edits do not reprice an order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order<'a> {
    /// Current recorded status.
    pub status: OrderStatus,

    /// Item snapshot, in cart order.
    pub items: Vec<OrderItem<'a>>,

    /// Number of distinct lines.
    pub total_items: usize,

    /// Total pieces across all lines.
    pub total_pieces: u32,

    /// Discounted subtotal before shipping.
    pub subtotal: Money<'a, Currency>,

    /// Shipping method the quote decided on.
    pub shipping_method: ShippingMethod,

    /// Shipping cost, after any coupon override.
    pub shipping_cost: Money<'a, Currency>,

    /// Grand total charged.
    pub total: Money<'a, Currency>,

    /// Coupon code applied at quote time, if any.
    pub applied_coupon: Option<String>,
}

impl<'a> Order<'a> {
    /// Assemble an order from a cart and its quote.
    ///
    /// The new order starts waiting for payment.
    ///
    /// # Errors
    ///
    /// - [`OrderError::MissingProduct`] if a line's product is not in the
    ///   catalog.
    /// - [`OrderError::Discount`] if a line cannot be priced.
    pub fn from_quote(
        cart: &Cart,
        catalog: &Catalog<'a>,
        quote: &CheckoutQuote<'a>,
    ) -> Result<Self, OrderError> {
        let mut items = Vec::with_capacity(cart.len());

        for line in cart.iter() {
            let product = catalog
                .get(line.product())
                .ok_or(OrderError::MissingProduct(line.product()))?;

            let unit_price =
                resolve_unit_price(product, line.quantity()).map_err(DiscountError::from)?;

            items.push(OrderItem {
                product_name: product.name.clone(),
                size: line.size().to_owned(),
                color: line.color().map(ToOwned::to_owned),
                quantity: line.quantity(),
                unit_price,
                line_total: extend(unit_price, line.quantity())?,
            });
        }

        Ok(Self {
            status: OrderStatus::AguardandoPagamento,
            items,
            total_items: quote.total_items,
            total_pieces: quote.total_pieces,
            subtotal: quote.subtotal,
            shipping_method: quote.shipping.method,
            shipping_cost: quote.shipping.cost,
            total: quote.total,
            applied_coupon: quote.applied_coupon.clone(),
        })
    }

    /// Record a status change.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidTransition`] if the lifecycle does not
    /// allow moving from the current status to `next`.
    pub fn record_status(&mut self, next: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(next) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }

        self.status = next;

        Ok(())
    }
}
