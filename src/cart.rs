//! Cart

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    pricing::{PricingError, ensure_positive_quantity},
    products::{Catalog, ProductKey},
};

/// Errors related to cart construction or mutation.
#[derive(Debug, Error)]
pub enum CartError {
    /// A cart line referenced a product that is not in the catalog.
    #[error("product {0:?} not found in catalog")]
    MissingProduct(ProductKey),

    /// A product's currency differs from the cart currency.
    #[error("product {product} is priced in {product_currency}, but the cart uses {cart_currency}")]
    CurrencyMismatch {
        /// Product display name
        product: String,
        /// ISO code of the product's currency
        product_currency: &'static str,
        /// ISO code of the cart's currency
        cart_currency: &'static str,
    },

    /// The selected size is not offered for the product.
    #[error("size {size} is not available for {product}")]
    UnavailableSize {
        /// Product display name
        product: String,
        /// The rejected size
        size: String,
    },

    /// A line index was out of bounds.
    #[error("cart line {0} not found")]
    LineNotFound(usize),

    /// The cart-wide piece count would exceed the counter's range.
    #[error("cart cannot hold more than {} pieces", u32::MAX)]
    TooManyPieces,

    /// The requested quantity was not a positive number of pieces.
    #[error(transparent)]
    Quantity(#[from] PricingError),
}

/// One entry in a cart: a product in a selected size (and optional colour)
/// at a requested quantity.
///
/// Lines are identified by the `(product, size, color)` triple; adding the
/// same triple again grows the existing line instead of duplicating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    product: ProductKey,
    size: String,
    color: Option<String>,
    quantity: u32,
}

impl CartLine {
    /// The product this line refers to.
    #[must_use]
    pub fn product(&self) -> ProductKey {
        self.product
    }

    /// The selected size.
    #[must_use]
    pub fn size(&self) -> &str {
        &self.size
    }

    /// The selected colour, if one was chosen.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// The requested quantity of pieces.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// A shopper's cart: an ordered list of lines, all priced in one currency.
#[derive(Debug)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add pieces of a product to the cart.
    ///
    /// If a line for the same `(product, size, color)` triple already exists,
    /// its quantity is increased; otherwise a new line is appended.
    ///
    /// # Errors
    ///
    /// - [`CartError::Quantity`] if `quantity` is zero.
    /// - [`CartError::MissingProduct`] if the product is not in the catalog.
    /// - [`CartError::CurrencyMismatch`] if the product is priced in another
    ///   currency.
    /// - [`CartError::UnavailableSize`] if the product does not offer `size`.
    /// - [`CartError::TooManyPieces`] if the cart-wide piece count would
    ///   overflow.
    pub fn add(
        &mut self,
        catalog: &Catalog<'_>,
        product: ProductKey,
        size: impl Into<String>,
        color: Option<String>,
        quantity: u32,
    ) -> Result<(), CartError> {
        ensure_positive_quantity(quantity)?;

        let size = size.into();
        let entry = catalog
            .get(product)
            .ok_or(CartError::MissingProduct(product))?;

        let product_currency = entry.list_price.currency();
        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch {
                product: entry.name.clone(),
                product_currency: product_currency.iso_alpha_code,
                cart_currency: self.currency.iso_alpha_code,
            });
        }

        if !entry.offers_size(&size) {
            return Err(CartError::UnavailableSize {
                product: entry.name.clone(),
                size,
            });
        }

        self.total_pieces()
            .checked_add(quantity)
            .ok_or(CartError::TooManyPieces)?;

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product == product && line.size == size && line.color == color)
        {
            line.quantity = line
                .quantity
                .checked_add(quantity)
                .ok_or(CartError::TooManyPieces)?;
        } else {
            self.lines.push(CartLine {
                product,
                size,
                color,
                quantity,
            });
        }

        Ok(())
    }

    /// Replace the quantity of an existing line.
    ///
    /// # Errors
    ///
    /// - [`CartError::Quantity`] if `quantity` is zero; removal is explicit
    ///   via [`Cart::remove`], never implied by a zero quantity.
    /// - [`CartError::LineNotFound`] if `line` is out of bounds.
    /// - [`CartError::TooManyPieces`] if the cart-wide piece count would
    ///   overflow.
    pub fn set_quantity(&mut self, line: usize, quantity: u32) -> Result<(), CartError> {
        ensure_positive_quantity(quantity)?;

        let current = self.get(line)?.quantity;
        self.total_pieces()
            .saturating_sub(current)
            .checked_add(quantity)
            .ok_or(CartError::TooManyPieces)?;

        let line = self
            .lines
            .get_mut(line)
            .ok_or(CartError::LineNotFound(line))?;
        line.quantity = quantity;

        Ok(())
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if `line` is out of bounds.
    pub fn remove(&mut self, line: usize) -> Result<CartLine, CartError> {
        if line >= self.lines.len() {
            return Err(CartError::LineNotFound(line));
        }

        Ok(self.lines.remove(line))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Get a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if `line` is out of bounds.
    pub fn get(&self, line: usize) -> Result<&CartLine, CartError> {
        self.lines.get(line).ok_or(CartError::LineNotFound(line))
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Number of distinct lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of pieces across all lines.
    ///
    /// [`Cart::add`] and [`Cart::set_quantity`] reject mutations that would
    /// push this past [`u32::MAX`], so the fold cannot actually saturate.
    #[must_use]
    pub fn total_pieces(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |total, line| total.saturating_add(line.quantity))
    }

    /// The currency all lines are priced in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{BRL, USD},
    };
    use testresult::TestResult;

    use crate::products::Product;

    use super::*;

    fn catalog_with_shirt() -> (Catalog<'static>, ProductKey) {
        let mut catalog = Catalog::default();
        let shirt = catalog.insert(
            Product::new(
                "Camisa Tailandesa",
                Money::from_minor(2500, BRL),
                Money::from_minor(2200, BRL),
            )
            .with_sizes(["P", "M", "G", "GG"])
            .with_colors(["Preta", "Branca"]),
        );

        (catalog, shirt)
    }

    #[test]
    fn identical_triples_merge_into_one_line() -> TestResult {
        let (catalog, shirt) = catalog_with_shirt();
        let mut cart = Cart::new(BRL);

        cart.add(&catalog, shirt, "M", Some("Preta".into()), 5)?;
        cart.add(&catalog, shirt, "M", Some("Preta".into()), 3)?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(0)?.quantity(), 8);

        Ok(())
    }

    #[test]
    fn different_sizes_or_colors_stay_separate_lines() -> TestResult {
        let (catalog, shirt) = catalog_with_shirt();
        let mut cart = Cart::new(BRL);

        cart.add(&catalog, shirt, "M", Some("Preta".into()), 5)?;
        cart.add(&catalog, shirt, "G", Some("Preta".into()), 5)?;
        cart.add(&catalog, shirt, "M", Some("Branca".into()), 5)?;

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.total_pieces(), 15);

        Ok(())
    }

    #[test]
    fn add_rejects_zero_quantity() {
        let (catalog, shirt) = catalog_with_shirt();
        let mut cart = Cart::new(BRL);

        let result = cart.add(&catalog, shirt, "M", None, 0);

        assert!(matches!(result, Err(CartError::Quantity(_))));
        assert!(cart.is_empty());
    }

    #[test]
    fn add_rejects_unavailable_size() {
        let (catalog, shirt) = catalog_with_shirt();
        let mut cart = Cart::new(BRL);

        let result = cart.add(&catalog, shirt, "XXG", None, 2);

        match result {
            Err(CartError::UnavailableSize { size, .. }) => assert_eq!(size, "XXG"),
            other => panic!("expected UnavailableSize error, got {other:?}"),
        }
    }

    #[test]
    fn add_rejects_missing_product() {
        let (catalog, _) = catalog_with_shirt();
        let mut cart = Cart::new(BRL);
        let stale = ProductKey::default();

        let result = cart.add(&catalog, stale, "M", None, 2);

        assert!(matches!(result, Err(CartError::MissingProduct(_))));
    }

    #[test]
    fn add_rejects_currency_mismatch() {
        let mut catalog = Catalog::default();
        let imported = catalog.insert(Product::new(
            "Imported Jersey",
            Money::from_minor(3000, USD),
            Money::from_minor(2500, USD),
        ));
        let mut cart = Cart::new(BRL);

        let result = cart.add(&catalog, imported, "M", None, 1);

        match result {
            Err(CartError::CurrencyMismatch {
                product_currency,
                cart_currency,
                ..
            }) => {
                assert_eq!(product_currency, USD.iso_alpha_code);
                assert_eq!(cart_currency, BRL.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }
    }

    #[test]
    fn set_quantity_replaces_rather_than_accumulates() -> TestResult {
        let (catalog, shirt) = catalog_with_shirt();
        let mut cart = Cart::new(BRL);

        cart.add(&catalog, shirt, "M", None, 5)?;
        cart.set_quantity(0, 12)?;

        assert_eq!(cart.get(0)?.quantity(), 12);
        assert_eq!(cart.total_pieces(), 12);

        Ok(())
    }

    #[test]
    fn set_quantity_rejects_zero() -> TestResult {
        let (catalog, shirt) = catalog_with_shirt();
        let mut cart = Cart::new(BRL);

        cart.add(&catalog, shirt, "M", None, 5)?;

        assert!(matches!(
            cart.set_quantity(0, 0),
            Err(CartError::Quantity(_))
        ));
        assert_eq!(cart.get(0)?.quantity(), 5);

        Ok(())
    }

    #[test]
    fn add_rejects_piece_counter_overflow() -> TestResult {
        let (catalog, shirt) = catalog_with_shirt();
        let mut cart = Cart::new(BRL);

        cart.add(&catalog, shirt, "M", None, u32::MAX)?;
        let result = cart.add(&catalog, shirt, "M", None, 1);

        assert!(matches!(result, Err(CartError::TooManyPieces)));
        assert_eq!(cart.get(0)?.quantity(), u32::MAX);
        assert_eq!(cart.total_pieces(), u32::MAX);

        Ok(())
    }

    #[test]
    fn add_rejects_overflow_across_lines() -> TestResult {
        let (catalog, shirt) = catalog_with_shirt();
        let mut cart = Cart::new(BRL);

        cart.add(&catalog, shirt, "M", None, u32::MAX - 1)?;
        let result = cart.add(&catalog, shirt, "G", None, 2);

        assert!(matches!(result, Err(CartError::TooManyPieces)));
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn set_quantity_rejects_piece_counter_overflow() -> TestResult {
        let (catalog, shirt) = catalog_with_shirt();
        let mut cart = Cart::new(BRL);

        cart.add(&catalog, shirt, "M", None, 10)?;
        cart.add(&catalog, shirt, "G", None, 5)?;

        assert!(matches!(
            cart.set_quantity(0, u32::MAX),
            Err(CartError::TooManyPieces)
        ));
        assert_eq!(cart.get(0)?.quantity(), 10);

        Ok(())
    }

    #[test]
    fn remove_returns_the_line() -> TestResult {
        let (catalog, shirt) = catalog_with_shirt();
        let mut cart = Cart::new(BRL);

        cart.add(&catalog, shirt, "M", None, 5)?;
        let removed = cart.remove(0)?;

        assert_eq!(removed.size(), "M");
        assert!(cart.is_empty());
        assert!(matches!(cart.remove(0), Err(CartError::LineNotFound(0))));

        Ok(())
    }
}
