//! Products

use rusty_money::{Money, iso::Currency};
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Catalog of products keyed by [`ProductKey`].
pub type Catalog<'a> = SlotMap<ProductKey, Product<'a>>;

/// One quantity band of a product's tiered price table.
///
/// The band covers `min..=max` pieces; an absent `max` means the band is
/// open-ended ("and above"). Buying a quantity inside the band yields the
/// band's unit price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange<'a> {
    /// Minimum quantity (inclusive) to qualify for this band.
    pub min: u32,

    /// Maximum quantity (inclusive); `None` means unbounded.
    pub max: Option<u32>,

    /// Unit price within this band.
    pub price: Money<'a, Currency>,
}

impl PriceRange<'_> {
    /// Returns whether the given quantity falls inside this band.
    #[must_use]
    pub fn contains(&self, quantity: u32) -> bool {
        quantity >= self.min && self.max.is_none_or(|max| quantity <= max)
    }
}

/// A sellable product.
///
/// `list_price` is the pre-discount reference price shown struck-through to
/// the buyer; `wholesale_price` is the flat, already-discounted unit price
/// used whenever no price band applies.
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Display name
    pub name: String,

    /// List (pre-discount) unit price
    pub list_price: Money<'a, Currency>,

    /// Flat wholesale unit price, the fallback when no band matches
    pub wholesale_price: Money<'a, Currency>,

    /// Available sizes
    pub sizes: SmallVec<[String; 6]>,

    /// Available colours, if the product comes in more than one
    pub colors: SmallVec<[String; 4]>,

    /// Tiered price table, ordered by ascending `min` when well formed
    pub price_ranges: Vec<PriceRange<'a>>,
}

impl<'a> Product<'a> {
    /// Create a product without tiered pricing.
    pub fn new(
        name: impl Into<String>,
        list_price: Money<'a, Currency>,
        wholesale_price: Money<'a, Currency>,
    ) -> Self {
        Self {
            name: name.into(),
            list_price,
            wholesale_price,
            sizes: SmallVec::new(),
            colors: SmallVec::new(),
            price_ranges: Vec::new(),
        }
    }

    /// Attach a tiered price table.
    #[must_use]
    pub fn with_price_ranges(mut self, price_ranges: impl Into<Vec<PriceRange<'a>>>) -> Self {
        self.price_ranges = price_ranges.into();
        self
    }

    /// Attach the available sizes.
    #[must_use]
    pub fn with_sizes(mut self, sizes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.sizes = sizes.into_iter().map(Into::into).collect();
        self
    }

    /// Attach the available colours.
    #[must_use]
    pub fn with_colors(mut self, colors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Returns whether the given size is offered for this product.
    ///
    /// Products without a size list accept any size.
    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.is_empty() || self.sizes.iter().any(|s| s == size)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::BRL;

    use super::*;

    #[test]
    fn bounded_range_contains_its_endpoints() {
        let range = PriceRange {
            min: 10,
            max: Some(49),
            price: Money::from_minor(1800, BRL),
        };

        assert!(range.contains(10));
        assert!(range.contains(49));
        assert!(!range.contains(9));
        assert!(!range.contains(50));
    }

    #[test]
    fn open_ended_range_has_no_upper_bound() {
        let range = PriceRange {
            min: 50,
            max: None,
            price: Money::from_minor(1500, BRL),
        };

        assert!(range.contains(50));
        assert!(range.contains(10_000));
        assert!(!range.contains(49));
    }

    #[test]
    fn product_without_sizes_offers_any_size() {
        let product = Product::new(
            "Meião",
            Money::from_minor(1500, BRL),
            Money::from_minor(1000, BRL),
        );

        assert!(product.offers_size("único"));
    }

    #[test]
    fn product_with_sizes_only_offers_listed_ones() {
        let product = Product::new(
            "Camisa",
            Money::from_minor(2500, BRL),
            Money::from_minor(2200, BRL),
        )
        .with_sizes(["P", "M", "G"]);

        assert!(product.offers_size("M"));
        assert!(!product.offers_size("XGG"));
    }
}
