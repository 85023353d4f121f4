//! Fixtures
//!
//! Shared sample catalog used by unit and integration tests. The jersey
//! carries the store's standard three-band wholesale table; the shorts have
//! no table and always price at their flat wholesale price.

use rusty_money::{Money, iso::BRL};

use crate::products::{Catalog, PriceRange, Product, ProductKey};

/// Keys into the fixture catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogKeys {
    /// Tiered-priced jersey: list 25.00, wholesale 22.00, bands
    /// 1-9 → 20.00, 10-49 → 18.00, 50+ → 15.00.
    pub jersey: ProductKey,

    /// Flat-priced shorts: list 18.00, wholesale 12.00, no bands.
    pub shorts: ProductKey,
}

/// The standard tiered jersey.
#[must_use]
pub fn jersey() -> Product<'static> {
    Product::new(
        "Camisa Tailandesa",
        Money::from_minor(2500, BRL),
        Money::from_minor(2200, BRL),
    )
    .with_sizes(["P", "M", "G", "GG"])
    .with_colors(["Preta", "Branca", "Azul"])
    .with_price_ranges([
        PriceRange {
            min: 1,
            max: Some(9),
            price: Money::from_minor(2000, BRL),
        },
        PriceRange {
            min: 10,
            max: Some(49),
            price: Money::from_minor(1800, BRL),
        },
        PriceRange {
            min: 50,
            max: None,
            price: Money::from_minor(1500, BRL),
        },
    ])
}

/// The flat-priced shorts.
#[must_use]
pub fn shorts() -> Product<'static> {
    Product::new(
        "Calção Liso",
        Money::from_minor(1800, BRL),
        Money::from_minor(1200, BRL),
    )
    .with_sizes(["P", "M", "G"])
}

/// Builds the sample catalog and returns it with its keys.
#[must_use]
pub fn catalog() -> (Catalog<'static>, CatalogKeys) {
    let mut catalog = Catalog::default();
    let keys = CatalogKeys {
        jersey: catalog.insert(jersey()),
        shorts: catalog.insert(shorts()),
    };

    (catalog, keys)
}
