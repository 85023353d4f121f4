//! Coupons
//!
//! Coupon codes are configuration injected by the storefront, not state: a
//! static table mapping codes to their effect. A coupon may carry a flat
//! percentage off the combined subtotal-plus-shipping total, force the
//! shipping cost to zero regardless of the carrier threshold, or both.
//! Validation is a pure lookup; rejected codes change nothing.

use decimal_percentage::Percentage;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when validating or loading coupons.
#[derive(Debug, Error)]
pub enum CouponError {
    /// The code is not in the table.
    #[error("coupon code {0} is not valid")]
    UnknownCode(String),

    /// A configured percentage was outside the `(0, 1]` range.
    #[error("coupon {code} has an out-of-range percentage {percentage}")]
    InvalidPercentage {
        /// Offending code
        code: String,
        /// Offending rate, as a fraction
        percentage: f64,
    },

    /// YAML parsing error.
    #[error("failed to parse coupon table: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// The effect of a single coupon code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    /// Flat fraction off the combined subtotal-plus-shipping total.
    #[serde(default)]
    pub percentage: Option<f64>,

    /// Whether the coupon overrides the shipping cost to zero.
    #[serde(default)]
    pub free_shipping: bool,
}

impl Coupon {
    /// The percentage as a [`Percentage`], if the coupon carries one.
    #[must_use]
    pub fn rate(&self) -> Option<Percentage> {
        self.percentage.map(Percentage::from)
    }
}

/// A lookup table of valid coupon codes.
///
/// Codes are matched case-insensitively; the storefront historically accepted
/// codes however the shopper typed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CouponTable {
    codes: FxHashMap<String, Coupon>,
}

impl CouponTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a coupon to the table.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::InvalidPercentage`] if the coupon carries a
    /// percentage outside `(0, 1]`.
    pub fn insert(&mut self, code: impl Into<String>, coupon: Coupon) -> Result<(), CouponError> {
        let code = normalize(&code.into());

        if let Some(percentage) = coupon.percentage
            && !(percentage > 0.0 && percentage <= 1.0)
        {
            return Err(CouponError::InvalidPercentage { code, percentage });
        }

        self.codes.insert(code, coupon);

        Ok(())
    }

    /// Load a coupon table from a YAML mapping of code to effect.
    ///
    /// # Errors
    ///
    /// - [`CouponError::Yaml`] if the document does not parse.
    /// - [`CouponError::InvalidPercentage`] if any entry carries a percentage
    ///   outside `(0, 1]`.
    pub fn from_yaml(yaml: &str) -> Result<Self, CouponError> {
        let raw: FxHashMap<String, Coupon> = serde_norway::from_str(yaml)?;

        let mut table = Self::new();
        for (code, coupon) in raw {
            table.insert(code, coupon)?;
        }

        Ok(table)
    }

    /// Validate a code against the table.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::UnknownCode`] if the code is not present.
    pub fn validate(&self, code: &str) -> Result<Coupon, CouponError> {
        let code = normalize(code);

        self.codes
            .get(&code)
            .copied()
            .ok_or(CouponError::UnknownCode(code))
    }

    /// Number of codes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the table has no codes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Canonical form of a coupon code: trimmed and uppercased.
///
/// Every lookup and insertion goes through this, so codes compare the same
/// way no matter how the shopper typed them.
#[must_use]
pub fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}
