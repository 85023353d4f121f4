//! Shipping policy
//!
//! Decides the shipping method for a cart from its total piece count alone:
//! carts at or above the carrier threshold ship free by transportadora, the
//! rest go by paid courier. The courier quote drops to a reduced rate once
//! the cart passes the smaller reduced-rate threshold. Which band each line
//! priced into plays no part here.

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a shipping configuration.
#[derive(Debug, Error)]
pub enum ShippingConfigError {
    /// YAML parsing error.
    #[error("failed to parse shipping configuration: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Shipping methods offered by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShippingMethod {
    /// Free carrier, available from the configured piece threshold upward.
    Transportadora,

    /// Paid courier service for smaller carts.
    SuperFrete,
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transportadora => write!(f, "transportadora"),
            Self::SuperFrete => write!(f, "super-frete"),
        }
    }
}

/// Store-wide shipping policy configuration.
///
/// Costs are expressed in minor units (centavos) so the table can be
/// deserialized without committing to a currency; the evaluator attaches the
/// cart's currency when quoting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingConfig {
    /// Piece count from which the free carrier applies.
    pub carrier_threshold: u32,

    /// Piece count from which the courier charges the reduced rate.
    pub reduced_threshold: u32,

    /// Standard courier cost in minor units.
    pub standard_cost_minor: i64,

    /// Reduced courier cost in minor units.
    pub reduced_cost_minor: i64,

    /// Delivery window quoted for the free carrier, counted after payment
    /// confirmation.
    pub carrier_window: String,

    /// Delivery window quoted for the courier.
    pub courier_window: String,
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            carrier_threshold: 50,
            reduced_threshold: 20,
            standard_cost_minor: 1500,
            reduced_cost_minor: 1000,
            carrier_window: "5-7 dias úteis".to_owned(),
            courier_window: "3-5 dias úteis".to_owned(),
        }
    }
}

impl ShippingConfig {
    /// Load a shipping configuration from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingConfigError::Yaml`] if the document does not parse.
    pub fn from_yaml(yaml: &str) -> Result<Self, ShippingConfigError> {
        Ok(serde_norway::from_str(yaml)?)
    }
}

/// The outcome of evaluating the shipping policy for a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingDecision<'a> {
    /// Chosen shipping method.
    pub method: ShippingMethod,

    /// Quoted cost; zero for the free carrier.
    pub cost: Money<'a, Currency>,

    /// Quoted delivery window.
    pub window: String,

    /// Pieces still missing to qualify for the free carrier; zero once
    /// qualified.
    pub missing_for_carrier: u32,
}

impl ShippingDecision<'_> {
    /// Whether the cart qualified for the free carrier.
    #[must_use]
    pub fn qualifies_for_carrier(&self) -> bool {
        self.method == ShippingMethod::Transportadora
    }
}

/// Evaluates the shipping policy for a total piece count.
///
/// Operates purely on the summed quantity across all cart lines; prices and
/// discounts never influence the decision.
#[must_use]
pub fn evaluate_shipping<'a>(
    total_pieces: u32,
    config: &ShippingConfig,
    currency: &'a Currency,
) -> ShippingDecision<'a> {
    if total_pieces >= config.carrier_threshold {
        return ShippingDecision {
            method: ShippingMethod::Transportadora,
            cost: Money::from_minor(0, currency),
            window: config.carrier_window.clone(),
            missing_for_carrier: 0,
        };
    }

    let cost_minor = if total_pieces >= config.reduced_threshold {
        config.reduced_cost_minor
    } else {
        config.standard_cost_minor
    };

    ShippingDecision {
        method: ShippingMethod::SuperFrete,
        cost: Money::from_minor(cost_minor, currency),
        window: config.courier_window.clone(),
        missing_for_carrier: config.carrier_threshold - total_pieces,
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::BRL;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn carrier_applies_exactly_from_the_threshold() {
        let config = ShippingConfig::default();

        let at = evaluate_shipping(50, &config, BRL);
        let above = evaluate_shipping(120, &config, BRL);
        let below = evaluate_shipping(49, &config, BRL);

        assert!(at.qualifies_for_carrier());
        assert_eq!(at.cost, Money::from_minor(0, BRL));
        assert_eq!(at.missing_for_carrier, 0);
        assert!(above.qualifies_for_carrier());
        assert!(!below.qualifies_for_carrier());
        assert_eq!(below.missing_for_carrier, 1);
    }

    #[test]
    fn courier_rate_drops_at_the_reduced_threshold() {
        let config = ShippingConfig::default();

        let small = evaluate_shipping(5, &config, BRL);
        let reduced = evaluate_shipping(20, &config, BRL);

        assert_eq!(small.method, ShippingMethod::SuperFrete);
        assert_eq!(small.cost, Money::from_minor(1500, BRL));
        assert_eq!(reduced.method, ShippingMethod::SuperFrete);
        assert_eq!(reduced.cost, Money::from_minor(1000, BRL));
        assert_eq!(reduced.missing_for_carrier, 30);
    }

    #[test]
    fn courier_and_carrier_quote_their_own_windows() {
        let config = ShippingConfig::default();

        assert_eq!(evaluate_shipping(50, &config, BRL).window, "5-7 dias úteis");
        assert_eq!(evaluate_shipping(10, &config, BRL).window, "3-5 dias úteis");
    }

    #[test]
    fn empty_cart_is_quoted_the_standard_courier_rate() {
        let config = ShippingConfig::default();

        let decision = evaluate_shipping(0, &config, BRL);

        assert_eq!(decision.method, ShippingMethod::SuperFrete);
        assert_eq!(decision.cost, Money::from_minor(1500, BRL));
        assert_eq!(decision.missing_for_carrier, 50);
    }

    #[test]
    fn config_loads_from_yaml() -> TestResult {
        let yaml = "
carrier_threshold: 40
reduced_threshold: 15
standard_cost_minor: 1800
reduced_cost_minor: 900
carrier_window: 5-7 dias úteis
courier_window: 3-5 dias úteis
";

        let config = ShippingConfig::from_yaml(yaml)?;

        assert_eq!(config.carrier_threshold, 40);
        assert_eq!(config.reduced_cost_minor, 900);

        let decision = evaluate_shipping(39, &config, BRL);
        assert_eq!(decision.missing_for_carrier, 1);
        assert_eq!(decision.cost, Money::from_minor(900, BRL));

        Ok(())
    }

    #[test]
    fn method_display_matches_storefront_slugs() {
        assert_eq!(ShippingMethod::Transportadora.to_string(), "transportadora");
        assert_eq!(ShippingMethod::SuperFrete.to_string(), "super-frete");
    }
}
