//! Greeks result types.
//!
//! Provides [`Greeks`], the five first- and second-order sensitivities of a
//! barrier option, each tagged with the unit it is quoted in.

use std::fmt;

/// Unit convention of reported sensitivities.
///
/// | Greek | `Market` | `Raw` |
/// |-------|----------|-------|
/// | delta | per unit spot | per unit spot |
/// | gamma | per unit spot² | per unit spot² |
/// | vega  | per vol point (0.01) | per unit σ |
/// | theta | per calendar day | per year |
/// | rho   | per 1% rate move | per unit rate |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum QuoteConvention {
    /// Desk units: vega per vol point, theta per day, rho per 1%.
    #[default]
    Market,
    /// Plain partial derivatives.
    Raw,
}

impl QuoteConvention {
    fn vega_unit(self) -> GreekUnit {
        match self {
            QuoteConvention::Market => GreekUnit::PerVolPoint,
            QuoteConvention::Raw => GreekUnit::PerUnitVolatility,
        }
    }

    fn theta_unit(self) -> GreekUnit {
        match self {
            QuoteConvention::Market => GreekUnit::PerDay,
            QuoteConvention::Raw => GreekUnit::PerYear,
        }
    }

    fn rho_unit(self) -> GreekUnit {
        match self {
            QuoteConvention::Market => GreekUnit::PerPercentRate,
            QuoteConvention::Raw => GreekUnit::PerUnitRate,
        }
    }
}

/// Unit a sensitivity is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GreekUnit {
    /// ∂V/∂S
    PerUnitSpot,
    /// ∂²V/∂S²
    PerUnitSpotSquared,
    /// ∂V/∂σ scaled by 0.01
    PerVolPoint,
    /// ∂V/∂σ
    PerUnitVolatility,
    /// Value change over one calendar day
    PerDay,
    /// Value change per year of calendar time
    PerYear,
    /// ∂V/∂r scaled by 0.01
    PerPercentRate,
    /// ∂V/∂r
    PerUnitRate,
}

impl GreekUnit {
    /// Short label for tables.
    pub fn label(&self) -> &'static str {
        match self {
            GreekUnit::PerUnitSpot => "per 1 spot",
            GreekUnit::PerUnitSpotSquared => "per 1 spot^2",
            GreekUnit::PerVolPoint => "per vol point",
            GreekUnit::PerUnitVolatility => "per 1.00 vol",
            GreekUnit::PerDay => "per day",
            GreekUnit::PerYear => "per year",
            GreekUnit::PerPercentRate => "per 1% rate",
            GreekUnit::PerUnitRate => "per 1.00 rate",
        }
    }
}

impl fmt::Display for GreekUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A sensitivity value with its unit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sensitivity {
    /// Numeric value in `unit`.
    pub value: f64,
    /// Quoting unit.
    pub unit: GreekUnit,
}

impl Sensitivity {
    /// Creates a sensitivity.
    #[inline]
    pub fn new(value: f64, unit: GreekUnit) -> Self {
        Self { value, unit }
    }
}

/// Raw partial derivatives produced by the finite-difference engine.
///
/// `theta` is already -∂V/∂T (calendar time passing), per year.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct RawGreeks {
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,
    pub rho: f64,
}

/// Barrier option sensitivities.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::greeks::{GreekUnit, Greeks, Sensitivity};
///
/// let greeks = Greeks {
///     delta: Sensitivity::new(0.55, GreekUnit::PerUnitSpot),
///     gamma: Sensitivity::new(0.02, GreekUnit::PerUnitSpotSquared),
///     vega: Sensitivity::new(0.38, GreekUnit::PerVolPoint),
///     theta: Sensitivity::new(-0.017, GreekUnit::PerDay),
///     rho: Sensitivity::new(0.53, GreekUnit::PerPercentRate),
/// };
///
/// assert_eq!(greeks.iter().count(), 5);
/// assert_eq!(greeks.iter().next().unwrap().0, "delta");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// Delta: ∂V/∂S.
    pub delta: Sensitivity,
    /// Gamma: ∂²V/∂S².
    pub gamma: Sensitivity,
    /// Vega: ∂V/∂σ.
    pub vega: Sensitivity,
    /// Theta: -∂V/∂T.
    pub theta: Sensitivity,
    /// Rho: ∂V/∂r.
    pub rho: Sensitivity,
}

impl Greeks {
    /// Scales raw derivatives into the requested quote convention.
    pub(crate) fn quoted(raw: RawGreeks, quote: QuoteConvention) -> Self {
        let (vega, theta, rho) = match quote {
            QuoteConvention::Market => (raw.vega * 0.01, raw.theta / 365.0, raw.rho * 0.01),
            QuoteConvention::Raw => (raw.vega, raw.theta, raw.rho),
        };
        Self {
            delta: Sensitivity::new(raw.delta, GreekUnit::PerUnitSpot),
            gamma: Sensitivity::new(raw.gamma, GreekUnit::PerUnitSpotSquared),
            vega: Sensitivity::new(vega, quote.vega_unit()),
            theta: Sensitivity::new(theta, quote.theta_unit()),
            rho: Sensitivity::new(rho, quote.rho_unit()),
        }
    }

    /// Iterates `(name, sensitivity)` in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Sensitivity)> {
        [
            ("delta", self.delta),
            ("gamma", self.gamma),
            ("vega", self.vega),
            ("theta", self.theta),
            ("rho", self.rho),
        ]
        .into_iter()
    }

    /// Returns `true` if every value is finite.
    pub fn is_finite(&self) -> bool {
        self.iter().all(|(_, s)| s.value.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn raw() -> RawGreeks {
        RawGreeks {
            delta: 0.6,
            gamma: 0.02,
            vega: 37.0,
            theta: -6.4,
            rho: 53.0,
        }
    }

    #[test]
    fn test_market_scaling() {
        let greeks = Greeks::quoted(raw(), QuoteConvention::Market);
        assert_relative_eq!(greeks.delta.value, 0.6);
        assert_relative_eq!(greeks.gamma.value, 0.02);
        assert_relative_eq!(greeks.vega.value, 0.37, epsilon = 1e-15);
        assert_relative_eq!(greeks.theta.value, -6.4 / 365.0, epsilon = 1e-15);
        assert_relative_eq!(greeks.rho.value, 0.53, epsilon = 1e-15);
        assert_eq!(greeks.vega.unit, GreekUnit::PerVolPoint);
        assert_eq!(greeks.theta.unit, GreekUnit::PerDay);
        assert_eq!(greeks.rho.unit, GreekUnit::PerPercentRate);
    }

    #[test]
    fn test_raw_passthrough() {
        let greeks = Greeks::quoted(raw(), QuoteConvention::Raw);
        assert_eq!(greeks.vega.value, 37.0);
        assert_eq!(greeks.theta.value, -6.4);
        assert_eq!(greeks.rho.value, 53.0);
        assert_eq!(greeks.theta.unit, GreekUnit::PerYear);
    }

    #[test]
    fn test_iter_order_and_finiteness() {
        let greeks = Greeks::quoted(raw(), QuoteConvention::Market);
        let names: Vec<_> = greeks.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["delta", "gamma", "vega", "theta", "rho"]);
        assert!(greeks.is_finite());

        let mut broken = greeks;
        broken.gamma.value = f64::NAN;
        assert!(!broken.is_finite());
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(GreekUnit::PerDay.to_string(), "per day");
        assert_eq!(QuoteConvention::default(), QuoteConvention::Market);
    }
}
