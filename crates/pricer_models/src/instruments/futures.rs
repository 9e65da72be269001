//! Futures contract terms for cost-of-carry pricing.

use chrono::NaiveDate;
use pricer_core::types::{year_fraction, DomainError};

/// Parameters of a futures contract on a storable underlying.
///
/// Storage cost and convenience yield default to zero, which reduces the
/// fair price to the plain forward S·e^(rT).
///
/// # Examples
/// ```
/// use pricer_models::instruments::FuturesParameters;
///
/// let contract = FuturesParameters::new(80.0, 0.05, 0.5)
///     .with_storage_cost(0.02)
///     .with_convenience_yield(0.01);
/// assert_eq!(contract.storage_cost, 0.02);
/// assert!((contract.net_carry_rate() - 0.06).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuturesParameters {
    /// Spot price (S)
    pub spot: f64,
    /// Risk-free rate (r)
    pub rate: f64,
    /// Storage cost rate (u)
    #[cfg_attr(feature = "serde", serde(default))]
    pub storage_cost: f64,
    /// Convenience yield (y)
    #[cfg_attr(feature = "serde", serde(default))]
    pub convenience_yield: f64,
    /// Time to delivery in years (T)
    pub time_to_delivery: f64,
}

impl FuturesParameters {
    /// Creates a contract with zero storage cost and convenience yield.
    pub fn new(spot: f64, rate: f64, time_to_delivery: f64) -> Self {
        Self {
            spot,
            rate,
            storage_cost: 0.0,
            convenience_yield: 0.0,
            time_to_delivery,
        }
    }

    /// Copy with a storage cost rate.
    pub fn with_storage_cost(self, storage_cost: f64) -> Self {
        Self {
            storage_cost,
            ..self
        }
    }

    /// Copy with a convenience yield.
    pub fn with_convenience_yield(self, convenience_yield: f64) -> Self {
        Self {
            convenience_yield,
            ..self
        }
    }

    /// Copy with the time to delivery between two dates under ACT/365F.
    pub fn with_delivery_between(self, valuation: NaiveDate, delivery: NaiveDate) -> Self {
        Self {
            time_to_delivery: year_fraction(valuation, delivery),
            ..self
        }
    }

    /// Net carry rate r + u - y.
    #[inline]
    pub fn net_carry_rate(&self) -> f64 {
        self.rate + self.storage_cost - self.convenience_yield
    }

    /// Checks the pricing domain.
    ///
    /// # Errors
    /// - `DomainError::NonPositive` for spot <= 0 or a time to delivery <= 0
    /// - `DomainError::NonFinite` for any NaN or infinite field
    pub fn validate(&self) -> Result<(), DomainError> {
        DomainError::require_positive("spot", self.spot)?;
        DomainError::require_finite("rate", self.rate)?;
        DomainError::require_finite("storage_cost", self.storage_cost)?;
        DomainError::require_finite("convenience_yield", self.convenience_yield)?;
        DomainError::require_positive("time_to_delivery", self.time_to_delivery)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let contract = FuturesParameters::new(100.0, 0.05, 1.0);
        assert_eq!(contract.storage_cost, 0.0);
        assert_eq!(contract.convenience_yield, 0.0);
        assert_eq!(contract.net_carry_rate(), 0.05);
    }

    #[test]
    fn test_validate() {
        assert!(FuturesParameters::new(100.0, 0.05, 0.25).validate().is_ok());
        assert!(matches!(
            FuturesParameters::new(0.0, 0.05, 1.0).validate(),
            Err(DomainError::NonPositive { field: "spot", .. })
        ));
        assert!(matches!(
            FuturesParameters::new(100.0, 0.05, 0.0).validate(),
            Err(DomainError::NonPositive {
                field: "time_to_delivery",
                ..
            })
        ));
    }

    #[test]
    fn test_delivery_between() {
        let valuation = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let delivery = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let contract = FuturesParameters::new(100.0, 0.05, 0.0).with_delivery_between(valuation, delivery);
        assert_eq!(contract.time_to_delivery, 1.0);
    }
}
