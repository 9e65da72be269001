//! Contract-for-difference valuation.
//!
//! - raw P&L = (current - entry) × quantity × sign
//! - financing = entry × quantity × financing rate × holding period
//! - net P&L = raw P&L - sign × financing
//!
//! A long position pays financing on its entry notional, a short position
//! receives it.

use pricer_core::traits::Priceable;
use pricer_core::types::PricingError;

use crate::instruments::CfdParameters;

/// P&L breakdown of a CFD position.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CfdValuation {
    /// Price move P&L before financing
    pub raw_pnl: f64,
    /// Financing cash flow seen by the holder (negative when paid)
    pub financing: f64,
    /// raw_pnl + financing
    pub net_pnl: f64,
}

/// Linear CFD pricer.
///
/// # Examples
/// ```
/// use pricer_models::analytical::CfdPricer;
/// use pricer_models::instruments::{CfdParameters, Position};
///
/// let long = CfdParameters::new(100.0, 110.0, 10.0, Position::Long, 0.05, 0.5).unwrap();
/// let valuation = CfdPricer.value(&long);
///
/// assert_eq!(valuation.raw_pnl, 100.0);
/// assert!((valuation.financing + 25.0).abs() < 1e-12); // 1000 × 5% × 0.5 paid
/// assert!((valuation.net_pnl - 75.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CfdPricer;

impl CfdPricer {
    /// Signed P&L from the price move, before financing.
    #[inline]
    pub fn price(&self, params: &CfdParameters) -> f64 {
        (params.current_price() - params.entry_price()) * params.signed_quantity()
    }

    /// Unsigned financing accrued over the holding period.
    #[inline]
    pub fn financing_amount(&self, params: &CfdParameters) -> f64 {
        params.notional() * params.financing_rate() * params.holding_period()
    }

    /// Full P&L breakdown including financing.
    pub fn value(&self, params: &CfdParameters) -> CfdValuation {
        let raw_pnl = self.price(params);
        let financing = -params.position().sign() * self.financing_amount(params);
        CfdValuation {
            raw_pnl,
            financing,
            net_pnl: raw_pnl + financing,
        }
    }
}

impl Priceable<f64> for CfdParameters {
    fn price(&self) -> Result<f64, PricingError> {
        Ok(CfdPricer.price(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::Position;
    use approx::assert_relative_eq;

    fn position(position: Position, current: f64) -> CfdParameters {
        CfdParameters::new(100.0, current, 10.0, position, 0.04, 0.25).unwrap()
    }

    #[test]
    fn test_raw_pnl_sign() {
        assert!(CfdPricer.price(&position(Position::Long, 105.0)) > 0.0);
        assert!(CfdPricer.price(&position(Position::Short, 105.0)) < 0.0);
        assert!(CfdPricer.price(&position(Position::Short, 95.0)) > 0.0);
        assert_eq!(CfdPricer.price(&position(Position::Long, 100.0)), 0.0);
    }

    #[test]
    fn test_long_pays_financing() {
        let valuation = CfdPricer.value(&position(Position::Long, 105.0));
        assert_relative_eq!(valuation.raw_pnl, 50.0, epsilon = 1e-12);
        assert_relative_eq!(valuation.financing, -10.0, epsilon = 1e-12);
        assert_relative_eq!(valuation.net_pnl, 40.0, epsilon = 1e-12);
    }

    #[test]
    fn test_short_receives_financing() {
        let valuation = CfdPricer.value(&position(Position::Short, 105.0));
        assert_relative_eq!(valuation.raw_pnl, -50.0, epsilon = 1e-12);
        assert_relative_eq!(valuation.financing, 10.0, epsilon = 1e-12);
        assert_relative_eq!(valuation.net_pnl, -40.0, epsilon = 1e-12);
    }

    #[test]
    fn test_holding_days_accrual() {
        let cfd = CfdParameters::new(200.0, 200.0, 5.0, Position::Long, 0.0365, 0.0)
            .unwrap()
            .with_holding_days(10.0)
            .unwrap();
        // 1000 notional × 3.65% × 10/365
        assert_relative_eq!(CfdPricer.financing_amount(&cfd), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_holding_period_no_financing() {
        let cfd = CfdParameters::new(100.0, 120.0, 3.0, Position::Long, 0.05, 0.0).unwrap();
        let valuation = CfdPricer.value(&cfd);
        assert_eq!(valuation.financing, 0.0);
        assert_eq!(valuation.net_pnl, valuation.raw_pnl);
    }

    #[test]
    fn test_priceable_is_raw_pnl() {
        let cfd = position(Position::Long, 110.0);
        assert_eq!(Priceable::price(&cfd).unwrap(), 100.0);
    }
}
