//! Cost-of-carry futures pricing.
//!
//! F = S·e^((r + u - y)T)
//!
//! with storage cost rate u and convenience yield y.

use pricer_core::traits::Priceable;
use pricer_core::types::{DomainError, PricingError};

use crate::instruments::FuturesParameters;

/// Fair futures price under continuous cost of carry.
///
/// # Examples
/// ```
/// use pricer_models::analytical::FuturesPricer;
/// use pricer_models::instruments::FuturesParameters;
///
/// let contract = FuturesParameters::new(100.0, 0.05, 1.0);
/// let price = FuturesPricer.price(&contract).unwrap();
/// assert!((price - 100.0 * 0.05_f64.exp()).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FuturesPricer;

impl FuturesPricer {
    /// Fair futures price.
    ///
    /// # Errors
    /// `PricingError::Domain` when spot or time to delivery is not positive,
    /// a rate is not finite, or the price overflows.
    pub fn price(&self, params: &FuturesParameters) -> Result<f64, PricingError> {
        params.validate()?;
        let price = params.spot * (params.net_carry_rate() * params.time_to_delivery).exp();
        Ok(DomainError::require_finite_result("futures price", price)?)
    }

    /// Basis F - S: positive in contango, negative in backwardation.
    ///
    /// # Errors
    /// As for [`price`](Self::price).
    pub fn basis(&self, params: &FuturesParameters) -> Result<f64, PricingError> {
        Ok(self.price(params)? - params.spot)
    }

    /// Net annual carry rate r + u - y.
    ///
    /// # Errors
    /// As for [`price`](Self::price).
    pub fn net_carry(&self, params: &FuturesParameters) -> Result<f64, PricingError> {
        params.validate()?;
        Ok(params.net_carry_rate())
    }
}

impl Priceable<f64> for FuturesParameters {
    fn price(&self) -> Result<f64, PricingError> {
        FuturesPricer.price(self)
    }
}
