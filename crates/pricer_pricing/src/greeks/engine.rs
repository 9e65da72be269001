//! Bump-and-revalue Greeks on the closed-form barrier pricer.

use pricer_core::types::{DomainError, PricingError, ValidationError};
use pricer_models::analytical::{BarrierPricer, PlacementPolicy};
use pricer_models::instruments::{BarrierDirection, OptionParameters};
use tracing::debug;

use super::config::GreeksConfig;
use super::result::{Greeks, RawGreeks};
use crate::engine::PricingResult;

/// Difference stencil for a first derivative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stencil {
    /// (f(x+h) - f(x-h)) / 2h
    Central,
    /// (f(x+h) - f(x)) / h, used when x - h leaves the domain
    Forward,
    /// (f(x) - f(x-h)) / h, used when x + h leaves the domain
    Backward,
}

impl Stencil {
    /// Central unless `x - h` would reach the lower bound of a positive
    /// parameter.
    fn for_positive(x: f64, h: f64) -> Self {
        if x - h <= 0.0 {
            Stencil::Forward
        } else {
            Stencil::Central
        }
    }

    /// Stencil for spot. Under the strict policy a breached barrier bounds
    /// the domain: an up barrier above, a down barrier below.
    fn for_spot(params: &OptionParameters, h: f64, placement: PlacementPolicy) -> Self {
        let lower = Self::for_positive(params.spot, h);
        if placement == PlacementPolicy::Lenient {
            return lower;
        }
        let kind = params.barrier_kind;
        match kind.direction() {
            BarrierDirection::Up if kind.is_breached(params.spot + h, params.barrier) => Stencil::Backward,
            BarrierDirection::Down if kind.is_breached(params.spot - h, params.barrier) => Stencil::Forward,
            _ => lower,
        }
    }
}

/// Finite-difference Greeks engine.
///
/// Every sensitivity is obtained by revaluing the barrier pricer at bumped
/// inputs; no analytic derivative of the barrier formula is used. The engine
/// holds only its configuration and can be shared freely across threads.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{BarrierKind, OptionKind, OptionParameters};
/// use pricer_pricing::greeks::{GreeksConfig, GreeksEngine};
///
/// let params = OptionParameters::new(
///     OptionKind::Call, BarrierKind::UpOut,
///     100.0, 100.0, 120.0, 0.05, 0.05, 0.2, 1.0,
/// );
///
/// let engine = GreeksEngine::new(GreeksConfig::default()).unwrap();
/// let greeks = engine.compute(&params).unwrap();
/// assert!(greeks.is_finite());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GreeksEngine {
    config: GreeksConfig,
    pricer: BarrierPricer,
}

impl Default for GreeksEngine {
    fn default() -> Self {
        let config = GreeksConfig::default();
        Self {
            config,
            pricer: BarrierPricer::new(config.placement),
        }
    }
}

impl GreeksEngine {
    /// Creates an engine after validating the configuration.
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidConfig` for an invalid bump size.
    pub fn new(config: GreeksConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self {
            config,
            pricer: BarrierPricer::new(config.placement),
        })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &GreeksConfig {
        &self.config
    }

    /// Returns the underlying pricer.
    #[inline]
    pub fn pricer(&self) -> BarrierPricer {
        self.pricer
    }

    /// Computes delta, gamma, vega, theta and rho.
    ///
    /// # Errors
    ///
    /// Any error of the barrier pricer at the base point or at a bumped
    /// point, and `DomainError::NonFiniteResult` if a difference quotient is
    /// not finite.
    pub fn compute(&self, params: &OptionParameters) -> Result<Greeks, PricingError> {
        let (_, greeks) = self.price_and_greeks(params)?;
        Ok(greeks)
    }

    /// Computes the price together with the Greeks.
    pub fn compute_result(&self, params: &OptionParameters) -> Result<PricingResult, PricingError> {
        let (price, greeks) = self.price_and_greeks(params)?;
        Ok(PricingResult::new(price).with_greeks(greeks))
    }

    fn price_and_greeks(&self, params: &OptionParameters) -> Result<(f64, Greeks), PricingError> {
        let base = self.pricer.price(params)?;
        let raw = RawGreeks {
            delta: self.delta(params, base)?,
            gamma: self.gamma(params, base)?,
            vega: self.vega(params, base)?,
            theta: self.theta(params, base)?,
            rho: self.rho(params, base)?,
        };

        let greeks = Greeks::quoted(raw, self.config.quote);
        if !greeks.is_finite() {
            return Err(DomainError::NonFiniteResult { quantity: "greeks" }.into());
        }

        debug!(
            kind = %params.barrier_kind,
            option = %params.option_kind,
            price = base,
            delta = raw.delta,
            gamma = raw.gamma,
            vega = raw.vega,
            theta = raw.theta,
            rho = raw.rho,
            "computed finite-difference greeks"
        );
        Ok((base, greeks))
    }

    /// First derivative of `f` at `x` with step `h`.
    ///
    /// With Richardson enabled the central estimate becomes
    /// (4·D(h/2) - D(h)) / 3 and the one-sided ones 2·D(h/2) - D(h).
    fn derivative<F>(&self, x: f64, h: f64, base: f64, stencil: Stencil, f: F) -> Result<f64, PricingError>
    where
        F: Fn(f64) -> Result<f64, PricingError>,
    {
        let quotient = |step: f64| -> Result<f64, PricingError> {
            match stencil {
                Stencil::Central => Ok((f(x + step)? - f(x - step)?) / (2.0 * step)),
                Stencil::Forward => Ok((f(x + step)? - base) / step),
                Stencil::Backward => Ok((base - f(x - step)?) / step),
            }
        };

        let coarse = quotient(h)?;
        if !self.config.richardson {
            return Ok(coarse);
        }
        let fine = quotient(0.5 * h)?;
        Ok(match stencil {
            Stencil::Central => (4.0 * fine - coarse) / 3.0,
            Stencil::Forward | Stencil::Backward => 2.0 * fine - coarse,
        })
    }

    fn delta(&self, params: &OptionParameters, base: f64) -> Result<f64, PricingError> {
        let h = self.config.compute_spot_bump(params.spot);
        let stencil = Stencil::for_spot(params, h, self.config.placement);
        self.derivative(params.spot, h, base, stencil, |s| self.pricer.price(&params.with_spot(s)))
    }

    fn gamma(&self, params: &OptionParameters, base: f64) -> Result<f64, PricingError> {
        let h = self.config.compute_spot_bump(params.spot);
        let at = |s: f64| self.pricer.price(&params.with_spot(s));
        let x = params.spot;
        Ok(match Stencil::for_spot(params, h, self.config.placement) {
            Stencil::Central => (at(x + h)? - 2.0 * base + at(x - h)?) / (h * h),
            Stencil::Forward => (at(x + 2.0 * h)? - 2.0 * at(x + h)? + base) / (h * h),
            Stencil::Backward => (base - 2.0 * at(x - h)? + at(x - 2.0 * h)?) / (h * h),
        })
    }

    fn vega(&self, params: &OptionParameters, base: f64) -> Result<f64, PricingError> {
        let h = self.config.vol_bump_absolute;
        let stencil = Stencil::for_positive(params.volatility, h);
        self.derivative(params.volatility, h, base, stencil, |v| {
            self.pricer.price(&params.with_volatility(v))
        })
    }

    fn theta(&self, params: &OptionParameters, base: f64) -> Result<f64, PricingError> {
        let h = self.config.time_bump_years;
        let stencil = Stencil::for_positive(params.time_to_expiry, h);
        let dv_dt = self.derivative(params.time_to_expiry, h, base, stencil, |t| {
            self.pricer.price(&params.with_time_to_expiry(t))
        })?;
        Ok(-dv_dt)
    }

    fn rho(&self, params: &OptionParameters, base: f64) -> Result<f64, PricingError> {
        let h = self.config.rate_bump_absolute;
        let moves_carry = self.config.rate_bump_moves_carry;
        self.derivative(params.rate, h, base, Stencil::Central, |r| {
            let bumped = params.with_rate(r);
            let bumped = if moves_carry {
                bumped.with_carry(params.carry + (r - params.rate))
            } else {
                bumped
            };
            self.pricer.price(&bumped)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greeks::QuoteConvention;
    use approx::assert_relative_eq;
    use pricer_models::analytical::GeneralizedBlackScholes;
    use pricer_models::instruments::{BarrierKind, OptionKind};

    fn far_barrier(option: OptionKind) -> OptionParameters {
        OptionParameters::new(option, BarrierKind::DownOut, 100.0, 100.0, 1.0, 0.05, 0.02, 0.25, 1.0)
    }

    fn raw_engine() -> GreeksEngine {
        GreeksEngine::new(GreeksConfig::builder().quote(QuoteConvention::Raw).build().unwrap()).unwrap()
    }

    #[test]
    fn test_stencil_selection() {
        assert_eq!(Stencil::for_positive(0.2, 0.01), Stencil::Central);
        assert_eq!(Stencil::for_positive(0.01, 0.01), Stencil::Forward);
        assert_eq!(Stencil::for_positive(0.001, 0.01), Stencil::Forward);
    }

    #[test]
    fn test_spot_stencil_respects_strict_barrier() {
        let up = OptionParameters::new(OptionKind::Call, BarrierKind::UpOut, 119.5, 100.0, 120.0, 0.05, 0.05, 0.2, 1.0);
        assert_eq!(Stencil::for_spot(&up, 1.195, PlacementPolicy::Strict), Stencil::Backward);
        assert_eq!(Stencil::for_spot(&up, 1.195, PlacementPolicy::Lenient), Stencil::Central);
        assert_eq!(Stencil::for_spot(&up.with_spot(110.0), 1.1, PlacementPolicy::Strict), Stencil::Central);

        let down = OptionParameters::new(OptionKind::Put, BarrierKind::DownOut, 80.5, 100.0, 80.0, 0.03, 0.03, 0.25, 0.5);
        assert_eq!(Stencil::for_spot(&down, 0.805, PlacementPolicy::Strict), Stencil::Forward);
    }

    #[test]
    fn test_strict_greeks_next_to_up_barrier() {
        let params = OptionParameters::new(OptionKind::Call, BarrierKind::UpOut, 119.5, 100.0, 120.0, 0.05, 0.05, 0.2, 1.0);
        let config = GreeksConfig::builder()
            .quote(QuoteConvention::Raw)
            .placement(PlacementPolicy::Strict)
            .build()
            .unwrap();
        let engine = GreeksEngine::new(config).unwrap();

        let result = engine.compute_result(&params).unwrap();
        assert_eq!(result.price, engine.pricer().price(&params).unwrap());
        let greeks = result.greeks.unwrap();
        assert!(greeks.is_finite());
        // The option dies at H, so value falls towards the barrier
        assert!(greeks.delta.value < 0.0);
    }

    #[test]
    fn test_strict_greeks_next_to_down_barrier() {
        let params = OptionParameters::new(OptionKind::Put, BarrierKind::DownOut, 80.5, 100.0, 80.0, 0.03, 0.03, 0.25, 0.5);
        let config = GreeksConfig::builder()
            .quote(QuoteConvention::Raw)
            .placement(PlacementPolicy::Strict)
            .build()
            .unwrap();
        let greeks = GreeksEngine::new(config).unwrap().compute(&params).unwrap();
        assert!(greeks.is_finite());
        assert!(greeks.delta.value > 0.0);
    }

    #[test]
    fn test_far_barrier_matches_analytic() {
        let engine = raw_engine();
        for option in OptionKind::ALL {
            let params = far_barrier(option);
            let greeks = engine.compute(&params).unwrap();
            let model = GeneralizedBlackScholes::new(100.0, 0.05, 0.02, 0.25).unwrap();

            assert_relative_eq!(greeks.delta.value, model.delta(option, 100.0, 1.0), epsilon = 1e-6);
            assert_relative_eq!(greeks.gamma.value, model.gamma(100.0, 1.0), epsilon = 1e-4);
            assert_relative_eq!(greeks.vega.value, model.vega(100.0, 1.0), epsilon = 1e-5);
            assert_relative_eq!(greeks.theta.value, model.theta(option, 100.0, 1.0), epsilon = 1e-5);
            assert_relative_eq!(greeks.rho.value, model.rho(option, 100.0, 1.0), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_richardson_improves_delta() {
        let params = far_barrier(OptionKind::Call);
        let model = GeneralizedBlackScholes::new(100.0, 0.05, 0.02, 0.25).unwrap();
        let exact = model.delta(OptionKind::Call, 100.0, 1.0);

        let config = GreeksConfig::builder()
            .quote(QuoteConvention::Raw)
            .spot_bump_relative(0.1)
            .richardson(false)
            .build()
            .unwrap();
        let plain = GreeksEngine::new(config).unwrap().compute(&params).unwrap();
        let extrapolated = GreeksEngine::new(GreeksConfig { richardson: true, ..config })
            .unwrap()
            .compute(&params)
            .unwrap();

        let plain_error = (plain.delta.value - exact).abs();
        let extrapolated_error = (extrapolated.delta.value - exact).abs();
        assert!(extrapolated_error < plain_error);
    }

    #[test]
    fn test_forward_difference_near_zero_volatility() {
        let params = far_barrier(OptionKind::Call).with_volatility(0.005).with_barrier(80.0);
        let greeks = GreeksEngine::default().compute(&params).unwrap();
        assert!(greeks.is_finite());
    }

    #[test]
    fn test_forward_difference_near_expiry() {
        let params = far_barrier(OptionKind::Put).with_time_to_expiry(0.001);
        let greeks = GreeksEngine::default().compute(&params).unwrap();
        assert!(greeks.is_finite());
    }

    #[test]
    fn test_rate_bump_without_carry() {
        let params = far_barrier(OptionKind::Call);
        let config = GreeksConfig::builder()
            .quote(QuoteConvention::Raw)
            .rate_bump_moves_carry(false)
            .build()
            .unwrap();
        let greeks = GreeksEngine::new(config).unwrap().compute(&params).unwrap();

        // Discounting only: ∂C/∂r at fixed b = -T·C
        let model = GeneralizedBlackScholes::new(100.0, 0.05, 0.02, 0.25).unwrap();
        let expected = -model.price(OptionKind::Call, 100.0, 1.0);
        assert_relative_eq!(greeks.rho.value, expected, epsilon = 1e-5);
    }

    #[test]
    fn test_compute_result_carries_price() {
        let params = far_barrier(OptionKind::Call);
        let engine = GreeksEngine::default();
        let result = engine.compute_result(&params).unwrap();
        assert_eq!(result.price, engine.pricer().price(&params).unwrap());
        assert!(result.greeks.is_some());
    }

    #[test]
    fn test_strict_placement_propagates() {
        let config = GreeksConfig::builder().placement(PlacementPolicy::Strict).build().unwrap();
        let engine = GreeksEngine::new(config).unwrap();
        let breached = far_barrier(OptionKind::Call).with_barrier(101.0);
        assert!(engine.compute(&breached).unwrap_err().is_domain());
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let params = far_barrier(OptionKind::Call).with_volatility(0.0);
        assert!(GreeksEngine::default().compute(&params).unwrap_err().is_domain());
    }
}
