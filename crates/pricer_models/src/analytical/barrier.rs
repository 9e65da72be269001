//! Reiner-Rubinstein closed form for single-barrier European options.
//!
//! # Barrier Variants
//!
//! Eight variants: {up, down} × {in, out} × {call, put}. Each price is a
//! signed sum of six terms A..F, chosen by the variant and by whether the
//! strike lies at or above the barrier.
//!
//! ## Intermediate quantities
//!
//! With φ = +1 (call) / -1 (put) and η = +1 (down) / -1 (up):
//! - μ = (b - σ²/2) / σ²
//! - λ = √(μ² + 2r/σ²)
//! - x₁ = ln(S/K)/(σ√T) + (1+μ)σ√T
//! - x₂ = ln(S/H)/(σ√T) + (1+μ)σ√T
//! - y₁ = ln(H²/(SK))/(σ√T) + (1+μ)σ√T
//! - y₂ = ln(H/S)/(σ√T) + (1+μ)σ√T
//! - z = ln(H/S)/(σ√T) + λσ√T
//!
//! ## Terms
//!
//! - A = φS·e^((b-r)T)·N(φx₁) - φK·e^(-rT)·N(φx₁ - φσ√T)
//! - B = φS·e^((b-r)T)·N(φx₂) - φK·e^(-rT)·N(φx₂ - φσ√T)
//! - C = φS·e^((b-r)T)·(H/S)^(2(μ+1))·N(ηy₁) - φK·e^(-rT)·(H/S)^(2μ)·N(ηy₁ - ησ√T)
//! - D = φS·e^((b-r)T)·(H/S)^(2(μ+1))·N(ηy₂) - φK·e^(-rT)·(H/S)^(2μ)·N(ηy₂ - ησ√T)
//! - E = R·e^(-rT)·[N(ηx₂ - ησ√T) - (H/S)^(2μ)·N(ηy₂ - ησ√T)]
//! - F = R·[(H/S)^(μ+λ)·N(ηz) + (H/S)^(μ-λ)·N(ηz - 2ηλσ√T)]
//!
//! E is the rebate of a knock-in option paid at expiry if the barrier was
//! never touched; F is the rebate of a knock-out option paid at the hit.
//!
//! # In-Out Parity
//!
//! With zero rebate, knock-in + knock-out = vanilla for every direction,
//! payoff and strike region. [`Combination::select`] is written so that the
//! coefficients of each in/out pair sum to A alone.

use num_traits::Float;
use pricer_core::traits::Priceable;
use pricer_core::types::{DomainError, PricingError};

use super::black_scholes::GeneralizedBlackScholes;
use super::distributions::{constant, norm_cdf};
use crate::instruments::{BarrierDirection, BarrierKind, OptionKind, OptionParameters};

/// Position of the strike relative to the barrier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrikeRegion {
    /// K ≥ H
    AtOrAboveBarrier,
    /// K < H
    BelowBarrier,
}

impl StrikeRegion {
    /// Classifies a strike against a barrier.
    #[inline]
    pub fn of(strike: f64, barrier: f64) -> Self {
        if strike >= barrier {
            StrikeRegion::AtOrAboveBarrier
        } else {
            StrikeRegion::BelowBarrier
        }
    }
}

/// Which rebate term a variant carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RebateTerm {
    /// E: knock-in rebate paid at expiry
    AtExpiry,
    /// F: knock-out rebate paid at the hit
    AtHit,
}

/// Signed combination of the terms A..D plus one rebate term.
///
/// # Examples
/// ```
/// use pricer_models::analytical::barrier::{Combination, RebateTerm, StrikeRegion};
/// use pricer_models::instruments::{BarrierKind, OptionKind};
///
/// let combo = Combination::select(BarrierKind::DownOut, OptionKind::Call, StrikeRegion::AtOrAboveBarrier);
/// assert_eq!(combo.coefficients, [1, 0, -1, 0]); // A - C
/// assert_eq!(combo.rebate, RebateTerm::AtHit); // + F
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Combination {
    /// Coefficients of A, B, C and D
    pub coefficients: [i8; 4],
    /// Rebate term added with coefficient +1
    pub rebate: RebateTerm,
}

impl Combination {
    const fn knock_in(coefficients: [i8; 4]) -> Self {
        Self {
            coefficients,
            rebate: RebateTerm::AtExpiry,
        }
    }

    const fn knock_out(coefficients: [i8; 4]) -> Self {
        Self {
            coefficients,
            rebate: RebateTerm::AtHit,
        }
    }

    /// Looks up the term combination of a variant.
    ///
    /// | Variant      | K ≥ H          | K < H          |
    /// |--------------|----------------|----------------|
    /// | down-in call | C + E          | A - B + D + E  |
    /// | up-in call   | A + E          | B - C + D + E  |
    /// | down-in put  | B - C + D + E  | A + E          |
    /// | up-in put    | A - B + D + E  | C + E          |
    /// | down-out call| A - C + F      | B - D + F      |
    /// | up-out call  | F              | A - B + C - D + F |
    /// | down-out put | A - B + C - D + F | F           |
    /// | up-out put   | B - D + F      | A - C + F      |
    pub fn select(barrier: BarrierKind, option: OptionKind, region: StrikeRegion) -> Self {
        use BarrierKind::*;
        use OptionKind::*;
        use StrikeRegion::*;

        match (barrier, option, region) {
            (DownIn, Call, AtOrAboveBarrier) => Self::knock_in([0, 0, 1, 0]),
            (DownIn, Call, BelowBarrier) => Self::knock_in([1, -1, 0, 1]),
            (UpIn, Call, AtOrAboveBarrier) => Self::knock_in([1, 0, 0, 0]),
            (UpIn, Call, BelowBarrier) => Self::knock_in([0, 1, -1, 1]),
            (DownIn, Put, AtOrAboveBarrier) => Self::knock_in([0, 1, -1, 1]),
            (DownIn, Put, BelowBarrier) => Self::knock_in([1, 0, 0, 0]),
            (UpIn, Put, AtOrAboveBarrier) => Self::knock_in([1, -1, 0, 1]),
            (UpIn, Put, BelowBarrier) => Self::knock_in([0, 0, 1, 0]),
            (DownOut, Call, AtOrAboveBarrier) => Self::knock_out([1, 0, -1, 0]),
            (DownOut, Call, BelowBarrier) => Self::knock_out([0, 1, 0, -1]),
            (UpOut, Call, AtOrAboveBarrier) => Self::knock_out([0, 0, 0, 0]),
            (UpOut, Call, BelowBarrier) => Self::knock_out([1, -1, 1, -1]),
            (DownOut, Put, AtOrAboveBarrier) => Self::knock_out([1, -1, 1, -1]),
            (DownOut, Put, BelowBarrier) => Self::knock_out([0, 0, 0, 0]),
            (UpOut, Put, AtOrAboveBarrier) => Self::knock_out([0, 1, 0, -1]),
            (UpOut, Put, BelowBarrier) => Self::knock_out([1, 0, -1, 0]),
        }
    }
}

/// The six Reiner-Rubinstein terms and the exponents they share.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float`
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReinerRubinsteinTerms<T: Float> {
    /// Vanilla term
    pub a: T,
    /// Vanilla term struck at the barrier
    pub b: T,
    /// Reflected vanilla term
    pub c: T,
    /// Reflected term struck at the barrier
    pub d: T,
    /// Knock-in rebate paid at expiry
    pub e: T,
    /// Knock-out rebate paid at the hit
    pub f: T,
    /// μ = (b - σ²/2) / σ²
    pub mu: T,
    /// λ = √(μ² + 2r/σ²)
    pub lambda: T,
}

impl<T: Float> ReinerRubinsteinTerms<T> {
    /// Evaluates all six terms.
    ///
    /// Inputs are assumed inside the domain (positive prices, volatility and
    /// time); [`BarrierPricer`] checks that before calling. With a zero
    /// rebate E and F are exactly zero.
    #[allow(clippy::too_many_arguments)]
    pub fn compute(
        spot: T,
        strike: T,
        barrier: T,
        rate: T,
        carry: T,
        volatility: T,
        expiry: T,
        rebate: T,
        option: OptionKind,
        direction: BarrierDirection,
    ) -> Self {
        let one = T::one();
        let two = constant::<T>(2.0);
        let phi = constant::<T>(option.sign());
        let eta = constant::<T>(direction.eta());

        let variance = volatility * volatility;
        let sigma_sqrt_t = volatility * expiry.sqrt();
        let mu = (carry - variance / two) / variance;
        let lambda = (mu * mu + two * rate / variance).sqrt();
        let drift = (one + mu) * sigma_sqrt_t;

        let x1 = (spot / strike).ln() / sigma_sqrt_t + drift;
        let x2 = (spot / barrier).ln() / sigma_sqrt_t + drift;
        let y1 = (barrier * barrier / (spot * strike)).ln() / sigma_sqrt_t + drift;
        let y2 = (barrier / spot).ln() / sigma_sqrt_t + drift;

        let spot_leg = spot * ((carry - rate) * expiry).exp();
        let strike_leg = strike * (-rate * expiry).exp();
        let ratio = barrier / spot;
        let reflect_spot = ratio.powf(two * (mu + one));
        let reflect_strike = ratio.powf(two * mu);

        let a = phi * spot_leg * norm_cdf(phi * x1) - phi * strike_leg * norm_cdf(phi * x1 - phi * sigma_sqrt_t);
        let b = phi * spot_leg * norm_cdf(phi * x2) - phi * strike_leg * norm_cdf(phi * x2 - phi * sigma_sqrt_t);
        let c = phi * spot_leg * reflect_spot * norm_cdf(eta * y1)
            - phi * strike_leg * reflect_strike * norm_cdf(eta * y1 - eta * sigma_sqrt_t);
        let d = phi * spot_leg * reflect_spot * norm_cdf(eta * y2)
            - phi * strike_leg * reflect_strike * norm_cdf(eta * y2 - eta * sigma_sqrt_t);

        // λ may be undefined for strongly negative rates; only evaluate the
        // rebate terms when a rebate is actually paid.
        let (e, f) = if rebate == T::zero() {
            (T::zero(), T::zero())
        } else {
            let e = rebate
                * (-rate * expiry).exp()
                * (norm_cdf(eta * x2 - eta * sigma_sqrt_t)
                    - reflect_strike * norm_cdf(eta * y2 - eta * sigma_sqrt_t));
            let z = (barrier / spot).ln() / sigma_sqrt_t + lambda * sigma_sqrt_t;
            let f = rebate
                * (ratio.powf(mu + lambda) * norm_cdf(eta * z)
                    + ratio.powf(mu - lambda) * norm_cdf(eta * z - two * eta * lambda * sigma_sqrt_t));
            (e, f)
        };

        Self {
            a,
            b,
            c,
            d,
            e,
            f,
            mu,
            lambda,
        }
    }

    /// Applies a combination from the case table.
    pub fn combine(&self, combination: Combination) -> T {
        let [ca, cb, cc, cd] = combination.coefficients;
        let weight = |coefficient: i8, term: T| constant::<T>(f64::from(coefficient)) * term;
        let rebate = match combination.rebate {
            RebateTerm::AtExpiry => self.e,
            RebateTerm::AtHit => self.f,
        };
        weight(ca, self.a) + weight(cb, self.b) + weight(cc, self.c) + weight(cd, self.d) + rebate
    }
}

/// How a barrier already breached at valuation is handled.
///
/// A down barrier is breached when S ≤ H, an up barrier when S ≥ H.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PlacementPolicy {
    /// Evaluate the formula as is
    #[default]
    Lenient,
    /// Reject with `DomainError::BarrierBreached`
    Strict,
}

/// Closed-form barrier option pricer.
///
/// Stateless apart from the placement policy; `Copy` and safe to share
/// across threads.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{BarrierPricer, PlacementPolicy};
/// use pricer_models::instruments::{BarrierKind, OptionKind, OptionParameters};
///
/// let params = OptionParameters::new(
///     OptionKind::Call, BarrierKind::DownOut,
///     100.0, 90.0, 95.0, 0.08, 0.04, 0.25, 0.5,
/// ).with_rebate(3.0);
///
/// let price = BarrierPricer::default().price(&params).unwrap();
/// assert!((price - 9.0246).abs() < 1e-3);
///
/// // Spot below a down barrier is rejected under the strict policy
/// let breached = params.with_spot(94.0);
/// assert!(BarrierPricer::new(PlacementPolicy::Strict).price(&breached).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BarrierPricer {
    placement: PlacementPolicy,
}

impl BarrierPricer {
    /// Creates a pricer with the given placement policy.
    pub fn new(placement: PlacementPolicy) -> Self {
        Self { placement }
    }

    /// Returns the placement policy.
    #[inline]
    pub fn placement(&self) -> PlacementPolicy {
        self.placement
    }

    fn check(&self, params: &OptionParameters) -> Result<(), DomainError> {
        params.validate()?;
        if self.placement == PlacementPolicy::Strict && params.is_breached() {
            return Err(DomainError::BarrierBreached {
                kind: params.barrier_kind.label(),
                spot: params.spot,
                barrier: params.barrier,
            });
        }
        Ok(())
    }

    /// Evaluates the six terms for a parameter set.
    ///
    /// # Errors
    /// `PricingError::Domain` when the parameters fail validation or the
    /// barrier is breached under the strict policy.
    pub fn terms(&self, params: &OptionParameters) -> Result<ReinerRubinsteinTerms<f64>, PricingError> {
        self.check(params)?;
        Ok(ReinerRubinsteinTerms::compute(
            params.spot,
            params.strike,
            params.barrier,
            params.rate,
            params.carry,
            params.volatility,
            params.time_to_expiry,
            params.rebate,
            params.option_kind,
            params.barrier_kind.direction(),
        ))
    }

    /// Prices a barrier option.
    ///
    /// # Errors
    /// - `DomainError::NonPositive` / `NonFinite` / `Negative` for parameters
    ///   outside the domain
    /// - `DomainError::BarrierBreached` under the strict policy
    /// - `DomainError::NonFiniteResult` if the formula overflows
    pub fn price(&self, params: &OptionParameters) -> Result<f64, PricingError> {
        let terms = self.terms(params)?;
        let combination = Combination::select(
            params.barrier_kind,
            params.option_kind,
            StrikeRegion::of(params.strike, params.barrier),
        );
        let price = terms.combine(combination);
        Ok(DomainError::require_finite_result("barrier option price", price)?)
    }

    /// Prices the vanilla option with the same terms and no barrier.
    ///
    /// # Errors
    /// As for [`price`](Self::price), without the placement check.
    pub fn vanilla(&self, params: &OptionParameters) -> Result<f64, PricingError> {
        params.validate()?;
        let model = GeneralizedBlackScholes::new(params.spot, params.rate, params.carry, params.volatility)?;
        let price = model.price(params.option_kind, params.strike, params.time_to_expiry);
        Ok(DomainError::require_finite_result("vanilla option price", price)?)
    }
}

impl Priceable<f64> for OptionParameters {
    fn price(&self) -> Result<f64, PricingError> {
        BarrierPricer::default().price(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(option: OptionKind, barrier: BarrierKind, strike: f64, level: f64) -> OptionParameters {
        OptionParameters::new(option, barrier, 100.0, strike, level, 0.08, 0.04, 0.25, 0.5)
    }

    // ==========================================================
    // Case Table
    // ==========================================================

    #[test]
    fn test_case_table_in_out_pairs_sum_to_vanilla() {
        for option in OptionKind::ALL {
            for region in [StrikeRegion::AtOrAboveBarrier, StrikeRegion::BelowBarrier] {
                for (knock_in, knock_out) in [
                    (BarrierKind::DownIn, BarrierKind::DownOut),
                    (BarrierKind::UpIn, BarrierKind::UpOut),
                ] {
                    let i = Combination::select(knock_in, option, region);
                    let o = Combination::select(knock_out, option, region);
                    let sum: Vec<i8> = (0..4).map(|n| i.coefficients[n] + o.coefficients[n]).collect();
                    assert_eq!(sum, vec![1, 0, 0, 0], "{:?} {:?} {:?}", knock_in, option, region);
                    assert_eq!(i.rebate, RebateTerm::AtExpiry);
                    assert_eq!(o.rebate, RebateTerm::AtHit);
                }
            }
        }
    }

    #[test]
    fn test_strike_region_boundary() {
        assert_eq!(StrikeRegion::of(100.0, 100.0), StrikeRegion::AtOrAboveBarrier);
        assert_eq!(StrikeRegion::of(99.0, 100.0), StrikeRegion::BelowBarrier);
    }

    // ==========================================================
    // Terms
    // ==========================================================

    #[test]
    fn test_term_a_is_vanilla() {
        let pricer = BarrierPricer::default();
        for option in OptionKind::ALL {
            let p = params(option, BarrierKind::DownOut, 100.0, 95.0);
            let terms = pricer.terms(&p).unwrap();
            assert_relative_eq!(terms.a, pricer.vanilla(&p).unwrap(), epsilon = 1e-10);
        }
    }

    #[test]
    fn test_zero_rebate_terms_vanish() {
        let terms = BarrierPricer::default()
            .terms(&params(OptionKind::Call, BarrierKind::UpOut, 100.0, 120.0))
            .unwrap();
        assert_eq!(terms.e, 0.0);
        assert_eq!(terms.f, 0.0);
    }

    #[test]
    fn test_mu_lambda() {
        let terms = BarrierPricer::default()
            .terms(&params(OptionKind::Call, BarrierKind::UpOut, 100.0, 120.0))
            .unwrap();
        // μ = (0.04 - 0.03125) / 0.0625
        assert_relative_eq!(terms.mu, 0.14, epsilon = 1e-12);
        assert_relative_eq!(terms.lambda, (0.14_f64 * 0.14 + 2.0 * 0.08 / 0.0625).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_terms_f32() {
        let terms = ReinerRubinsteinTerms::compute(
            100.0_f32,
            100.0,
            95.0,
            0.08,
            0.04,
            0.25,
            0.5,
            3.0,
            OptionKind::Call,
            BarrierDirection::Down,
        );
        let price = terms.combine(Combination::select(
            BarrierKind::DownOut,
            OptionKind::Call,
            StrikeRegion::AtOrAboveBarrier,
        ));
        assert!((price - 6.7924).abs() < 1e-2);
    }

    // ==========================================================
    // Pricer
    // ==========================================================

    #[test]
    fn test_in_out_parity() {
        let pricer = BarrierPricer::default();
        for option in OptionKind::ALL {
            for (kind, level) in [(BarrierKind::DownIn, 90.0), (BarrierKind::UpIn, 115.0)] {
                for strike in [85.0, 100.0, 120.0] {
                    let knock_in = params(option, kind, strike, level);
                    let knock_out = knock_in.with_barrier_kind(kind.counterpart());
                    let total = pricer.price(&knock_in).unwrap() + pricer.price(&knock_out).unwrap();
                    let vanilla = pricer.vanilla(&knock_in).unwrap();
                    assert_relative_eq!(total, vanilla, max_relative = 1e-9, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_up_out_call_below_strike_is_rebate_only() {
        // K ≥ H: the call can only pay after crossing H, which kills it
        let p = params(OptionKind::Call, BarrierKind::UpOut, 110.0, 105.0);
        assert_eq!(BarrierPricer::default().price(&p).unwrap(), 0.0);
    }

    #[test]
    fn test_lenient_breached_evaluates_formula() {
        let p = params(OptionKind::Call, BarrierKind::DownOut, 100.0, 100.0).with_rebate(3.0);
        assert_relative_eq!(BarrierPricer::default().price(&p).unwrap(), 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_strict_rejects_breached() {
        let pricer = BarrierPricer::new(PlacementPolicy::Strict);
        let p = params(OptionKind::Put, BarrierKind::UpIn, 100.0, 95.0);
        assert_eq!(
            pricer.price(&p).unwrap_err(),
            PricingError::Domain(DomainError::BarrierBreached {
                kind: "up-and-in",
                spot: 100.0,
                barrier: 95.0,
            })
        );
        assert!(pricer.price(&p.with_barrier(105.0)).is_ok());
    }

    #[test]
    fn test_domain_errors() {
        let pricer = BarrierPricer::default();
        let p = params(OptionKind::Call, BarrierKind::DownOut, 100.0, 90.0);

        let err = pricer.price(&p.with_volatility(0.0)).unwrap_err();
        assert_eq!(
            err,
            PricingError::Domain(DomainError::NonPositive {
                field: "volatility",
                value: 0.0
            })
        );
        assert!(pricer.price(&p.with_time_to_expiry(-1.0)).unwrap_err().is_domain());
        assert!(pricer.price(&p.with_spot(f64::NAN)).unwrap_err().is_domain());
        assert!(pricer.price(&p.with_rebate(-1.0)).unwrap_err().is_domain());
    }

    #[test]
    fn test_undefined_lambda_with_rebate_is_non_finite() {
        // μ² + 2r/σ² < 0
        let p = OptionParameters::new(
            OptionKind::Call,
            BarrierKind::DownOut,
            100.0,
            100.0,
            90.0,
            -0.05,
            0.0,
            0.2,
            1.0,
        );
        assert!(BarrierPricer::default().price(&p).is_ok());
        assert_eq!(
            BarrierPricer::default().price(&p.with_rebate(1.0)).unwrap_err(),
            PricingError::Domain(DomainError::NonFiniteResult {
                quantity: "barrier option price"
            })
        );
    }

    #[test]
    fn test_priceable_impl() {
        let p = params(OptionKind::Put, BarrierKind::DownIn, 100.0, 90.0);
        assert_eq!(Priceable::price(&p).unwrap(), BarrierPricer::default().price(&p).unwrap());
    }
}
