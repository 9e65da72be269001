//! Generalized Black-Scholes-Merton model with cost of carry.
//!
//! The carry rate `b` covers the classic special cases in one formula:
//! - `b = r`: Black-Scholes (non-dividend stock)
//! - `b = r - q`: Merton (continuous dividend yield q)
//! - `b = 0`: Black-76 (futures option)
//! - `b = r - r_f`: Garman-Kohlhagen (FX)
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^((b-r)T)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^((b-r)T)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (b + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! This is the vanilla counterpart of every barrier option: knock-in plus
//! knock-out with the same terms and zero rebate equals this price.

use num_traits::Float;
use pricer_core::types::DomainError;

use super::distributions::{constant, norm_cdf, norm_pdf};
use crate::instruments::OptionKind;

/// Generalized Black-Scholes-Merton model for European options.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_models::analytical::GeneralizedBlackScholes;
///
/// // Non-dividend stock: carry equals the rate
/// let bs = GeneralizedBlackScholes::new(100.0_f64, 0.05, 0.05, 0.2).unwrap();
/// let call = bs.price_call(100.0, 1.0);
/// let put = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S·e^((b-r)T) - K·e^(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GeneralizedBlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Cost-of-carry rate (b)
    carry: T,
    /// Volatility (σ)
    volatility: T,
}

fn as_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

impl<T: Float> GeneralizedBlackScholes<T> {
    /// Creates a new model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised, may be negative)
    /// * `carry` - Cost-of-carry rate (annualised, may be negative)
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// - `DomainError::NonPositive` if spot or volatility <= 0
    /// - `DomainError::NonFinite` if any input is NaN or infinite
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::GeneralizedBlackScholes;
    ///
    /// assert!(GeneralizedBlackScholes::new(100.0_f64, 0.05, 0.02, 0.2).is_ok());
    /// assert!(GeneralizedBlackScholes::new(-100.0_f64, 0.05, 0.02, 0.2).is_err());
    /// assert!(GeneralizedBlackScholes::new(100.0_f64, 0.05, 0.02, 0.0).is_err());
    /// ```
    pub fn new(spot: T, rate: T, carry: T, volatility: T) -> Result<Self, DomainError> {
        DomainError::require_positive("spot", as_f64(spot))?;
        DomainError::require_finite("rate", as_f64(rate))?;
        DomainError::require_finite("carry", as_f64(carry))?;
        DomainError::require_positive("volatility", as_f64(volatility))?;

        Ok(Self {
            spot,
            rate,
            carry,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the cost-of-carry rate.
    #[inline]
    pub fn carry(&self) -> T {
        self.carry
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Carry discount e^((b-r)T) applied to the spot leg.
    #[inline]
    fn carry_factor(&self, expiry: T) -> T {
        ((self.carry - self.rate) * expiry).exp()
    }

    fn expired(expiry: T) -> bool {
        expiry <= constant(1e-10)
    }

    /// Computes the d1 term.
    ///
    /// d₁ = (ln(S/K) + (b + σ²/2)T) / (σ√T)
    ///
    /// At expiry the term diverges; a large value with the sign of
    /// moneyness is returned instead.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            let large = constant::<T>(100.0);
            return if self.spot > strike {
                large
            } else if self.spot < strike {
                -large
            } else {
                T::zero()
            };
        }

        let sigma_sqrt_t = self.volatility * expiry.sqrt();
        let drift = self.carry + self.volatility * self.volatility * constant(0.5);
        ((self.spot / strike).ln() + drift * expiry) / sigma_sqrt_t
    }

    /// Computes the d2 term.
    ///
    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return self.d1(strike, expiry);
        }
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Computes the European call price.
    ///
    /// Returns the intrinsic value max(S - K, 0) at expiry.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::GeneralizedBlackScholes;
    ///
    /// let bs = GeneralizedBlackScholes::new(100.0_f64, 0.05, 0.05, 0.2).unwrap();
    /// assert!((bs.price_call(100.0, 1.0) - 10.4506).abs() < 1e-4);
    /// ```
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return (self.spot - strike).max(T::zero());
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();

        self.spot * self.carry_factor(expiry) * norm_cdf(d1) - strike * discount * norm_cdf(d2)
    }

    /// Computes the European put price.
    ///
    /// Returns the intrinsic value max(K - S, 0) at expiry.
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return (strike - self.spot).max(T::zero());
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();

        strike * discount * norm_cdf(-d2) - self.spot * self.carry_factor(expiry) * norm_cdf(-d1)
    }

    /// Prices a call or a put.
    #[inline]
    pub fn price(&self, kind: OptionKind, strike: T, expiry: T) -> T {
        match kind {
            OptionKind::Call => self.price_call(strike, expiry),
            OptionKind::Put => self.price_put(strike, expiry),
        }
    }

    /// Computes Delta (∂V/∂S).
    ///
    /// - Call Delta = e^((b-r)T)·N(d₁)
    /// - Put Delta = e^((b-r)T)·(N(d₁) - 1)
    pub fn delta(&self, kind: OptionKind, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return match kind {
                OptionKind::Call if self.spot > strike => T::one(),
                OptionKind::Put if self.spot < strike => -T::one(),
                _ => T::zero(),
            };
        }

        let n_d1 = norm_cdf(self.d1(strike, expiry));
        let carry_factor = self.carry_factor(expiry);
        match kind {
            OptionKind::Call => carry_factor * n_d1,
            OptionKind::Put => carry_factor * (n_d1 - T::one()),
        }
    }

    /// Computes Gamma (∂²V/∂S²), identical for calls and puts.
    ///
    /// Gamma = e^((b-r)T)·n(d₁) / (S·σ·√T)
    pub fn gamma(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return T::zero();
        }

        let d1 = self.d1(strike, expiry);
        self.carry_factor(expiry) * norm_pdf(d1) / (self.spot * self.volatility * expiry.sqrt())
    }

    /// Computes Vega (∂V/∂σ), identical for calls and puts.
    ///
    /// Vega = S·e^((b-r)T)·n(d₁)·√T
    pub fn vega(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return T::zero();
        }

        let d1 = self.d1(strike, expiry);
        self.spot * self.carry_factor(expiry) * norm_pdf(d1) * expiry.sqrt()
    }

    /// Computes Theta (-∂V/∂T), the value change as calendar time passes.
    ///
    /// - Call: -S·e^((b-r)T)·n(d₁)·σ/(2√T) - (b-r)·S·e^((b-r)T)·N(d₁) - r·K·e^(-rT)·N(d₂)
    /// - Put: -S·e^((b-r)T)·n(d₁)·σ/(2√T) + (b-r)·S·e^((b-r)T)·N(-d₁) + r·K·e^(-rT)·N(-d₂)
    pub fn theta(&self, kind: OptionKind, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return T::zero();
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let spot_leg = self.spot * self.carry_factor(expiry);
        let discount = (-self.rate * expiry).exp();
        let decay = -spot_leg * norm_pdf(d1) * self.volatility / (constant::<T>(2.0) * expiry.sqrt());
        let excess_carry = self.carry - self.rate;

        match kind {
            OptionKind::Call => {
                decay - excess_carry * spot_leg * norm_cdf(d1)
                    - self.rate * strike * discount * norm_cdf(d2)
            }
            OptionKind::Put => {
                decay
                    + excess_carry * spot_leg * norm_cdf(-d1)
                    + self.rate * strike * discount * norm_cdf(-d2)
            }
        }
    }

    /// Computes Rho (∂V/∂r) with the carry rate moving together with r.
    ///
    /// - Call Rho = K·T·e^(-rT)·N(d₂)
    /// - Put Rho = -K·T·e^(-rT)·N(-d₂)
    pub fn rho(&self, kind: OptionKind, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return T::zero();
        }

        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();
        match kind {
            OptionKind::Call => strike * expiry * discount * norm_cdf(d2),
            OptionKind::Put => -strike * expiry * discount * norm_cdf(-d2),
        }
    }
}
