//! Greeks calculation configuration.
//!
//! Provides [`GreeksConfig`] for the bump sizes, extrapolation and quoting
//! conventions of the finite-difference engine.

use pricer_core::types::ValidationError;
use pricer_models::analytical::PlacementPolicy;

use super::result::QuoteConvention;

/// Configuration for Greeks calculation.
///
/// Use the builder pattern via [`GreeksConfig::builder()`] for construction.
///
/// # Default Values
///
/// | Parameter | Default | Description |
/// |-----------|---------|-------------|
/// | `spot_bump_relative` | 0.01 (1%) | Relative bump for spot price |
/// | `vol_bump_absolute` | 0.01 | Absolute bump for volatility |
/// | `time_bump_years` | 1/365 | Time bump in years (1 calendar day) |
/// | `rate_bump_absolute` | 0.0001 | Absolute bump for interest rate (1bp) |
/// | `richardson` | true | Richardson extrapolation of first derivatives |
/// | `rate_bump_moves_carry` | true | Bump the carry rate together with the rate |
/// | `quote` | `Market` | Unit convention of reported values |
/// | `placement` | `Lenient` | Barrier placement policy of the pricer |
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::greeks::{GreeksConfig, QuoteConvention};
///
/// // Use defaults
/// let config = GreeksConfig::default();
/// assert!(config.richardson);
///
/// // Use builder for custom values
/// let config = GreeksConfig::builder()
///     .spot_bump_relative(0.005)
///     .quote(QuoteConvention::Raw)
///     .build()
///     .unwrap();
/// assert_eq!(config.spot_bump_relative, 0.005);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GreeksConfig {
    /// Relative bump for spot price (default: 0.01 = 1%).
    ///
    /// The actual bump is `spot_bump_relative * spot`.
    pub spot_bump_relative: f64,

    /// Absolute bump for volatility (default: 0.01 = 1 vol point).
    pub vol_bump_absolute: f64,

    /// Time bump in years (default: 1/365, one calendar day).
    pub time_bump_years: f64,

    /// Absolute bump for the risk-free rate (default: 0.0001 = 1bp).
    pub rate_bump_absolute: f64,

    /// Apply Richardson extrapolation (4·D(h/2) - D(h)) / 3 to first
    /// derivatives.
    pub richardson: bool,

    /// Bump the carry rate b together with r when computing rho.
    ///
    /// Matches the equity convention b = r - q with a fixed dividend yield.
    pub rate_bump_moves_carry: bool,

    /// Unit convention of the reported sensitivities.
    pub quote: QuoteConvention,

    /// Barrier placement policy applied to every revaluation.
    pub placement: PlacementPolicy,
}

impl Default for GreeksConfig {
    fn default() -> Self {
        Self {
            spot_bump_relative: 0.01,
            vol_bump_absolute: 0.01,
            time_bump_years: 1.0 / 365.0,
            rate_bump_absolute: 1e-4,
            richardson: true,
            rate_bump_moves_carry: true,
            quote: QuoteConvention::default(),
            placement: PlacementPolicy::default(),
        }
    }
}

fn check_bump(field: &str, value: f64, max: f64, unit: &str) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidConfig(format!(
            "{} must be positive, got {}",
            field, value
        )));
    }
    if value > max {
        return Err(ValidationError::InvalidConfig(format!(
            "{} must be <= {} ({}), got {}",
            field, max, unit, value
        )));
    }
    Ok(())
}

impl GreeksConfig {
    /// Creates a new builder for constructing a `GreeksConfig`.
    pub fn builder() -> GreeksConfigBuilder {
        GreeksConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidConfig` naming the first bump that is not
    /// positive or exceeds its sanity bound.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_bump("spot_bump_relative", self.spot_bump_relative, 0.5, "50% of spot")?;
        check_bump("vol_bump_absolute", self.vol_bump_absolute, 0.5, "50 vol points")?;
        check_bump("time_bump_years", self.time_bump_years, 1.0, "1 year")?;
        check_bump("rate_bump_absolute", self.rate_bump_absolute, 0.1, "10%")?;
        Ok(())
    }

    /// Computes the absolute spot bump for a given spot price.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::greeks::GreeksConfig;
    ///
    /// let config = GreeksConfig::default(); // 1% bump
    /// let bump = config.compute_spot_bump(100.0);
    /// assert!((bump - 1.0).abs() < 1e-10);
    /// ```
    #[inline]
    pub fn compute_spot_bump(&self, spot: f64) -> f64 {
        (self.spot_bump_relative * spot).max(1e-8)
    }
}

/// Builder for [`GreeksConfig`].
///
/// Unset fields take the default values.
#[derive(Debug, Default)]
pub struct GreeksConfigBuilder {
    spot_bump_relative: Option<f64>,
    vol_bump_absolute: Option<f64>,
    time_bump_years: Option<f64>,
    rate_bump_absolute: Option<f64>,
    richardson: Option<bool>,
    rate_bump_moves_carry: Option<bool>,
    quote: Option<QuoteConvention>,
    placement: Option<PlacementPolicy>,
}

impl GreeksConfigBuilder {
    /// Sets the relative spot bump (default: 0.01 = 1%).
    pub fn spot_bump_relative(mut self, bump: f64) -> Self {
        self.spot_bump_relative = Some(bump);
        self
    }

    /// Sets the absolute volatility bump (default: 0.01).
    pub fn vol_bump_absolute(mut self, bump: f64) -> Self {
        self.vol_bump_absolute = Some(bump);
        self
    }

    /// Sets the time bump in years (default: 1/365).
    pub fn time_bump_years(mut self, bump: f64) -> Self {
        self.time_bump_years = Some(bump);
        self
    }

    /// Sets the absolute rate bump (default: 0.0001).
    pub fn rate_bump_absolute(mut self, bump: f64) -> Self {
        self.rate_bump_absolute = Some(bump);
        self
    }

    /// Enables or disables Richardson extrapolation (default: enabled).
    pub fn richardson(mut self, enabled: bool) -> Self {
        self.richardson = Some(enabled);
        self
    }

    /// Whether the rho bump also moves the carry rate (default: true).
    pub fn rate_bump_moves_carry(mut self, moves: bool) -> Self {
        self.rate_bump_moves_carry = Some(moves);
        self
    }

    /// Sets the quote convention (default: `Market`).
    pub fn quote(mut self, quote: QuoteConvention) -> Self {
        self.quote = Some(quote);
        self
    }

    /// Sets the barrier placement policy (default: `Lenient`).
    pub fn placement(mut self, placement: PlacementPolicy) -> Self {
        self.placement = Some(placement);
        self
    }

    /// Builds the configuration, validating all parameters.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidConfig` if any bump is invalid.
    pub fn build(self) -> Result<GreeksConfig, ValidationError> {
        let defaults = GreeksConfig::default();
        let config = GreeksConfig {
            spot_bump_relative: self.spot_bump_relative.unwrap_or(defaults.spot_bump_relative),
            vol_bump_absolute: self.vol_bump_absolute.unwrap_or(defaults.vol_bump_absolute),
            time_bump_years: self.time_bump_years.unwrap_or(defaults.time_bump_years),
            rate_bump_absolute: self.rate_bump_absolute.unwrap_or(defaults.rate_bump_absolute),
            richardson: self.richardson.unwrap_or(defaults.richardson),
            rate_bump_moves_carry: self
                .rate_bump_moves_carry
                .unwrap_or(defaults.rate_bump_moves_carry),
            quote: self.quote.unwrap_or(defaults.quote),
            placement: self.placement.unwrap_or(defaults.placement),
        };

        config.validate()?;
        Ok(config)
    }
}
