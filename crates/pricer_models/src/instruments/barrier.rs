//! Barrier option contract terms.
//!
//! A single-barrier European option is described by:
//! - [`OptionKind`]: call or put payoff
//! - [`BarrierKind`]: one of the four barrier variants, itself the
//!   combination of a [`BarrierDirection`] and a [`KnockType`]
//! - [`OptionParameters`]: the full, immutable parameter set
//!
//! Parameters are plain `Copy` values. Sensitivity bumping works on copies
//! produced by the `with_*` helpers, so an input set is never mutated.

use chrono::NaiveDate;
use pricer_core::types::{year_fraction, DomainError, ValidationError};
use std::fmt;
use std::str::FromStr;

/// Option payoff type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionKind {
    /// Call option: max(S - K, 0)
    Call,
    /// Put option: max(K - S, 0)
    Put,
}

impl OptionKind {
    /// All option kinds.
    pub const ALL: [OptionKind; 2] = [OptionKind::Call, OptionKind::Put];

    /// Payoff sign φ: +1 for a call, -1 for a put.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            OptionKind::Call => 1.0,
            OptionKind::Put => -1.0,
        }
    }

    /// Intrinsic value at a given spot.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::OptionKind;
    ///
    /// assert_eq!(OptionKind::Call.intrinsic(110.0, 100.0), 10.0);
    /// assert_eq!(OptionKind::Put.intrinsic(110.0, 100.0), 0.0);
    /// ```
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        (self.sign() * (spot - strike)).max(0.0)
    }

    /// Lower-case label.
    pub fn label(&self) -> &'static str {
        match self {
            OptionKind::Call => "call",
            OptionKind::Put => "put",
        }
    }
}

impl FromStr for OptionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionKind::Call),
            "put" | "p" => Ok(OptionKind::Put),
            _ => Err(ValidationError::UnknownVariant {
                kind: "option kind",
                value: s.to_string(),
                expected: "call, put",
            }),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Side of spot on which the barrier sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BarrierDirection {
    /// Barrier above spot, monitored for an upward crossing
    Up,
    /// Barrier below spot, monitored for a downward crossing
    Down,
}

impl BarrierDirection {
    /// Direction sign η: +1 for down barriers, -1 for up barriers.
    #[inline]
    pub fn eta(&self) -> f64 {
        match self {
            BarrierDirection::Down => 1.0,
            BarrierDirection::Up => -1.0,
        }
    }
}

/// What happens when the barrier is touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KnockType {
    /// The option comes into existence at the first touch
    In,
    /// The option is extinguished at the first touch
    Out,
}

/// Single-barrier variant.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{BarrierDirection, BarrierKind, KnockType};
///
/// let kind: BarrierKind = "down-and-out".parse().unwrap();
/// assert_eq!(kind, BarrierKind::DownOut);
/// assert_eq!(kind.direction(), BarrierDirection::Down);
/// assert_eq!(kind.knock(), KnockType::Out);
/// assert_eq!(kind.counterpart(), BarrierKind::DownIn);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BarrierKind {
    /// Up-and-in
    #[cfg_attr(feature = "serde", serde(rename = "up-and-in", alias = "up-in"))]
    UpIn,
    /// Up-and-out
    #[cfg_attr(feature = "serde", serde(rename = "up-and-out", alias = "up-out"))]
    UpOut,
    /// Down-and-in
    #[cfg_attr(feature = "serde", serde(rename = "down-and-in", alias = "down-in"))]
    DownIn,
    /// Down-and-out
    #[cfg_attr(feature = "serde", serde(rename = "down-and-out", alias = "down-out"))]
    DownOut,
}

impl BarrierKind {
    /// All four barrier variants.
    pub const ALL: [BarrierKind; 4] = [
        BarrierKind::UpIn,
        BarrierKind::UpOut,
        BarrierKind::DownIn,
        BarrierKind::DownOut,
    ];

    /// Builds a variant from its direction and knock type.
    pub fn from_parts(direction: BarrierDirection, knock: KnockType) -> Self {
        match (direction, knock) {
            (BarrierDirection::Up, KnockType::In) => BarrierKind::UpIn,
            (BarrierDirection::Up, KnockType::Out) => BarrierKind::UpOut,
            (BarrierDirection::Down, KnockType::In) => BarrierKind::DownIn,
            (BarrierDirection::Down, KnockType::Out) => BarrierKind::DownOut,
        }
    }

    /// Barrier direction.
    #[inline]
    pub fn direction(&self) -> BarrierDirection {
        match self {
            BarrierKind::UpIn | BarrierKind::UpOut => BarrierDirection::Up,
            BarrierKind::DownIn | BarrierKind::DownOut => BarrierDirection::Down,
        }
    }

    /// Knock type.
    #[inline]
    pub fn knock(&self) -> KnockType {
        match self {
            BarrierKind::UpIn | BarrierKind::DownIn => KnockType::In,
            BarrierKind::UpOut | BarrierKind::DownOut => KnockType::Out,
        }
    }

    /// The variant with the same direction and the opposite knock type.
    pub fn counterpart(&self) -> Self {
        let knock = match self.knock() {
            KnockType::In => KnockType::Out,
            KnockType::Out => KnockType::In,
        };
        Self::from_parts(self.direction(), knock)
    }

    /// Whether spot already sits on the wrong side of the barrier.
    ///
    /// An up barrier is breached when `spot >= barrier`, a down barrier when
    /// `spot <= barrier`.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::BarrierKind;
    ///
    /// assert!(BarrierKind::UpOut.is_breached(120.0, 110.0));
    /// assert!(!BarrierKind::DownOut.is_breached(100.0, 90.0));
    /// ```
    #[inline]
    pub fn is_breached(&self, spot: f64, barrier: f64) -> bool {
        match self.direction() {
            BarrierDirection::Up => spot >= barrier,
            BarrierDirection::Down => spot <= barrier,
        }
    }

    /// Kebab-case label, e.g. `"down-and-out"`.
    pub fn label(&self) -> &'static str {
        match self {
            BarrierKind::UpIn => "up-and-in",
            BarrierKind::UpOut => "up-and-out",
            BarrierKind::DownIn => "down-and-in",
            BarrierKind::DownOut => "down-and-out",
        }
    }
}

impl FromStr for BarrierKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalised.as_str() {
            "up-and-in" | "up-in" | "ui" => Ok(BarrierKind::UpIn),
            "up-and-out" | "up-out" | "uo" => Ok(BarrierKind::UpOut),
            "down-and-in" | "down-in" | "di" => Ok(BarrierKind::DownIn),
            "down-and-out" | "down-out" | "do" => Ok(BarrierKind::DownOut),
            _ => Err(ValidationError::UnknownVariant {
                kind: "barrier kind",
                value: s.to_string(),
                expected: "up-and-in, up-and-out, down-and-in, down-and-out",
            }),
        }
    }
}

impl fmt::Display for BarrierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Complete parameter set of a single-barrier European option.
///
/// All rates are continuously compounded and annualised; the time to expiry
/// is in years. The carry rate `b` is `r` for a non-dividend stock, `r - q`
/// with a dividend yield `q`, `0` for a futures underlying.
///
/// Fields are public; [`validate`](Self::validate) checks the domain and is
/// applied by every pricer.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{BarrierKind, OptionKind, OptionParameters};
///
/// let params = OptionParameters::new(
///     OptionKind::Put,
///     BarrierKind::DownIn,
///     100.0, // spot
///     100.0, // strike
///     90.0,  // barrier
///     0.05,  // rate
///     0.03,  // carry
///     0.25,  // volatility
///     0.5,   // time to expiry
/// );
/// assert!(params.validate().is_ok());
///
/// let bumped = params.with_spot(101.0);
/// assert_eq!(bumped.spot, 101.0);
/// assert_eq!(params.spot, 100.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionParameters {
    /// Call or put
    pub option_kind: OptionKind,
    /// Barrier variant
    pub barrier_kind: BarrierKind,
    /// Spot price (S)
    pub spot: f64,
    /// Strike price (K)
    pub strike: f64,
    /// Barrier level (H)
    pub barrier: f64,
    /// Risk-free rate (r)
    pub rate: f64,
    /// Cost-of-carry rate (b)
    pub carry: f64,
    /// Volatility (σ)
    pub volatility: f64,
    /// Time to expiry in years (T)
    pub time_to_expiry: f64,
    /// Cash rebate (R): paid at expiry for knock-in options that never
    /// knocked in, at the hit for knock-out options
    #[cfg_attr(feature = "serde", serde(default))]
    pub rebate: f64,
}

impl OptionParameters {
    /// Creates a parameter set with zero rebate.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        option_kind: OptionKind,
        barrier_kind: BarrierKind,
        spot: f64,
        strike: f64,
        barrier: f64,
        rate: f64,
        carry: f64,
        volatility: f64,
        time_to_expiry: f64,
    ) -> Self {
        Self {
            option_kind,
            barrier_kind,
            spot,
            strike,
            barrier,
            rate,
            carry,
            volatility,
            time_to_expiry,
            rebate: 0.0,
        }
    }

    /// Starts a builder.
    pub fn builder() -> OptionParametersBuilder {
        OptionParametersBuilder::default()
    }

    /// Checks that the parameters are inside the pricing domain.
    ///
    /// # Errors
    /// - `DomainError::NonPositive` for spot, strike, barrier, volatility or
    ///   time to expiry <= 0
    /// - `DomainError::Negative` for a negative rebate
    /// - `DomainError::NonFinite` for any NaN or infinite field
    pub fn validate(&self) -> Result<(), DomainError> {
        DomainError::require_positive("spot", self.spot)?;
        DomainError::require_positive("strike", self.strike)?;
        DomainError::require_positive("barrier", self.barrier)?;
        DomainError::require_finite("rate", self.rate)?;
        DomainError::require_finite("carry", self.carry)?;
        DomainError::require_positive("volatility", self.volatility)?;
        DomainError::require_positive("time_to_expiry", self.time_to_expiry)?;
        DomainError::require_non_negative("rebate", self.rebate)?;
        Ok(())
    }

    /// Whether spot already sits on the wrong side of the barrier.
    #[inline]
    pub fn is_breached(&self) -> bool {
        self.barrier_kind.is_breached(self.spot, self.barrier)
    }

    /// Dividend yield implied by the carry: q = r - b.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.rate - self.carry
    }

    /// Copy with a different spot.
    #[inline]
    pub fn with_spot(self, spot: f64) -> Self {
        Self { spot, ..self }
    }

    /// Copy with a different volatility.
    #[inline]
    pub fn with_volatility(self, volatility: f64) -> Self {
        Self { volatility, ..self }
    }

    /// Copy with a different time to expiry.
    #[inline]
    pub fn with_time_to_expiry(self, time_to_expiry: f64) -> Self {
        Self {
            time_to_expiry,
            ..self
        }
    }

    /// Copy with a different risk-free rate; the carry is left unchanged.
    #[inline]
    pub fn with_rate(self, rate: f64) -> Self {
        Self { rate, ..self }
    }

    /// Copy with a different carry rate.
    #[inline]
    pub fn with_carry(self, carry: f64) -> Self {
        Self { carry, ..self }
    }

    /// Copy with a different barrier level.
    #[inline]
    pub fn with_barrier(self, barrier: f64) -> Self {
        Self { barrier, ..self }
    }

    /// Copy with a different rebate.
    #[inline]
    pub fn with_rebate(self, rebate: f64) -> Self {
        Self { rebate, ..self }
    }

    /// Copy with a different barrier variant.
    #[inline]
    pub fn with_barrier_kind(self, barrier_kind: BarrierKind) -> Self {
        Self {
            barrier_kind,
            ..self
        }
    }

    /// Copy with a different option kind.
    #[inline]
    pub fn with_option_kind(self, option_kind: OptionKind) -> Self {
        Self {
            option_kind,
            ..self
        }
    }
}

/// Builder for [`OptionParameters`].
///
/// Every field is required except:
/// - `carry`: defaults to the rate (no dividend), or `rate - dividend_yield`
///   when a dividend yield is given
/// - `rebate`: defaults to zero
///
/// `build` only checks presence and finiteness. Domain checks (positivity,
/// barrier placement) belong to the pricer.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{BarrierKind, OptionKind, OptionParameters};
/// use pricer_core::types::ValidationError;
///
/// let err = OptionParameters::builder()
///     .option_kind(OptionKind::Call)
///     .barrier_kind(BarrierKind::UpOut)
///     .spot(100.0)
///     .build()
///     .unwrap_err();
/// assert_eq!(err, ValidationError::MissingField { field: "strike" });
/// ```
#[derive(Clone, Debug, Default)]
pub struct OptionParametersBuilder {
    option_kind: Option<OptionKind>,
    barrier_kind: Option<BarrierKind>,
    spot: Option<f64>,
    strike: Option<f64>,
    barrier: Option<f64>,
    rate: Option<f64>,
    carry: Option<f64>,
    dividend_yield: Option<f64>,
    volatility: Option<f64>,
    time_to_expiry: Option<f64>,
    rebate: Option<f64>,
}

impl OptionParametersBuilder {
    /// Sets the option kind.
    pub fn option_kind(mut self, kind: OptionKind) -> Self {
        self.option_kind = Some(kind);
        self
    }

    /// Sets the barrier variant.
    pub fn barrier_kind(mut self, kind: BarrierKind) -> Self {
        self.barrier_kind = Some(kind);
        self
    }

    /// Sets the spot price.
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the strike.
    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Sets the barrier level.
    pub fn barrier(mut self, barrier: f64) -> Self {
        self.barrier = Some(barrier);
        self
    }

    /// Sets the risk-free rate.
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Sets the cost-of-carry rate directly.
    pub fn carry(mut self, carry: f64) -> Self {
        self.carry = Some(carry);
        self
    }

    /// Sets a continuous dividend yield; the carry becomes `rate - q`.
    pub fn dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = Some(dividend_yield);
        self
    }

    /// Sets the volatility.
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the time to expiry in years.
    pub fn time_to_expiry(mut self, years: f64) -> Self {
        self.time_to_expiry = Some(years);
        self
    }

    /// Sets the time to expiry from two dates under ACT/365F.
    pub fn expiry_between(self, valuation: NaiveDate, expiry: NaiveDate) -> Self {
        self.time_to_expiry(year_fraction(valuation, expiry))
    }

    /// Sets the rebate.
    pub fn rebate(mut self, rebate: f64) -> Self {
        self.rebate = Some(rebate);
        self
    }

    /// Builds the parameter set.
    ///
    /// # Errors
    /// - `ValidationError::MissingField` for an unset required field
    /// - `ValidationError::NonFinite` for a NaN or infinite value
    /// - `ValidationError::InvalidConfig` when both carry and dividend yield are set
    pub fn build(self) -> Result<OptionParameters, ValidationError> {
        fn required(field: &'static str, value: Option<f64>) -> Result<f64, ValidationError> {
            let value = value.ok_or(ValidationError::MissingField { field })?;
            ValidationError::require_finite(field, value)
        }

        let option_kind = self
            .option_kind
            .ok_or(ValidationError::MissingField {
                field: "option_kind",
            })?;
        let barrier_kind = self
            .barrier_kind
            .ok_or(ValidationError::MissingField {
                field: "barrier_kind",
            })?;
        let spot = required("spot", self.spot)?;
        let strike = required("strike", self.strike)?;
        let barrier = required("barrier", self.barrier)?;
        let rate = required("rate", self.rate)?;
        let volatility = required("volatility", self.volatility)?;
        let time_to_expiry = required("time_to_expiry", self.time_to_expiry)?;

        let carry = match (self.carry, self.dividend_yield) {
            (Some(_), Some(_)) => {
                return Err(ValidationError::InvalidConfig(
                    "set either carry or dividend_yield, not both".to_string(),
                ))
            }
            (Some(carry), None) => ValidationError::require_finite("carry", carry)?,
            (None, Some(q)) => rate - ValidationError::require_finite("dividend_yield", q)?,
            (None, None) => rate,
        };
        let rebate = ValidationError::require_finite("rebate", self.rebate.unwrap_or(0.0))?;

        Ok(OptionParameters {
            option_kind,
            barrier_kind,
            spot,
            strike,
            barrier,
            rate,
            carry,
            volatility,
            time_to_expiry,
            rebate,
        })
    }
}
