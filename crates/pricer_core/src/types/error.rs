//! Error types for structured error handling.
//!
//! This module provides:
//! - `ValidationError`: Malformed or missing parameters rejected at the input boundary
//! - `DomainError`: Mathematically invalid input that reached the engine
//! - `PricingError`: Umbrella error returned by every engine entry point
//!
//! Every variant names the offending field and the violated constraint so the
//! caller can surface the message without further context.

use thiserror::Error;

/// Parameter validation errors.
///
/// Raised while collecting inputs: a builder field that was never set, a
/// non-finite number, an unknown variant string or an inconsistent
/// configuration. The engine rejects these before any computation.
///
/// # Variants
/// - `MissingField`: A required builder field was never set
/// - `NonFinite`: A field holds NaN or an infinity
/// - `OutOfRange`: A field violates a simple range constraint
/// - `UnknownVariant`: A string did not match any enumerated variant
/// - `InvalidConfig`: An engine configuration is inconsistent
///
/// # Examples
/// ```
/// use pricer_core::types::ValidationError;
///
/// let err = ValidationError::MissingField { field: "strike" };
/// assert_eq!(format!("{}", err), "Missing parameter: strike");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required parameter was not supplied.
    #[error("Missing parameter: {field}")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },

    /// A parameter is NaN or infinite.
    #[error("Invalid parameter: {field} = {value} is not finite")]
    NonFinite {
        /// Name of the offending field
        field: &'static str,
        /// The offending value
        value: f64,
    },

    /// A parameter violates a range constraint.
    #[error("Invalid parameter: {field} = {value} ({constraint})")]
    OutOfRange {
        /// Name of the offending field
        field: &'static str,
        /// The offending value
        value: f64,
        /// Human readable constraint, e.g. "must be positive"
        constraint: &'static str,
    },

    /// A string did not name a known variant.
    #[error("Unknown {kind}: '{value}' (expected one of: {expected})")]
    UnknownVariant {
        /// What was being parsed, e.g. "barrier kind"
        kind: &'static str,
        /// The rejected input
        value: String,
        /// Accepted spellings
        expected: &'static str,
    },

    /// An engine configuration is inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ValidationError {
    /// Rejects NaN and infinite values.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::ValidationError;
    ///
    /// assert!(ValidationError::require_finite("spot", 100.0).is_ok());
    /// assert!(ValidationError::require_finite("spot", f64::NAN).is_err());
    /// ```
    #[inline]
    pub fn require_finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ValidationError::NonFinite { field, value })
        }
    }
}

/// Mathematical domain errors.
///
/// Raised by the engine when a parameter set that passed input collection is
/// still outside the domain of the pricing formula (non-positive price,
/// volatility or time, zero denominators, breached barrier placement under a
/// strict policy).
///
/// # Examples
/// ```
/// use pricer_core::types::DomainError;
///
/// let err = DomainError::NonPositive { field: "volatility", value: 0.0 };
/// assert_eq!(format!("{}", err), "Domain error: volatility must be positive, got 0");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A strictly positive quantity was zero or negative.
    #[error("Domain error: {field} must be positive, got {value}")]
    NonPositive {
        /// Name of the offending field
        field: &'static str,
        /// The offending value
        value: f64,
    },

    /// A non-negative quantity was negative.
    #[error("Domain error: {field} must be non-negative, got {value}")]
    Negative {
        /// Name of the offending field
        field: &'static str,
        /// The offending value
        value: f64,
    },

    /// A quantity was NaN or infinite.
    #[error("Domain error: {field} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending field
        field: &'static str,
        /// The offending value
        value: f64,
    },

    /// The barrier lies on the wrong side of spot for its direction.
    #[error("Domain error: {kind} barrier H = {barrier} is already breached at spot S = {spot}")]
    BarrierBreached {
        /// Barrier kind label, e.g. "down-and-out"
        kind: &'static str,
        /// Spot price
        spot: f64,
        /// Barrier level
        barrier: f64,
    },

    /// A formula produced NaN or an infinity.
    #[error("Domain error: {quantity} evaluated to a non-finite value")]
    NonFiniteResult {
        /// The quantity being computed, e.g. "barrier option price"
        quantity: &'static str,
    },
}

impl DomainError {
    /// Requires `value` to be finite and strictly positive.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::DomainError;
    ///
    /// assert_eq!(DomainError::require_positive("spot", 100.0), Ok(100.0));
    /// assert!(DomainError::require_positive("spot", 0.0).is_err());
    /// assert!(DomainError::require_positive("spot", f64::INFINITY).is_err());
    /// ```
    #[inline]
    pub fn require_positive(field: &'static str, value: f64) -> Result<f64, DomainError> {
        let value = Self::require_finite(field, value)?;
        if value <= 0.0 {
            return Err(DomainError::NonPositive { field, value });
        }
        Ok(value)
    }

    /// Requires `value` to be finite and non-negative.
    #[inline]
    pub fn require_non_negative(field: &'static str, value: f64) -> Result<f64, DomainError> {
        let value = Self::require_finite(field, value)?;
        if value < 0.0 {
            return Err(DomainError::Negative { field, value });
        }
        Ok(value)
    }

    /// Requires `value` to be finite.
    #[inline]
    pub fn require_finite(field: &'static str, value: f64) -> Result<f64, DomainError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(DomainError::NonFinite { field, value })
        }
    }

    /// Requires a computed `value` to be finite.
    #[inline]
    pub fn require_finite_result(quantity: &'static str, value: f64) -> Result<f64, DomainError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(DomainError::NonFiniteResult { quantity })
        }
    }
}

/// Categorised pricing errors.
///
/// The umbrella error of every engine entry point. It wraps the two
/// categories transparently so the displayed message is the one of the
/// underlying error.
///
/// # Examples
/// ```
/// use pricer_core::types::{DomainError, PricingError};
///
/// let err: PricingError = DomainError::NonPositive { field: "time_to_expiry", value: 0.0 }.into();
/// assert!(err.is_domain());
/// assert!(format!("{}", err).contains("time_to_expiry"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Malformed or missing input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Input outside the formula's domain
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl PricingError {
    /// Returns whether this is a validation error.
    #[inline]
    pub fn is_validation(&self) -> bool {
        matches!(self, PricingError::Validation(_))
    }

    /// Returns whether this is a domain error.
    #[inline]
    pub fn is_domain(&self) -> bool {
        matches!(self, PricingError::Domain(_))
    }
}
