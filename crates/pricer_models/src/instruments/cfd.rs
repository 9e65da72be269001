//! Contract-for-difference position terms.
//!
//! A CFD is a linear position on the price difference between entry and
//! current price. Holding the position costs (long) or earns (short)
//! financing on the entry notional.

use chrono::NaiveDate;
use pricer_core::types::{year_fraction, ValidationError, DAYS_PER_YEAR};
use std::fmt;
use std::str::FromStr;

/// Position direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Position {
    /// Long position: profits when the price rises
    #[default]
    Long,
    /// Short position: profits when the price falls
    Short,
}

impl Position {
    /// Returns +1 for long and -1 for short.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            Position::Long => 1.0,
            Position::Short => -1.0,
        }
    }

    /// Returns whether this is a long position.
    #[inline]
    pub fn is_long(&self) -> bool {
        matches!(self, Position::Long)
    }

    /// Returns whether this is a short position.
    #[inline]
    pub fn is_short(&self) -> bool {
        matches!(self, Position::Short)
    }
}

impl FromStr for Position {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "long" | "buy" => Ok(Position::Long),
            "short" | "sell" => Ok(Position::Short),
            _ => Err(ValidationError::UnknownVariant {
                kind: "position",
                value: s.to_string(),
                expected: "long, short",
            }),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Long => write!(f, "long"),
            Position::Short => write!(f, "short"),
        }
    }
}

/// CFD position parameters.
///
/// Validated on construction, so pricing a `CfdParameters` cannot fail.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{CfdParameters, Position};
///
/// let cfd = CfdParameters::new(100.0, 105.0, 10.0, Position::Long, 0.05, 0.5).unwrap();
/// assert_eq!(cfd.quantity(), 10.0);
/// assert!(cfd.position().is_long());
///
/// // Negative quantity is rejected; use `from_signed_quantity` for that convention
/// assert!(CfdParameters::new(100.0, 105.0, -10.0, Position::Long, 0.05, 0.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CfdParameters {
    entry_price: f64,
    current_price: f64,
    quantity: f64,
    position: Position,
    financing_rate: f64,
    holding_period: f64,
}

fn positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = ValidationError::require_finite(field, value)?;
    if value <= 0.0 {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            constraint: "must be positive",
        });
    }
    Ok(value)
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = ValidationError::require_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            constraint: "must be non-negative",
        });
    }
    Ok(value)
}

impl CfdParameters {
    /// Creates validated CFD parameters.
    ///
    /// # Arguments
    /// * `entry_price` - Price at which the position was opened (positive)
    /// * `current_price` - Current market price (positive)
    /// * `quantity` - Number of units (non-negative)
    /// * `position` - Long or short
    /// * `financing_rate` - Annual financing rate (finite, may be negative)
    /// * `holding_period` - Holding period in years (non-negative)
    ///
    /// # Errors
    /// `ValidationError::OutOfRange` or `ValidationError::NonFinite` naming
    /// the offending field.
    pub fn new(
        entry_price: f64,
        current_price: f64,
        quantity: f64,
        position: Position,
        financing_rate: f64,
        holding_period: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            entry_price: positive("entry_price", entry_price)?,
            current_price: positive("current_price", current_price)?,
            quantity: non_negative("quantity", quantity)?,
            position,
            financing_rate: ValidationError::require_finite("financing_rate", financing_rate)?,
            holding_period: non_negative("holding_period", holding_period)?,
        })
    }

    /// Creates parameters from a signed quantity: positive is long, negative
    /// is short.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::{CfdParameters, Position};
    ///
    /// let cfd = CfdParameters::from_signed_quantity(100.0, 95.0, -20.0, 0.05, 0.25).unwrap();
    /// assert_eq!(cfd.position(), Position::Short);
    /// assert_eq!(cfd.quantity(), 20.0);
    /// ```
    pub fn from_signed_quantity(
        entry_price: f64,
        current_price: f64,
        signed_quantity: f64,
        financing_rate: f64,
        holding_period: f64,
    ) -> Result<Self, ValidationError> {
        let signed_quantity = ValidationError::require_finite("quantity", signed_quantity)?;
        let position = if signed_quantity < 0.0 {
            Position::Short
        } else {
            Position::Long
        };
        Self::new(
            entry_price,
            current_price,
            signed_quantity.abs(),
            position,
            financing_rate,
            holding_period,
        )
    }

    /// Copy with the holding period given in calendar days (365-day year).
    ///
    /// # Errors
    /// `ValidationError` for a negative or non-finite day count.
    pub fn with_holding_days(self, days: f64) -> Result<Self, ValidationError> {
        let days = non_negative("holding_days", days)?;
        Ok(Self {
            holding_period: days / DAYS_PER_YEAR,
            ..self
        })
    }

    /// Copy with the holding period between two dates under ACT/365F.
    ///
    /// # Errors
    /// `ValidationError::OutOfRange` when `closed` precedes `opened`.
    pub fn with_holding_dates(
        self,
        opened: NaiveDate,
        closed: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let holding_period = non_negative("holding_period", year_fraction(opened, closed))?;
        Ok(Self {
            holding_period,
            ..self
        })
    }

    /// Copy with a different current price.
    ///
    /// # Errors
    /// `ValidationError` for a non-positive price.
    pub fn with_current_price(self, current_price: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            current_price: positive("current_price", current_price)?,
            ..self
        })
    }

    /// Returns the entry price.
    #[inline]
    pub fn entry_price(&self) -> f64 {
        self.entry_price
    }

    /// Returns the current price.
    #[inline]
    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    /// Returns the unsigned quantity.
    #[inline]
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Returns the quantity signed by the position direction.
    #[inline]
    pub fn signed_quantity(&self) -> f64 {
        self.position.sign() * self.quantity
    }

    /// Returns the position direction.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the annual financing rate.
    #[inline]
    pub fn financing_rate(&self) -> f64 {
        self.financing_rate
    }

    /// Returns the holding period in years.
    #[inline]
    pub fn holding_period(&self) -> f64 {
        self.holding_period
    }

    /// Entry notional: entry price × quantity.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.entry_price * self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_position_sign() {
        assert_eq!(Position::Long.sign(), 1.0);
        assert_eq!(Position::Short.sign(), -1.0);
        assert!(Position::default().is_long());
        assert!(Position::Short.is_short());
    }

    #[test]
    fn test_position_parse() {
        assert_eq!("LONG".parse::<Position>().unwrap(), Position::Long);
        assert_eq!("sell".parse::<Position>().unwrap(), Position::Short);
        assert!("flat".parse::<Position>().is_err());
        assert_eq!(Position::Short.to_string(), "short");
    }

    #[test]
    fn test_new_rejects_invalid_fields() {
        let err = CfdParameters::new(0.0, 100.0, 1.0, Position::Long, 0.05, 1.0).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange {
                field: "entry_price",
                ..
            }
        ));

        let err = CfdParameters::new(100.0, 100.0, 1.0, Position::Long, f64::NAN, 1.0).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NonFinite {
                field: "financing_rate",
                ..
            }
        ));

        let err = CfdParameters::new(100.0, 100.0, 1.0, Position::Long, 0.05, -1.0).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange {
                field: "holding_period",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_quantity_allowed() {
        let cfd = CfdParameters::new(100.0, 110.0, 0.0, Position::Long, 0.05, 1.0).unwrap();
        assert_eq!(cfd.notional(), 0.0);
    }

    #[test]
    fn test_signed_quantity() {
        let long = CfdParameters::from_signed_quantity(100.0, 110.0, 5.0, 0.05, 1.0).unwrap();
        assert_eq!(long.position(), Position::Long);
        assert_eq!(long.signed_quantity(), 5.0);

        let short = CfdParameters::from_signed_quantity(100.0, 110.0, -5.0, 0.05, 1.0).unwrap();
        assert_eq!(short.signed_quantity(), -5.0);
        assert_eq!(short.quantity(), 5.0);
    }

    #[test]
    fn test_with_holding_days() {
        let cfd = CfdParameters::new(100.0, 110.0, 1.0, Position::Long, 0.05, 0.0)
            .unwrap()
            .with_holding_days(73.0)
            .unwrap();
        assert_relative_eq!(cfd.holding_period(), 0.2, epsilon = 1e-15);
    }

    #[test]
    fn test_with_holding_dates() {
        let opened = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let closed = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let cfd = CfdParameters::new(100.0, 110.0, 1.0, Position::Long, 0.05, 0.0).unwrap();

        let held = cfd.with_holding_dates(opened, closed).unwrap();
        assert_relative_eq!(held.holding_period(), 30.0 / 365.0, epsilon = 1e-15);
        assert!(cfd.with_holding_dates(closed, opened).is_err());
    }

    #[test]
    fn test_with_current_price() {
        let cfd = CfdParameters::new(100.0, 110.0, 1.0, Position::Long, 0.05, 1.0).unwrap();
        assert_eq!(cfd.with_current_price(120.0).unwrap().current_price(), 120.0);
        assert!(cfd.with_current_price(-1.0).is_err());
    }
}
