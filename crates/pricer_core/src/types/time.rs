//! Day-count conventions for turning calendar periods into year fractions.
//!
//! The engine measures every time input (option expiry, futures delivery,
//! CFD holding period) in years. This module converts dates or day counts
//! into those year fractions.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use pricer_core::types::time::DayCount;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//!
//! // 2024 is a leap year: 366 days / 365
//! let yf = DayCount::Act365Fixed.year_fraction(start, end);
//! assert!((yf - 366.0 / 365.0).abs() < 1e-12);
//! ```

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use super::error::ValidationError;

/// Calendar days per year used for day-based conversions.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Day-count convention.
///
/// # Variants
/// - `Act365Fixed`: Actual days / 365 (default)
/// - `Act360`: Actual days / 360 (money-market accrual)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DayCount {
    /// Actual/365 Fixed
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "ACT/365F"))]
    Act365Fixed,
    /// Actual/360
    #[cfg_attr(feature = "serde", serde(rename = "ACT/360"))]
    Act360,
}

impl DayCount {
    /// Returns the day basis of the convention.
    #[inline]
    pub fn basis(&self) -> f64 {
        match self {
            DayCount::Act365Fixed => DAYS_PER_YEAR,
            DayCount::Act360 => 360.0,
        }
    }

    /// Returns the market name of the convention.
    pub fn name(&self) -> &'static str {
        match self {
            DayCount::Act365Fixed => "ACT/365F",
            DayCount::Act360 => "ACT/360",
        }
    }

    /// Year fraction between two dates.
    ///
    /// Negative when `end` precedes `start`; callers validate the sign.
    pub fn year_fraction(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        let days = (end - start).num_days() as f64;
        days / self.basis()
    }

    /// Year fraction of a number of calendar days.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::time::DayCount;
    ///
    /// assert!((DayCount::Act360.year_fraction_days(90.0) - 0.25).abs() < 1e-12);
    /// ```
    #[inline]
    pub fn year_fraction_days(&self, days: f64) -> f64 {
        days / self.basis()
    }
}

impl FromStr for DayCount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACT/365F" | "ACT/365" | "ACT365" | "ACT365F" => Ok(DayCount::Act365Fixed),
            "ACT/360" | "ACT360" => Ok(DayCount::Act360),
            _ => Err(ValidationError::UnknownVariant {
                kind: "day count",
                value: s.to_string(),
                expected: "ACT/365F, ACT/360",
            }),
        }
    }
}

impl fmt::Display for DayCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Year fraction between two dates under ACT/365F.
///
/// Shorthand for `DayCount::Act365Fixed.year_fraction(start, end)`.
#[inline]
pub fn year_fraction(start: NaiveDate, end: NaiveDate) -> f64 {
    DayCount::Act365Fixed.year_fraction(start, end)
}
