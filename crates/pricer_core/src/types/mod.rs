//! Core error and time types.
//!
//! This module provides:
//! - `error`: Structured error types for validation and domain failures
//! - `time`: Day-count conventions turning dates and day counts into year fractions
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`ValidationError`], [`DomainError`], [`PricingError`] from `error`
//! - [`DayCount`], [`year_fraction`], [`DAYS_PER_YEAR`] from `time`

pub mod error;
pub mod time;

// Re-export commonly used types at module level
pub use error::{DomainError, PricingError, ValidationError};
pub use time::{year_fraction, DayCount, DAYS_PER_YEAR};
