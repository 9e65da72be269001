//! # pricer_core: Foundation Layer for the Barrier Desk Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the engine, providing:
//! - Error types: `ValidationError`, `DomainError`, `PricingError` (`types::error`)
//! - Day-count helpers: `DayCount`, `year_fraction` (`types::time`)
//! - The `Priceable` trait shared by every instrument (`traits`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use pricer_core::types::{DayCount, DomainError, PricingError};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
//! let yf = DayCount::Act365Fixed.year_fraction(start, end);
//! assert!((yf - 182.0 / 365.0).abs() < 1e-12);
//!
//! let err: PricingError = DomainError::NonPositive { field: "volatility", value: 0.0 }.into();
//! assert!(err.is_domain());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `DayCount`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod traits;
pub mod types;
