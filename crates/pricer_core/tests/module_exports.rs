//! Integration tests for module exports.
//!
//! Verify that all public modules and types are accessible via absolute
//! paths and interoperate across modules.

use chrono::NaiveDate;

/// Test that the trait module is accessible via absolute path.
#[test]
fn test_traits_module_exports() {
    use pricer_core::traits::priceable::Priceable;
    use pricer_core::traits::Float;
    use pricer_core::types::error::{DomainError, PricingError};

    struct Forward {
        spot: f64,
        growth: f64,
    }

    impl Priceable<f64> for Forward {
        fn price(&self) -> Result<f64, PricingError> {
            let spot = DomainError::require_positive("spot", self.spot)?;
            Ok(spot * self.growth.exp())
        }
    }

    let forward = Forward { spot: 100.0, growth: 0.0 };
    assert_eq!(forward.price().unwrap(), 100.0);

    let broken = Forward { spot: -1.0, growth: 0.0 };
    assert!(broken.price().unwrap_err().is_domain());

    fn generic_sqrt<T: Float>(x: T) -> T {
        x.sqrt()
    }
    assert_eq!(generic_sqrt(9.0_f32), 3.0);
}

/// Test that error types convert into the umbrella error.
#[test]
fn test_error_module_exports() {
    use pricer_core::types::{DomainError, PricingError, ValidationError};

    fn collect(strike: Option<f64>) -> Result<f64, PricingError> {
        let strike = strike.ok_or(ValidationError::MissingField { field: "strike" })?;
        let strike = ValidationError::require_finite("strike", strike)?;
        Ok(DomainError::require_positive("strike", strike)?)
    }

    assert_eq!(collect(Some(100.0)).unwrap(), 100.0);
    assert!(collect(None).unwrap_err().is_validation());
    assert!(collect(Some(f64::NAN)).unwrap_err().is_validation());
    assert!(collect(Some(0.0)).unwrap_err().is_domain());

    let message = collect(Some(0.0)).unwrap_err().to_string();
    assert!(message.contains("strike"));
}

/// Test that time helpers are accessible via the re-exports.
#[test]
fn test_time_module_exports() {
    use pricer_core::types::time::DayCount;
    use pricer_core::types::{year_fraction, DAYS_PER_YEAR};

    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();

    assert_eq!(year_fraction(start, end), DayCount::Act365Fixed.year_fraction(start, end));
    assert!((year_fraction(start, end) - 90.0 / DAYS_PER_YEAR).abs() < 1e-15);
    assert!((DayCount::Act360.year_fraction(start, end) - 0.25).abs() < 1e-15);
}
