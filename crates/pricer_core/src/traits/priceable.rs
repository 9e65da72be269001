//! Trait for priceable instruments.
//!
//! Every parameter set of the engine (barrier option, futures contract, CFD
//! position) implements [`Priceable`], which lets batch valuation and the
//! CLI treat them uniformly through static dispatch.

use num_traits::Float;

use crate::types::error::PricingError;

/// Trait for entities that can be priced.
///
/// # Type Parameters
/// * `T` - Floating-point type (f32 or f64)
///
/// # Invariants
/// - `price` is pure: no side effects, deterministic, nothing retained
/// - Out-of-domain input is reported as an error, never clamped
///
/// # Examples
/// ```
/// use pricer_core::traits::Priceable;
/// use pricer_core::types::{DomainError, PricingError};
///
/// struct Deposit {
///     principal: f64,
///     rate: f64,
///     years: f64,
/// }
///
/// impl Priceable<f64> for Deposit {
///     fn price(&self) -> Result<f64, PricingError> {
///         DomainError::require_positive("years", self.years)?;
///         Ok(self.principal * (self.rate * self.years).exp())
///     }
/// }
///
/// let deposit = Deposit { principal: 100.0, rate: 0.0, years: 1.0 };
/// assert_eq!(deposit.price().unwrap(), 100.0);
/// ```
pub trait Priceable<T: Float> {
    /// Calculate the value of the instrument.
    ///
    /// # Errors
    /// Returns `PricingError` when the parameters are outside the domain of
    /// the pricing formula.
    fn price(&self) -> Result<T, PricingError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::error::DomainError;

    enum SimpleInstrument {
        Cash(f64),
        ZeroCoupon { face: f64, rate: f64, years: f64 },
    }

    impl Priceable<f64> for SimpleInstrument {
        fn price(&self) -> Result<f64, PricingError> {
            match self {
                SimpleInstrument::Cash(amount) => Ok(*amount),
                SimpleInstrument::ZeroCoupon { face, rate, years } => {
                    DomainError::require_positive("years", *years)?;
                    Ok(face * (-rate * years).exp())
                }
            }
        }
    }

    #[test]
    fn test_priceable_enum_dispatch() {
        assert_eq!(SimpleInstrument::Cash(5.0).price().unwrap(), 5.0);

        let zc = SimpleInstrument::ZeroCoupon {
            face: 100.0,
            rate: 0.0,
            years: 2.0,
        };
        assert_eq!(zc.price().unwrap(), 100.0);
    }

    #[test]
    fn test_priceable_propagates_domain_error() {
        let zc = SimpleInstrument::ZeroCoupon {
            face: 100.0,
            rate: 0.05,
            years: 0.0,
        };
        assert!(zc.price().unwrap_err().is_domain());
    }
}
