//! Standard normal distribution functions.
//!
//! The cumulative distribution uses Hart's double-precision rational
//! approximation (Hart 1968, as popularised by West 2005). It is accurate to
//! close to machine precision over the whole real line, which keeps the
//! finite-difference Greeks of the closed-form pricers free of
//! approximation noise.
//!
//! ## Functions
//!
//! - [`norm_cdf`]: Standard normal cumulative distribution N(x)
//! - [`norm_pdf`]: Standard normal probability density n(x)

use num_traits::Float;

/// 1/√(2π)
pub const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// √(2π)
const SQRT_2PI: f64 = 2.506_628_274_631_000_5;

/// Beyond this |x| the tail mass underflows to zero.
const TAIL_CUTOFF: f64 = 37.0;

/// Switch point between the rational and continued-fraction branches.
const RATIONAL_CUTOFF: f64 = 7.071_067_811_865_47;

const NUMERATOR: [f64; 7] = [
    3.526_249_659_989_11e-2,
    0.700_383_064_443_688,
    6.373_962_203_531_65,
    33.912_866_078_383,
    112.079_291_497_871,
    221.213_596_169_931,
    220.206_867_912_376,
];

const DENOMINATOR: [f64; 8] = [
    8.838_834_764_831_84e-2,
    1.755_667_163_182_64,
    16.064_177_579_207,
    86.780_732_202_946_1,
    296.564_248_779_674,
    637.333_633_378_831,
    793.826_512_519_948,
    440.413_735_824_752,
];

/// Converts an `f64` literal into `T`.
///
/// Every `Float` in use represents these constants; a failed conversion
/// yields NaN, which the pricers report as a non-finite result.
#[inline]
pub(crate) fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

#[inline]
fn horner<T: Float>(coefficients: &[f64], x: T) -> T {
    coefficients
        .iter()
        .fold(T::zero(), |acc, &c| acc * x + constant(c))
}

/// Standard normal cumulative distribution function.
///
/// N(x) = P(Z ≤ x) for Z ~ N(0, 1)
///
/// # Properties
/// - N(-∞) = 0, N(0) = 0.5, N(+∞) = 1
/// - N(-x) = 1 - N(x)
/// - Monotonically increasing
///
/// # Examples
/// ```
/// use pricer_models::analytical::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-15);
/// assert!((norm_cdf(1.96_f64) - 0.9750021048517795).abs() < 1e-10);
/// assert!((norm_cdf(-1.0_f64) + norm_cdf(1.0_f64) - 1.0).abs() < 1e-15);
/// ```
pub fn norm_cdf<T: Float>(x: T) -> T {
    let abs_x = x.abs();
    if x.is_nan() {
        return x;
    }

    let tail = if abs_x > constant(TAIL_CUTOFF) {
        T::zero()
    } else {
        let gauss = (-abs_x * abs_x * constant(0.5)).exp();
        if abs_x < constant(RATIONAL_CUTOFF) {
            gauss * horner(&NUMERATOR, abs_x) / horner(&DENOMINATOR, abs_x)
        } else {
            // Continued fraction for the far tail
            let mut b = abs_x + constant(0.65);
            for k in [4.0, 3.0, 2.0, 1.0] {
                b = abs_x + constant::<T>(k) / b;
            }
            gauss / b / constant(SQRT_2PI)
        }
    };

    if x > T::zero() {
        T::one() - tail
    } else {
        tail
    }
}

/// Standard normal probability density function.
///
/// n(x) = (1/√(2π)) · exp(-x²/2)
///
/// # Examples
/// ```
/// use pricer_models::analytical::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804014327).abs() < 1e-15);
/// assert!((norm_pdf(1.0_f64) - norm_pdf(-1.0_f64)).abs() < 1e-15);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    constant::<T>(FRAC_1_SQRT_2PI) * (-x * x * constant(0.5)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==========================================================
    // norm_cdf
    // ==========================================================

    #[test]
    fn test_cdf_at_zero() {
        assert_relative_eq!(norm_cdf(0.0_f64), 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_cdf_reference_values() {
        let cases = [
            (-3.0, 0.001_349_898_031_630_094_6),
            (-1.0, 0.158_655_253_931_457_05),
            (0.5, 0.691_462_461_274_013_1),
            (1.0, 0.841_344_746_068_542_9),
            (1.96, 0.975_002_104_851_779_5),
            (2.5, 0.993_790_334_674_223_6),
        ];
        for (x, expected) in cases {
            assert_relative_eq!(norm_cdf(x), expected, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_cdf_symmetry() {
        for x in [0.1, 0.7, 1.3, 2.9, 5.5, 8.0] {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_cdf_far_tail_branch() {
        // N(-8) ≈ 6.22e-16, evaluated on the continued-fraction branch
        let value = norm_cdf(-8.0_f64);
        assert_relative_eq!(value, 6.220_960_574_271_785e-16, max_relative = 1e-5);
    }

    #[test]
    fn test_cdf_extremes() {
        assert_eq!(norm_cdf(-40.0_f64), 0.0);
        assert_eq!(norm_cdf(40.0_f64), 1.0);
        assert_eq!(norm_cdf(f64::NEG_INFINITY), 0.0);
        assert_eq!(norm_cdf(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_cdf_nan_propagates() {
        assert!(norm_cdf(f64::NAN).is_nan());
    }

    #[test]
    fn test_cdf_monotonic() {
        let mut previous = norm_cdf(-10.0_f64);
        let mut x = -10.0;
        while x < 10.0 {
            x += 0.05;
            let current = norm_cdf(x);
            assert!(current >= previous, "N not monotonic at x = {}", x);
            previous = current;
        }
    }

    #[test]
    fn test_cdf_continuous_at_branch_switch() {
        let below = norm_cdf(-(RATIONAL_CUTOFF - 1e-9));
        let above = norm_cdf(-(RATIONAL_CUTOFF + 1e-9));
        assert_relative_eq!(below, above, max_relative = 1e-3);
    }

    #[test]
    fn test_cdf_f32() {
        assert_relative_eq!(norm_cdf(1.0_f32), 0.841_344_75, epsilon = 1e-6);
    }

    // ==========================================================
    // norm_pdf
    // ==========================================================

    #[test]
    fn test_pdf_peak() {
        assert_relative_eq!(norm_pdf(0.0_f64), FRAC_1_SQRT_2PI, epsilon = 1e-15);
    }

    #[test]
    fn test_pdf_is_cdf_derivative() {
        let h = 1e-5;
        for x in [-2.0, -0.5, 0.0, 0.8, 1.7] {
            let numerical = (norm_cdf(x + h) - norm_cdf(x - h)) / (2.0 * h);
            assert_relative_eq!(numerical, norm_pdf(x), epsilon = 1e-8);
        }
    }

    #[test]
    fn test_pdf_non_negative() {
        for x in [-50.0, -3.0, 0.0, 3.0, 50.0] {
            assert!(norm_pdf(x) >= 0.0_f64);
        }
    }
}
