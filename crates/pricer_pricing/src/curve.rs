//! Price-vs-spot samples for payoff visualisation.
//!
//! [`PayoffCurve`] borrows the parameters and a spot grid and prices lazily:
//! each call to [`PayoffCurve::iter`] starts a fresh pass over the grid.
//!
//! Samples on the knocked side of the barrier are settled by default: an
//! out option is worth its rebate and an in option the vanilla price. The
//! closed form is only valid on the live side, so evaluating it there gives
//! meaningless (often negative) values; [`BreachedSamples::Formula`] keeps
//! that raw evaluation available.

use std::iter::FusedIterator;

use pricer_core::types::{PricingError, ValidationError};
use pricer_models::analytical::BarrierPricer;
use pricer_models::instruments::{KnockType, OptionParameters};

/// One sample of the payoff curve.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    /// Underlying level
    pub spot: f64,
    /// Option value at that level
    pub price: f64,
}

/// Valuation of samples where spot is on the knocked side of the barrier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BreachedSamples {
    /// Out options pay the rebate, in options the vanilla price
    #[default]
    Settle,
    /// Evaluate the pricer as is; a strict pricer reports `BarrierBreached`
    Formula,
}

/// Spot grid constructors.
#[derive(Clone, Copy, Debug)]
pub struct SpotGrid;

impl SpotGrid {
    /// Number of samples of [`around_strike`](Self::around_strike).
    pub const DEFAULT_POINTS: usize = 100;

    /// `n` evenly spaced spots from `lo` to `hi` inclusive.
    ///
    /// # Errors
    ///
    /// `ValidationError` if `n < 2`, a bound is not finite, `lo <= 0` or
    /// `hi <= lo`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::SpotGrid;
    ///
    /// let grid = SpotGrid::linspace(50.0, 150.0, 5).unwrap();
    /// assert_eq!(grid, vec![50.0, 75.0, 100.0, 125.0, 150.0]);
    /// ```
    pub fn linspace(lo: f64, hi: f64, n: usize) -> Result<Vec<f64>, ValidationError> {
        ValidationError::require_finite("lo", lo)?;
        ValidationError::require_finite("hi", hi)?;
        if n < 2 {
            return Err(ValidationError::OutOfRange {
                field: "points",
                value: n as f64,
                constraint: "at least 2",
            });
        }
        if lo <= 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "lo",
                value: lo,
                constraint: "must be positive",
            });
        }
        if hi <= lo {
            return Err(ValidationError::OutOfRange {
                field: "hi",
                value: hi,
                constraint: "must exceed lo",
            });
        }

        let step = (hi - lo) / (n - 1) as f64;
        // Pin the last sample to `hi` to avoid accumulated rounding
        Ok((0..n)
            .map(|i| if i + 1 == n { hi } else { lo + step * i as f64 })
            .collect())
    }

    /// 0.5·K to 1.5·K with [`DEFAULT_POINTS`](Self::DEFAULT_POINTS) samples.
    pub fn around_strike(strike: f64) -> Result<Vec<f64>, ValidationError> {
        Self::linspace(0.5 * strike, 1.5 * strike, Self::DEFAULT_POINTS)
    }
}

/// Lazy, restartable payoff curve.
#[derive(Clone, Copy, Debug)]
pub struct PayoffCurve<'a> {
    params: &'a OptionParameters,
    spots: &'a [f64],
    pricer: BarrierPricer,
    breached: BreachedSamples,
}

impl<'a> PayoffCurve<'a> {
    /// Curve over `spots` priced with the lenient placement policy.
    pub fn new(params: &'a OptionParameters, spots: &'a [f64]) -> Self {
        Self::with_pricer(params, spots, BarrierPricer::default())
    }

    /// Curve priced with a caller-supplied pricer.
    pub fn with_pricer(params: &'a OptionParameters, spots: &'a [f64], pricer: BarrierPricer) -> Self {
        Self {
            params,
            spots,
            pricer,
            breached: BreachedSamples::default(),
        }
    }

    /// Sets how knocked samples are valued.
    pub fn breached_samples(self, breached: BreachedSamples) -> Self {
        Self { breached, ..self }
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    /// Returns `true` if the grid is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Starts a new pass over the grid.
    pub fn iter(&self) -> CurveIter<'a> {
        CurveIter {
            params: self.params,
            spots: self.spots.iter(),
            pricer: self.pricer,
            breached: self.breached,
        }
    }
}

impl<'a> IntoIterator for &PayoffCurve<'a> {
    type Item = Result<CurvePoint, PricingError>;
    type IntoIter = CurveIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`PayoffCurve`].
#[derive(Clone, Debug)]
pub struct CurveIter<'a> {
    params: &'a OptionParameters,
    spots: std::slice::Iter<'a, f64>,
    pricer: BarrierPricer,
    breached: BreachedSamples,
}

impl CurveIter<'_> {
    fn value_at(&self, spot: f64) -> Result<f64, PricingError> {
        let params = self.params.with_spot(spot);
        if self.breached == BreachedSamples::Formula || !params.is_breached() {
            return self.pricer.price(&params);
        }
        match params.barrier_kind.knock() {
            KnockType::Out => {
                params.validate()?;
                Ok(params.rebate)
            }
            KnockType::In => self.pricer.vanilla(&params),
        }
    }
}

impl Iterator for CurveIter<'_> {
    type Item = Result<CurvePoint, PricingError>;

    fn next(&mut self) -> Option<Self::Item> {
        let spot = *self.spots.next()?;
        Some(self.value_at(spot).map(|price| CurvePoint { spot, price }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.spots.size_hint()
    }
}

impl ExactSizeIterator for CurveIter<'_> {}

impl FusedIterator for CurveIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::analytical::PlacementPolicy;
    use pricer_models::instruments::{BarrierKind, OptionKind};

    fn params() -> OptionParameters {
        OptionParameters::new(OptionKind::Call, BarrierKind::UpOut, 100.0, 100.0, 120.0, 0.05, 0.05, 0.2, 1.0)
    }

    #[test]
    fn test_linspace_endpoints() {
        let grid = SpotGrid::linspace(0.1, 0.7, 7).unwrap();
        assert_eq!(grid.len(), 7);
        assert_eq!(grid[0], 0.1);
        assert_eq!(grid[6], 0.7);
        assert_relative_eq!(grid[3], 0.4, epsilon = 1e-15);
    }

    #[test]
    fn test_linspace_rejects_bad_input() {
        assert!(SpotGrid::linspace(50.0, 150.0, 1).is_err());
        assert!(SpotGrid::linspace(0.0, 150.0, 10).is_err());
        assert!(SpotGrid::linspace(150.0, 50.0, 10).is_err());
        assert!(SpotGrid::linspace(f64::NAN, 150.0, 10).is_err());
    }

    #[test]
    fn test_around_strike() {
        let grid = SpotGrid::around_strike(100.0).unwrap();
        assert_eq!(grid.len(), SpotGrid::DEFAULT_POINTS);
        assert_eq!(grid[0], 50.0);
        assert_eq!(grid[99], 150.0);
    }

    #[test]
    fn test_curve_is_restartable() {
        let p = params();
        let spots = SpotGrid::linspace(80.0, 110.0, 4).unwrap();
        let curve = PayoffCurve::new(&p, &spots);

        let first: Vec<_> = curve.iter().map(|r| r.unwrap()).collect();
        let second: Vec<_> = curve.iter().map(|r| r.unwrap()).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), curve.len());
        assert_eq!(first[1].spot, 90.0);
        assert_eq!(first[1].price, BarrierPricer::default().price(&p.with_spot(90.0)).unwrap());
    }

    #[test]
    fn test_iterator_is_exact_size() {
        let p = params();
        let spots = [90.0, 95.0, 100.0];
        let curve = PayoffCurve::new(&p, &spots);
        let mut iter = curve.iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
    }

    #[test]
    fn test_strict_pricer_reports_breached_formula_samples() {
        let p = params();
        let spots = [100.0, 125.0];
        let curve = PayoffCurve::with_pricer(&p, &spots, BarrierPricer::new(PlacementPolicy::Strict))
            .breached_samples(BreachedSamples::Formula);
        let results: Vec<_> = (&curve).into_iter().collect();
        assert!(results[0].is_ok());
        assert!(results[1].as_ref().unwrap_err().is_domain());
    }

    #[test]
    fn test_strict_pricer_settles_breached_samples() {
        let p = params().with_rebate(2.0);
        let spots = [100.0, 125.0];
        let curve = PayoffCurve::with_pricer(&p, &spots, BarrierPricer::new(PlacementPolicy::Strict));
        let points: Vec<_> = curve.iter().map(|r| r.unwrap()).collect();
        assert_eq!(points[1].price, 2.0);
    }

    #[test]
    fn test_knocked_out_samples_are_never_negative() {
        let p = OptionParameters::new(OptionKind::Put, BarrierKind::DownOut, 100.0, 100.0, 80.0, 0.03, 0.03, 0.25, 0.5);
        let spots = SpotGrid::around_strike(p.strike).unwrap();
        let curve = PayoffCurve::new(&p, &spots);

        let points: Vec<_> = curve.iter().map(|r| r.unwrap()).collect();
        assert!(points.iter().all(|pt| pt.price >= 0.0));
        for pt in points.iter().filter(|pt| pt.spot <= 80.0) {
            assert_eq!(pt.price, 0.0);
        }
        let live = points.iter().find(|pt| pt.spot > 80.0).unwrap();
        assert_eq!(live.price, BarrierPricer::default().price(&p.with_spot(live.spot)).unwrap());
    }

    #[test]
    fn test_knocked_in_samples_pay_vanilla() {
        let p = OptionParameters::new(OptionKind::Call, BarrierKind::UpIn, 100.0, 100.0, 120.0, 0.05, 0.05, 0.2, 1.0);
        let spots = [130.0];
        let curve = PayoffCurve::new(&p, &spots);
        let point = curve.iter().next().unwrap().unwrap();
        assert_eq!(point.price, BarrierPricer::default().vanilla(&p.with_spot(130.0)).unwrap());
    }

    #[test]
    fn test_formula_mode_keeps_raw_values() {
        let p = OptionParameters::new(OptionKind::Put, BarrierKind::DownOut, 100.0, 100.0, 80.0, 0.03, 0.03, 0.25, 0.5);
        let spots = [60.0];
        let curve = PayoffCurve::new(&p, &spots).breached_samples(BreachedSamples::Formula);
        let point = curve.iter().next().unwrap().unwrap();
        assert_eq!(point.price, BarrierPricer::default().price(&p.with_spot(60.0)).unwrap());
    }

    #[test]
    fn test_empty_curve() {
        let p = params();
        let curve = PayoffCurve::new(&p, &[]);
        assert!(curve.is_empty());
        assert_eq!(curve.iter().count(), 0);
    }
}
