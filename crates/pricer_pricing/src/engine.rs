//! Engine facade.
//!
//! Plain functions over the closed-form pricers with the default
//! configuration. Each call is independent and stateless.

use pricer_core::types::PricingError;
use pricer_models::analytical::{BarrierPricer, CfdPricer, FuturesPricer};
use pricer_models::instruments::{CfdParameters, FuturesParameters, OptionParameters};
use tracing::debug;

use crate::curve::PayoffCurve;
use crate::greeks::{Greeks, GreeksEngine};

/// Price and, when requested, Greeks of a barrier option.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Present value.
    pub price: f64,
    /// Sensitivities, if computed.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub greeks: Option<Greeks>,
}

impl PricingResult {
    /// Creates a price-only result.
    #[inline]
    pub fn new(price: f64) -> Self {
        Self { price, greeks: None }
    }

    /// Attaches Greeks.
    #[inline]
    pub fn with_greeks(mut self, greeks: Greeks) -> Self {
        self.greeks = Some(greeks);
        self
    }
}

/// Prices a barrier option under the lenient placement policy.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{BarrierKind, OptionKind, OptionParameters};
/// use pricer_pricing::price_barrier_option;
///
/// let params = OptionParameters::new(
///     OptionKind::Call, BarrierKind::UpOut,
///     100.0, 100.0, 120.0, 0.05, 0.05, 0.2, 1.0,
/// );
/// let price = price_barrier_option(&params).unwrap();
/// assert!(price > 0.0 && price < 10.4506);
/// ```
pub fn price_barrier_option(params: &OptionParameters) -> Result<f64, PricingError> {
    let price = BarrierPricer::default().price(params)?;
    debug!(kind = %params.barrier_kind, option = %params.option_kind, price, "priced barrier option");
    Ok(price)
}

/// Greeks with the default [`GreeksConfig`](crate::greeks::GreeksConfig).
pub fn compute_greeks(params: &OptionParameters) -> Result<Greeks, PricingError> {
    GreeksEngine::default().compute(params)
}

/// Cost-of-carry futures price.
pub fn price_future(params: &FuturesParameters) -> Result<f64, PricingError> {
    let price = FuturesPricer.price(params)?;
    debug!(spot = params.spot, time_to_delivery = params.time_to_delivery, price, "priced future");
    Ok(price)
}

/// Signed raw P&L of a CFD position.
///
/// Infallible: a constructed [`CfdParameters`] is always valid.
pub fn price_cfd(params: &CfdParameters) -> f64 {
    let pnl = CfdPricer.price(params);
    debug!(position = %params.position(), pnl, "priced cfd");
    pnl
}

/// Lazy price-vs-spot samples for `params` over `spots`.
///
/// Nothing is priced until the curve is iterated.
pub fn payoff_curve<'a>(params: &'a OptionParameters, spots: &'a [f64]) -> PayoffCurve<'a> {
    PayoffCurve::new(params, spots)
}
