//! Batch valuation of many barrier options.
//!
//! Results are returned per position, in input order, so one invalid
//! parameter set does not discard the rest of the book.
//!
//! # Performance
//!
//! When the `parallel` feature is enabled the slice is valued with rayon.
//! Otherwise the same functions run sequentially.

use pricer_core::types::PricingError;
use pricer_models::analytical::BarrierPricer;
use pricer_models::instruments::OptionParameters;
use tracing::debug;

use crate::engine::PricingResult;
use crate::greeks::GreeksEngine;

/// Prices every parameter set with `pricer`.
#[cfg(feature = "parallel")]
pub fn price_batch(pricer: &BarrierPricer, book: &[OptionParameters]) -> Vec<Result<f64, PricingError>> {
    use rayon::prelude::*;

    debug!(positions = book.len(), "pricing batch in parallel");
    book.par_iter().map(|params| pricer.price(params)).collect()
}

/// Sequential fallback when the `parallel` feature is disabled.
#[cfg(not(feature = "parallel"))]
pub fn price_batch(pricer: &BarrierPricer, book: &[OptionParameters]) -> Vec<Result<f64, PricingError>> {
    debug!(positions = book.len(), "pricing batch");
    book.iter().map(|params| pricer.price(params)).collect()
}

/// Price and Greeks of every parameter set.
#[cfg(feature = "parallel")]
pub fn greeks_batch(engine: &GreeksEngine, book: &[OptionParameters]) -> Vec<Result<PricingResult, PricingError>> {
    use rayon::prelude::*;

    debug!(positions = book.len(), "computing greeks batch in parallel");
    book.par_iter().map(|params| engine.compute_result(params)).collect()
}

/// Sequential fallback when the `parallel` feature is disabled.
#[cfg(not(feature = "parallel"))]
pub fn greeks_batch(engine: &GreeksEngine, book: &[OptionParameters]) -> Vec<Result<PricingResult, PricingError>> {
    debug!(positions = book.len(), "computing greeks batch");
    book.iter().map(|params| engine.compute_result(params)).collect()
}
