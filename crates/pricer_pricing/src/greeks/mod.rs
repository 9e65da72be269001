//! Finite-difference Greeks for barrier options.
//!
//! - [`GreeksConfig`]: bump sizes, Richardson switch, quote convention
//! - [`GreeksEngine`]: bump-and-revalue driver over the barrier pricer
//! - [`Greeks`]: delta, gamma, vega, theta and rho with their units

mod config;
mod engine;
mod result;

pub use config::{GreeksConfig, GreeksConfigBuilder};
pub use engine::GreeksEngine;
pub use result::{GreekUnit, Greeks, QuoteConvention, Sensitivity};
