//! # Pricer Pricing (Layer 3: Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing drives the closed-form pricers of `pricer_models`:
//! - Finite-difference Greeks with Richardson extrapolation
//! - Lazy price-vs-spot payoff curves
//! - Engine facade functions with the default configuration
//! - Batch valuation (rayon, `parallel` feature)
//!
//! The crate is stateless: every call takes a parameter set and returns a
//! result. It reads no files and installs no tracing subscriber.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_models::instruments::{BarrierKind, OptionKind, OptionParameters};
//! use pricer_pricing::{compute_greeks, payoff_curve, price_barrier_option, SpotGrid};
//!
//! let params = OptionParameters::builder()
//!     .option_kind(OptionKind::Call)
//!     .barrier_kind(BarrierKind::UpOut)
//!     .spot(100.0)
//!     .strike(100.0)
//!     .barrier(120.0)
//!     .rate(0.05)
//!     .volatility(0.2)
//!     .time_to_expiry(1.0)
//!     .build()
//!     .unwrap();
//!
//! let price = price_barrier_option(&params).unwrap();
//! let greeks = compute_greeks(&params).unwrap();
//! assert!(price > 0.0);
//! assert!(greeks.theta.value.is_finite());
//!
//! let spots = SpotGrid::around_strike(params.strike).unwrap();
//! let curve = payoff_curve(&params, &spots);
//! assert_eq!(curve.iter().count(), 100);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): rayon-backed [`batch`] valuation
//! - `serde`: serialization of results and [`GreeksConfig`]

#![warn(missing_docs)]

pub mod batch;
pub mod curve;
pub mod engine;
pub mod greeks;

pub use curve::{BreachedSamples, CurveIter, CurvePoint, PayoffCurve, SpotGrid};
pub use engine::{compute_greeks, payoff_curve, price_barrier_option, price_cfd, price_future, PricingResult};
pub use greeks::{GreekUnit, Greeks, GreeksConfig, GreeksEngine, QuoteConvention, Sensitivity};
