//! Closed-form pricers.
//!
//! This module provides:
//! - Standard normal distribution functions
//! - Generalized Black-Scholes-Merton with cost of carry (vanilla building block)
//! - Reiner-Rubinstein barrier option pricer with an explicit case table
//! - Cost-of-carry futures pricer
//! - Linear CFD pricer with financing
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`** for the distribution and formula kernels
//! - **Validate first**: domain checks run before any arithmetic
//! - **No silent clamping**: out-of-domain input is a `DomainError`

pub mod barrier;
pub mod black_scholes;
pub mod cfd;
pub mod distributions;
pub mod futures;

// Re-export main types at module level
pub use barrier::{BarrierPricer, Combination, PlacementPolicy, ReinerRubinsteinTerms, StrikeRegion};
pub use black_scholes::GeneralizedBlackScholes;
pub use cfd::{CfdPricer, CfdValuation};
pub use distributions::{norm_cdf, norm_pdf};
pub use futures::FuturesPricer;
