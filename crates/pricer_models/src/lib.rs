//! # Pricer Models (L2: Business Logic)
//!
//! Instrument parameter models and closed-form pricers.
//!
//! This crate provides:
//! - Parameter models for barrier options, futures and CFD positions (`instruments`)
//! - Standard normal distribution and generalized Black-Scholes (`analytical`)
//! - Reiner-Rubinstein closed form for the eight single-barrier variants
//! - Cost-of-carry futures pricing and linear CFD P&L
//!
//! ## Design Principles
//!
//! - **Enum-based variants** for static dispatch (`OptionKind`, `BarrierKind`, `Position`)
//! - **Explicit case table** for the barrier term combinations
//! - **Pure functions**: every pricer is stateless, parameters are `Copy` values
//!
//! ## Example
//!
//! ```
//! use pricer_models::analytical::BarrierPricer;
//! use pricer_models::instruments::{BarrierKind, OptionKind, OptionParameters};
//!
//! let params = OptionParameters::builder()
//!     .option_kind(OptionKind::Call)
//!     .barrier_kind(BarrierKind::UpOut)
//!     .spot(100.0)
//!     .strike(100.0)
//!     .barrier(120.0)
//!     .rate(0.05)
//!     .carry(0.05)
//!     .volatility(0.2)
//!     .time_to_expiry(1.0)
//!     .build()
//!     .unwrap();
//!
//! let price = BarrierPricer::default().price(&params).unwrap();
//! assert!(price > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
