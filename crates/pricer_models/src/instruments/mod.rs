//! Instrument parameter models.
//!
//! This module provides:
//! - Barrier option terms ([`OptionParameters`], [`OptionKind`], [`BarrierKind`])
//! - Futures contract terms ([`FuturesParameters`])
//! - CFD position terms ([`CfdParameters`], [`Position`])
//!
//! Every parameter set implements `pricer_core::traits::Priceable` through
//! the pricers in `crate::analytical`.

pub mod barrier;
pub mod cfd;
pub mod futures;

pub use barrier::{
    BarrierDirection, BarrierKind, KnockType, OptionKind, OptionParameters,
    OptionParametersBuilder,
};
pub use cfd::{CfdParameters, Position};
pub use futures::FuturesParameters;
