//! barrier-desk library
//!
//! Command implementations, configuration and output rendering behind the
//! `barrier-desk` binary. Every number comes from `pricer_models` and
//! `pricer_pricing`; this crate only collects inputs and renders results.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use error::{CliError, Result};

// Re-export pricer dependencies for integration
pub use pricer_core;
pub use pricer_models;
pub use pricer_pricing;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
