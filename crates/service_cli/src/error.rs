//! CLI error types.

use pricer_core::types::{PricingError, ValidationError};
use thiserror::Error;

/// Errors surfaced by `barrier-desk` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// A file named on the command line does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A command-line value could not be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Layered configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A desk file is not valid TOML for the expected layout.
    #[error("Desk file error: {0}")]
    Desk(#[from] toml::de::Error),

    /// Malformed instrument input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The engine rejected the input.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Writing results failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering failed.
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV rendering failed.
    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
