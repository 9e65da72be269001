//! Desk configuration management
//!
//! Settings are layered from a TOML file, `BARRIER_DESK__*` environment
//! variables and command-line flags.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use pricer_pricing::GreeksConfig;
use serde::Deserialize;

use crate::{CliError, Result};

/// Prefix of environment overrides, e.g. `BARRIER_DESK__FORMAT=json` or
/// `BARRIER_DESK__GREEKS__SPOT_BUMP_RELATIVE=0.005`.
pub const ENV_PREFIX: &str = "BARRIER_DESK";

/// File read when `--config` is not given, if present.
pub const DEFAULT_CONFIG_FILE: &str = "barrier-desk.toml";

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::InvalidArgument(format!(
                "Unknown log level: {}. Supported: trace, debug, info, warn, error",
                s
            ))),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Result rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: json, csv, table",
                s
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Desk settings
///
/// ```toml
/// format = "table"
/// log_level = "info"
///
/// [greeks]
/// spot_bump_relative = 0.01
/// quote = "market"
/// placement = "lenient"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Output format
    pub format: OutputFormat,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: LogLevel,
    /// Bump sizes and quoting of the Greeks engine
    pub greeks: GreeksConfig,
}

impl CliConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.greeks.validate()?;
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        if let Some(format) = cli.format {
            self.format = format;
        }
        if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// `--format`
    pub format: Option<OutputFormat>,
    /// `-v/--verbose`
    pub verbose: bool,
}

/// Load the file and environment layers
fn load(file: Option<&Path>, env: config::Environment) -> Result<CliConfig> {
    let file_source = match file {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::FileNotFound(path.display().to_string()));
            }
            config::File::from(path).format(config::FileFormat::Toml)
        }
        None => config::File::from(Path::new(DEFAULT_CONFIG_FILE))
            .format(config::FileFormat::Toml)
            .required(false),
    };

    let settings = config::Config::builder()
        .add_source(file_source)
        .add_source(env)
        .build()?;
    Ok(settings.try_deserialize()?)
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliOverrides) -> Result<CliConfig> {
    let mut config = load(cli.config_file.as_deref(), environment())?;
    config.merge_with_cli(cli);
    config.validate()?;
    Ok(config)
}
