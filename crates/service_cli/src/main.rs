//! barrier-desk - Command Line Desk for Barrier Option Pricing
//!
//! # Commands
//!
//! - `barrier-desk option ...` - Price one barrier option with Greeks
//! - `barrier-desk futures ...` - Price a futures contract by cost of carry
//! - `barrier-desk cfd ...` - Value a CFD position including financing
//! - `barrier-desk curve ...` - Tabulate option price against spot
//! - `barrier-desk quote --file desk.toml` - Value every instrument in a desk file

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use service_cli::commands::{self, cfd::CfdArgs, curve::CurveArgs, futures::FuturesArgs, option::OptionArgs};
use service_cli::config::{build_config, CliOverrides, OutputFormat};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Barrier option, futures and CFD pricing desk
#[derive(Parser)]
#[command(name = "barrier-desk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a barrier option and its Greeks
    Option {
        #[command(flatten)]
        args: OptionArgs,

        /// Skip the Greeks
        #[arg(long)]
        no_greeks: bool,
    },

    /// Price a futures contract
    Futures(FuturesArgs),

    /// Value a CFD position
    Cfd(CfdArgs),

    /// Tabulate the option price over a spot grid
    Curve(CurveArgs),

    /// Value every instrument of a desk file
    Quote {
        /// Path to the desk file (TOML)
        #[arg(long, value_name = "FILE")]
        file: PathBuf,
    },
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&CliOverrides {
        config_file: cli.config.clone(),
        format: cli.format,
        verbose: cli.verbose,
    })
    .context("loading configuration")?;

    init_tracing(config.log_level.as_filter_str());
    info!(
        version = service_cli::VERSION,
        format = %config.format,
        log_level = %config.log_level,
        "barrier-desk configuration loaded"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Option { args, no_greeks } => {
            commands::option::run(args, !no_greeks, &config, &mut out).context("pricing barrier option")
        }
        Commands::Futures(args) => commands::futures::run(args, &config, &mut out).context("pricing futures"),
        Commands::Cfd(args) => commands::cfd::run(args, &config, &mut out).context("valuing CFD position"),
        Commands::Curve(args) => commands::curve::run(args, &config, &mut out).context("tabulating payoff curve"),
        Commands::Quote { file } => commands::quote::run(file, &config, &mut out)
            .with_context(|| format!("quoting desk file {}", file.display())),
    }?;

    out.flush()?;
    Ok(())
}
