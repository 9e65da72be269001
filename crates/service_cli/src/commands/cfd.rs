//! CFD command implementation
//!
//! Values a CFD position including financing.

use std::io::Write;

use chrono::NaiveDate;
use clap::Args;
use pricer_models::analytical::{CfdPricer, CfdValuation};
use pricer_models::instruments::{CfdParameters, Position};
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::output::{self, Line, Section};
use crate::{CliError, Result};

/// CFD position terms
#[derive(Debug, Clone, Args)]
pub struct CfdArgs {
    /// Price at which the position was opened
    #[arg(short, long)]
    pub entry: f64,

    /// Current market price
    #[arg(long)]
    pub current: f64,

    /// Number of units
    #[arg(short, long)]
    pub quantity: f64,

    /// Position direction (long, short)
    #[arg(short, long, default_value = "long")]
    pub position: String,

    /// Annual financing rate
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub financing_rate: f64,

    /// Holding period in calendar days
    #[arg(short = 'd', long, conflicts_with_all = ["holding_years", "open_date"])]
    pub holding_days: Option<f64>,

    /// Holding period in years
    #[arg(long, conflicts_with = "open_date")]
    pub holding_years: Option<f64>,

    /// Date the position was opened (YYYY-MM-DD), with --close-date
    #[arg(long, requires = "close_date")]
    pub open_date: Option<NaiveDate>,

    /// Valuation or close date (YYYY-MM-DD), with --open-date
    #[arg(long, requires = "open_date")]
    pub close_date: Option<NaiveDate>,
}

impl CfdArgs {
    /// Collect the arguments into validated position parameters
    pub fn to_parameters(&self) -> Result<CfdParameters> {
        let position = self.position.parse::<Position>()?;
        let years = self.holding_years.unwrap_or(0.0);
        let params = CfdParameters::new(
            self.entry,
            self.current,
            self.quantity,
            position,
            self.financing_rate,
            years,
        )?;

        let params = match (self.holding_days, self.open_date, self.close_date) {
            (Some(days), _, _) => params.with_holding_days(days)?,
            (None, Some(opened), Some(closed)) => params.with_holding_dates(opened, closed)?,
            (None, None, None) => params,
            _ => {
                return Err(CliError::InvalidArgument(
                    "--open-date and --close-date must be given together".to_string(),
                ))
            }
        };
        Ok(params)
    }
}

/// CFD command output
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CfdReport {
    pub parameters: CfdParameters,
    pub notional: f64,
    #[serde(flatten)]
    pub valuation: CfdValuation,
}

impl CfdReport {
    pub fn section(&self, title: impl Into<String>) -> Section {
        Section::new(
            title,
            vec![
                Line::price("notional", self.notional),
                Line::price("raw P&L", self.valuation.raw_pnl),
                Line::price("financing", self.valuation.financing),
                Line::price("net P&L", self.valuation.net_pnl),
            ],
        )
    }
}

/// Value one position
pub fn evaluate(params: &CfdParameters) -> CfdReport {
    CfdReport {
        parameters: *params,
        notional: params.notional(),
        valuation: CfdPricer.value(params),
    }
}

/// Run the cfd command
pub fn run<W: Write>(args: &CfdArgs, config: &CliConfig, out: &mut W) -> Result<()> {
    let params = args.to_parameters()?;
    info!(
        position = %params.position(),
        quantity = params.quantity(),
        holding_period = params.holding_period(),
        "Valuing CFD position"
    );

    let report = evaluate(&params);
    info!(net_pnl = report.valuation.net_pnl, "Valuation complete");

    output::render(out, config.format, &[report.section("CFD")], &report)
}
