//! Futures command implementation
//!
//! Prices a futures contract by cost of carry.

use std::io::Write;

use chrono::NaiveDate;
use clap::Args;
use pricer_models::analytical::FuturesPricer;
use pricer_models::instruments::FuturesParameters;
use pricer_pricing::price_future;
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::output::{self, Line, Section};
use crate::{CliError, Result};

/// Futures contract terms
#[derive(Debug, Clone, Args)]
pub struct FuturesArgs {
    /// Spot price of the underlying
    #[arg(short, long)]
    pub spot: f64,

    /// Continuously compounded risk-free rate
    #[arg(short, long, allow_hyphen_values = true)]
    pub rate: f64,

    /// Annual storage cost rate
    #[arg(short = 'u', long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub storage_cost: f64,

    /// Annual convenience yield
    #[arg(short = 'y', long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub convenience_yield: f64,

    /// Time to delivery in years
    #[arg(short = 't', long, required_unless_present = "delivery_date")]
    pub expiry: Option<f64>,

    /// Valuation date (YYYY-MM-DD), with --delivery-date
    #[arg(long, requires = "delivery_date")]
    pub valuation_date: Option<NaiveDate>,

    /// Delivery date (YYYY-MM-DD), with --valuation-date
    #[arg(long, requires = "valuation_date", conflicts_with = "expiry")]
    pub delivery_date: Option<NaiveDate>,
}

impl FuturesArgs {
    /// Collect the arguments into contract parameters
    pub fn to_parameters(&self) -> Result<FuturesParameters> {
        let contract = FuturesParameters::new(self.spot, self.rate, 0.0)
            .with_storage_cost(self.storage_cost)
            .with_convenience_yield(self.convenience_yield);

        match (self.expiry, self.valuation_date, self.delivery_date) {
            (Some(years), _, _) => Ok(FuturesParameters {
                time_to_delivery: years,
                ..contract
            }),
            (None, Some(valuation), Some(delivery)) => Ok(contract.with_delivery_between(valuation, delivery)),
            _ => Err(CliError::InvalidArgument(
                "either --expiry or both --valuation-date and --delivery-date are required".to_string(),
            )),
        }
    }
}

/// Futures command output
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FuturesReport {
    pub parameters: FuturesParameters,
    pub price: f64,
    pub basis: f64,
    pub net_carry: f64,
}

impl FuturesReport {
    pub fn section(&self, title: impl Into<String>) -> Section {
        Section::new(
            title,
            vec![
                Line::price("futures price", self.price),
                Line::price("basis", self.basis),
                Line::greek("net carry", self.net_carry, "per year"),
            ],
        )
    }
}

/// Price one contract
pub fn evaluate(params: &FuturesParameters) -> Result<FuturesReport> {
    let price = price_future(params)?;
    Ok(FuturesReport {
        parameters: *params,
        price,
        basis: price - params.spot,
        net_carry: FuturesPricer.net_carry(params)?,
    })
}

/// Run the futures command
pub fn run<W: Write>(args: &FuturesArgs, config: &CliConfig, out: &mut W) -> Result<()> {
    let params = args.to_parameters()?;
    info!(spot = params.spot, time_to_delivery = params.time_to_delivery, "Pricing futures");

    let report = evaluate(&params)?;
    info!(price = report.price, "Pricing complete");

    output::render(out, config.format, &[report.section("Futures")], &report)
}
