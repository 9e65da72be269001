//! Option command implementation
//!
//! Prices one barrier option and its Greeks.

use std::io::Write;

use chrono::NaiveDate;
use clap::Args;
use pricer_models::analytical::PlacementPolicy;
use pricer_models::instruments::{BarrierKind, OptionKind, OptionParameters};
use pricer_pricing::{Greeks, GreeksConfig, GreeksEngine, PricingResult};
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::output::{self, greek_lines, Line, Section};
use crate::{CliError, Result};

/// Barrier option terms
#[derive(Debug, Clone, Args)]
pub struct OptionArgs {
    /// Option kind (call, put)
    #[arg(short = 'k', long, default_value = "call")]
    pub kind: String,

    /// Barrier kind (up-and-in, up-and-out, down-and-in, down-and-out)
    #[arg(short = 'b', long)]
    pub barrier_kind: String,

    /// Spot price
    #[arg(short, long)]
    pub spot: f64,

    /// Strike price
    #[arg(short = 'K', long)]
    pub strike: f64,

    /// Barrier level
    #[arg(short = 'H', long)]
    pub barrier: f64,

    /// Continuously compounded risk-free rate
    #[arg(short, long, allow_hyphen_values = true)]
    pub rate: f64,

    /// Cost-of-carry rate (defaults to the rate)
    #[arg(long, allow_hyphen_values = true, conflicts_with = "dividend_yield")]
    pub carry: Option<f64>,

    /// Continuous dividend yield, sets carry = rate - yield
    #[arg(short = 'q', long, allow_hyphen_values = true)]
    pub dividend_yield: Option<f64>,

    /// Volatility
    #[arg(long, visible_alias = "vol")]
    pub volatility: f64,

    /// Time to expiry in years
    #[arg(short = 't', long, required_unless_present = "expiry_date")]
    pub expiry: Option<f64>,

    /// Valuation date (YYYY-MM-DD), with --expiry-date
    #[arg(long, requires = "expiry_date")]
    pub valuation_date: Option<NaiveDate>,

    /// Expiry date (YYYY-MM-DD), with --valuation-date
    #[arg(long, requires = "valuation_date", conflicts_with = "expiry")]
    pub expiry_date: Option<NaiveDate>,

    /// Cash rebate
    #[arg(long, default_value_t = 0.0)]
    pub rebate: f64,

    /// Reject barriers already breached at valuation
    #[arg(long)]
    pub strict: bool,
}

impl OptionArgs {
    /// Collect the arguments into validated parameters
    pub fn to_parameters(&self) -> Result<OptionParameters> {
        let mut builder = OptionParameters::builder()
            .option_kind(self.kind.parse::<OptionKind>()?)
            .barrier_kind(self.barrier_kind.parse::<BarrierKind>()?)
            .spot(self.spot)
            .strike(self.strike)
            .barrier(self.barrier)
            .rate(self.rate)
            .volatility(self.volatility)
            .rebate(self.rebate);

        if let Some(carry) = self.carry {
            builder = builder.carry(carry);
        }
        if let Some(dividend_yield) = self.dividend_yield {
            builder = builder.dividend_yield(dividend_yield);
        }
        builder = match (self.expiry, self.valuation_date, self.expiry_date) {
            (Some(years), _, _) => builder.time_to_expiry(years),
            (None, Some(valuation), Some(expiry)) => builder.expiry_between(valuation, expiry),
            _ => {
                return Err(CliError::InvalidArgument(
                    "either --expiry or both --valuation-date and --expiry-date are required".to_string(),
                ))
            }
        };

        Ok(builder.build()?)
    }

    /// Greeks configuration with the placement flag applied
    pub fn greeks_config(&self, base: &GreeksConfig) -> GreeksConfig {
        let mut config = *base;
        if self.strict {
            config.placement = PlacementPolicy::Strict;
        }
        config
    }
}

/// Option command output
#[derive(Debug, Serialize)]
pub struct OptionReport {
    pub parameters: OptionParameters,
    pub price: f64,
    pub vanilla_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greeks: Option<Greeks>,
}

impl OptionReport {
    pub fn sections(&self) -> Vec<Section> {
        let p = &self.parameters;
        let title = format!("{} {} (K={}, H={})", p.barrier_kind, p.option_kind, p.strike, p.barrier);
        let mut sections = vec![Section::new(
            title,
            vec![
                Line::price("price", self.price),
                Line::price("vanilla price", self.vanilla_price),
                Line::price("barrier discount", self.vanilla_price - self.price),
            ],
        )];
        if let Some(greeks) = &self.greeks {
            sections.push(Section::new("Greeks", greek_lines(greeks)));
        }
        sections
    }
}

/// Price one option, with Greeks unless `with_greeks` is false
pub fn evaluate(params: &OptionParameters, config: &GreeksConfig, with_greeks: bool) -> Result<OptionReport> {
    let engine = GreeksEngine::new(*config)?;
    let result = if with_greeks {
        engine.compute_result(params)?
    } else {
        PricingResult::new(engine.pricer().price(params)?)
    };
    let vanilla_price = engine.pricer().vanilla(params)?;

    Ok(OptionReport {
        parameters: *params,
        price: result.price,
        vanilla_price,
        greeks: result.greeks,
    })
}

/// Run the option command
pub fn run<W: Write>(args: &OptionArgs, with_greeks: bool, config: &CliConfig, out: &mut W) -> Result<()> {
    let params = args.to_parameters()?;
    info!(
        kind = %params.barrier_kind,
        option = %params.option_kind,
        spot = params.spot,
        strike = params.strike,
        barrier = params.barrier,
        "Pricing barrier option"
    );

    let report = evaluate(&params, &args.greeks_config(&config.greeks), with_greeks)?;
    info!(price = report.price, "Pricing complete");

    output::render(out, config.format, &report.sections(), &report)
}
