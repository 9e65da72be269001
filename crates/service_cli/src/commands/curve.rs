//! Curve command implementation
//!
//! Tabulates the barrier option price against spot. Samples past the
//! barrier show the knocked value unless `--formula` is given.

use std::io::Write;

use clap::Args;
use pricer_models::analytical::BarrierPricer;
use pricer_pricing::{BreachedSamples, CurvePoint, PayoffCurve, SpotGrid};
use tracing::info;

use super::option::OptionArgs;
use crate::config::CliConfig;
use crate::output;
use crate::Result;

/// Payoff curve arguments
#[derive(Debug, Clone, Args)]
pub struct CurveArgs {
    #[command(flatten)]
    pub option: OptionArgs,

    /// Lowest spot (defaults to half the strike)
    #[arg(long)]
    pub lo: Option<f64>,

    /// Highest spot (defaults to 1.5 times the strike)
    #[arg(long)]
    pub hi: Option<f64>,

    /// Number of samples
    #[arg(short = 'n', long, default_value_t = SpotGrid::DEFAULT_POINTS)]
    pub points: usize,

    /// Evaluate the closed form past the barrier instead of the knocked value
    #[arg(long)]
    pub formula: bool,
}

impl CurveArgs {
    /// Spot grid from the bounds, defaulting to 0.5K..1.5K
    pub fn spots(&self) -> Result<Vec<f64>> {
        let lo = self.lo.unwrap_or(0.5 * self.option.strike);
        let hi = self.hi.unwrap_or(1.5 * self.option.strike);
        Ok(SpotGrid::linspace(lo, hi, self.points)?)
    }
}

/// Price every sample, stopping at the first failure
pub fn evaluate(args: &CurveArgs, config: &CliConfig) -> Result<Vec<CurvePoint>> {
    let params = args.option.to_parameters()?;
    let spots = args.spots()?;
    let placement = args.option.greeks_config(&config.greeks).placement;
    let breached = if args.formula {
        BreachedSamples::Formula
    } else {
        BreachedSamples::Settle
    };
    let curve = PayoffCurve::with_pricer(&params, &spots, BarrierPricer::new(placement)).breached_samples(breached);

    let points = curve.iter().collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(points)
}

/// Run the curve command
pub fn run<W: Write>(args: &CurveArgs, config: &CliConfig, out: &mut W) -> Result<()> {
    info!(points = args.points, "Tabulating payoff curve");
    let points = evaluate(args, config)?;
    output::render_curve(out, config.format, &points)
}
