//! Quote command implementation
//!
//! Values every instrument of a desk file in one pass.
//!
//! ```toml
//! [[option]]
//! option_kind = "call"
//! barrier_kind = "up-and-out"
//! spot = 100.0
//! strike = 100.0
//! barrier = 120.0
//! rate = 0.05
//! carry = 0.05
//! volatility = 0.2
//! time_to_expiry = 1.0
//!
//! [[futures]]
//! spot = 80.0
//! rate = 0.04
//! storage_cost = 0.02
//! time_to_delivery = 0.5
//!
//! [[cfd]]
//! entry_price = 50.0
//! current_price = 45.0
//! quantity = 200.0
//! position = "short"
//! financing_rate = 0.06
//! holding_days = 90
//! ```

use std::io::Write;
use std::path::Path;

use pricer_models::instruments::{CfdParameters, FuturesParameters, OptionParameters, Position};
use pricer_pricing::batch::greeks_batch;
use pricer_pricing::{GreeksEngine, PricingResult};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::cfd::{self, CfdReport};
use super::futures::{self, FuturesReport};
use crate::config::CliConfig;
use crate::output::{self, greek_lines, Line, Section};
use crate::{CliError, Result};

/// CFD entry of a desk file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CfdEntry {
    pub entry_price: f64,
    pub current_price: f64,
    pub quantity: f64,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub financing_rate: f64,
    #[serde(default)]
    pub holding_period: f64,
    pub holding_days: Option<f64>,
}

impl CfdEntry {
    fn to_parameters(&self) -> Result<CfdParameters> {
        let params = CfdParameters::new(
            self.entry_price,
            self.current_price,
            self.quantity,
            self.position,
            self.financing_rate,
            self.holding_period,
        )?;
        match self.holding_days {
            Some(days) => Ok(params.with_holding_days(days)?),
            None => Ok(params),
        }
    }
}

/// Instruments of a desk file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Desk {
    #[serde(rename = "option")]
    pub options: Vec<OptionParameters>,
    pub futures: Vec<FuturesParameters>,
    #[serde(rename = "cfd")]
    pub cfds: Vec<CfdEntry>,
}

impl Desk {
    /// Parse a desk from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read a desk file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Number of instruments
    pub fn len(&self) -> usize {
        self.options.len() + self.futures.len() + self.cfds.len()
    }

    /// Returns `true` if the desk holds no instruments
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome for one desk entry
#[derive(Debug, Serialize)]
pub struct Quote<T: Serialize> {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> Quote<T> {
    fn from_result(index: usize, result: Result<T>) -> Self {
        match result {
            Ok(value) => Self {
                index,
                result: Some(value),
                error: None,
            },
            Err(err) => {
                warn!(index, error = %err, "Desk entry failed");
                Self {
                    index,
                    result: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }
}

/// Option quote with its terms
#[derive(Debug, Serialize)]
pub struct OptionQuote {
    pub parameters: OptionParameters,
    #[serde(flatten)]
    pub result: PricingResult,
}

/// Quote command output
#[derive(Debug, Serialize)]
pub struct DeskReport {
    pub options: Vec<Quote<OptionQuote>>,
    pub futures: Vec<Quote<FuturesReport>>,
    pub cfds: Vec<Quote<CfdReport>>,
}

impl DeskReport {
    pub fn sections(&self) -> Vec<Section> {
        let mut sections = Vec::with_capacity(self.options.len() + self.futures.len() + self.cfds.len());

        for quote in &self.options {
            let title = format!("Option #{}", quote.index + 1);
            sections.push(match (&quote.result, &quote.error) {
                (Some(q), _) => {
                    let p = &q.parameters;
                    let mut lines = vec![Line::price(format!("{} {}", p.barrier_kind, p.option_kind), q.result.price)];
                    if let Some(greeks) = &q.result.greeks {
                        lines.extend(greek_lines(greeks));
                    }
                    Section::new(title, lines)
                }
                (None, error) => Section::failed(title, error.as_deref().unwrap_or("not priced")),
            });
        }
        for quote in &self.futures {
            let title = format!("Futures #{}", quote.index + 1);
            sections.push(match (&quote.result, &quote.error) {
                (Some(report), _) => report.section(title),
                (None, error) => Section::failed(title, error.as_deref().unwrap_or("not priced")),
            });
        }
        for quote in &self.cfds {
            let title = format!("CFD #{}", quote.index + 1);
            sections.push(match (&quote.result, &quote.error) {
                (Some(report), _) => report.section(title),
                (None, error) => Section::failed(title, error.as_deref().unwrap_or("not valued")),
            });
        }
        sections
    }

    /// Number of entries that failed
    pub fn failures(&self) -> usize {
        self.options.iter().filter(|q| q.error.is_some()).count()
            + self.futures.iter().filter(|q| q.error.is_some()).count()
            + self.cfds.iter().filter(|q| q.error.is_some()).count()
    }
}

/// Value every desk entry; failures are reported per entry
pub fn evaluate(desk: &Desk, config: &CliConfig) -> Result<DeskReport> {
    let engine = GreeksEngine::new(config.greeks)?;

    let options = greeks_batch(&engine, &desk.options)
        .into_iter()
        .zip(&desk.options)
        .enumerate()
        .map(|(index, (result, params))| {
            let quote = result
                .map(|result| OptionQuote {
                    parameters: *params,
                    result,
                })
                .map_err(CliError::from);
            Quote::from_result(index, quote)
        })
        .collect();

    let futures = desk
        .futures
        .iter()
        .enumerate()
        .map(|(index, params)| Quote::from_result(index, futures::evaluate(params)))
        .collect();

    let cfds = desk
        .cfds
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            Quote::from_result(index, entry.to_parameters().map(|params| cfd::evaluate(&params)))
        })
        .collect();

    Ok(DeskReport { options, futures, cfds })
}

/// Run the quote command
pub fn run<W: Write>(file: &Path, config: &CliConfig, out: &mut W) -> Result<()> {
    let desk = Desk::from_file(file)?;
    info!(
        file = %file.display(),
        options = desk.options.len(),
        futures = desk.futures.len(),
        cfds = desk.cfds.len(),
        "Quoting desk"
    );

    let report = evaluate(&desk, config)?;
    info!(instruments = desk.len(), failures = report.failures(), "Quote complete");

    output::render(out, config.format, &report.sections(), &report)
}
