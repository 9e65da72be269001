//! Result rendering as table, JSON or CSV.
//!
//! Prices are shown with 4 decimals and sensitivities with 6.

use std::io::Write;

use pricer_pricing::{CurvePoint, Greeks};
use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

const PRICE_DECIMALS: usize = 4;
const GREEK_DECIMALS: usize = 6;

/// One labelled number.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub label: String,
    pub value: f64,
    pub decimals: usize,
    pub detail: Option<String>,
}

impl Line {
    /// A monetary amount.
    pub fn price(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            decimals: PRICE_DECIMALS,
            detail: None,
        }
    }

    /// A sensitivity or rate.
    pub fn greek(label: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            decimals: GREEK_DECIMALS,
            detail: Some(unit.into()),
        }
    }

    fn formatted_value(&self) -> String {
        format!("{:.*}", self.decimals, self.value)
    }
}

/// A titled block of lines, or an error in place of the lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub lines: Vec<Line>,
    pub error: Option<String>,
}

impl Section {
    pub fn new(title: impl Into<String>, lines: Vec<Line>) -> Self {
        Self {
            title: title.into(),
            lines,
            error: None,
        }
    }

    pub fn failed(title: impl Into<String>, error: impl ToString) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
            error: Some(error.to_string()),
        }
    }
}

/// Lines for the five Greeks, with their units.
pub fn greek_lines(greeks: &Greeks) -> Vec<Line> {
    greeks
        .iter()
        .map(|(name, s)| Line::greek(name, s.value, s.unit.label()))
        .collect()
}

/// Writes `sections` as a table or CSV, or `json` as pretty JSON.
pub fn render<W, T>(out: &mut W, format: OutputFormat, sections: &[Section], json: &T) -> Result<()>
where
    W: Write,
    T: Serialize + ?Sized,
{
    match format {
        OutputFormat::Table => write_table(out, sections),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, json)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => write_csv(out, sections),
    }
}

fn write_table<W: Write>(out: &mut W, sections: &[Section]) -> Result<()> {
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}", section.title)?;
        writeln!(out, "{}", "─".repeat(section.title.chars().count().max(40)))?;
        if let Some(error) = &section.error {
            writeln!(out, "  error: {}", error)?;
            continue;
        }
        for line in &section.lines {
            let value = line.formatted_value();
            match &line.detail {
                Some(detail) => writeln!(out, "  {:<16} {:>16}  {}", line.label, value, detail)?,
                None => writeln!(out, "  {:<16} {:>16}", line.label, value)?,
            }
        }
    }
    Ok(())
}

fn write_csv<W: Write>(out: &mut W, sections: &[Section]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["section", "field", "value", "detail"])?;
    for section in sections {
        if let Some(error) = &section.error {
            writer.write_record([section.title.as_str(), "error", "", error.as_str()])?;
            continue;
        }
        for line in &section.lines {
            writer.write_record([
                section.title.as_str(),
                line.label.as_str(),
                line.formatted_value().as_str(),
                line.detail.as_deref().unwrap_or(""),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Writes a price-vs-spot table.
pub fn render_curve<W: Write>(out: &mut W, format: OutputFormat, points: &[CurvePoint]) -> Result<()> {
    match format {
        OutputFormat::Table => {
            writeln!(out, "  {:>12} {:>16}", "spot", "price")?;
            for point in points {
                writeln!(
                    out,
                    "  {:>12.*} {:>16.*}",
                    PRICE_DECIMALS, point.spot, PRICE_DECIMALS, point.price
                )?;
            }
            Ok(())
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, points)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(["spot", "price"])?;
            for point in points {
                writer.write_record([
                    format!("{:.*}", PRICE_DECIMALS, point.spot),
                    format!("{:.*}", PRICE_DECIMALS, point.price),
                ])?;
            }
            writer.flush()?;
            Ok(())
        }
    }
}
