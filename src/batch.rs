//! CSV batch pricing.
//!
//! Input rows carry `spot,strike,rate,volatility,maturity,kind`. Every valid row
//! is valued with [`valuation`]; rows that fail to parse or validate are
//! collected as [`BatchRejection`]s instead of being zero-filled.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model_params::{OptionKind, OptionParameters};
use crate::models::bs::greeks::valuation;

/// One input row as it appears in the CSV file.
#[derive(Debug, Clone, Deserialize)]
struct BatchInputRow {
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    kind: OptionKind,
}

/// Inputs and results for one priced row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub spot: f64,
    pub strike: f64,
    pub rate: f64,
    pub volatility: f64,
    pub maturity: f64,
    pub kind: OptionKind,
    pub price: f64,
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,
    pub rho: f64,
}

/// A row that could not be priced.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRejection {
    /// 1-based line in the input, header included
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub records: Vec<BatchRecord>,
    pub rejections: Vec<BatchRejection>,
}

impl BatchOutcome {
    /// Fails when any row was rejected, naming the first offending line.
    pub fn ensure_complete(&self) -> Result<()> {
        match self.rejections.first() {
            None => Ok(()),
            Some(first) => anyhow::bail!(
                "{} of {} rows rejected (first at line {}: {})",
                self.rejections.len(),
                self.rejections.len() + self.records.len(),
                first.line,
                first.reason
            ),
        }
    }
}

/// Prices every row of a CSV document read from `input`.
///
/// Only I/O failures abort the batch; malformed or invalid rows are rejected
/// individually.
pub fn price_csv<R: Read>(input: R) -> Result<BatchOutcome> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
    let headers = reader
        .headers()
        .context("failed to read batch header")?
        .clone();
    let mut outcome = BatchOutcome::default();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) if err.is_io_error() => {
                return Err(err).context("failed to read batch input");
            }
            Err(err) => {
                let line = err.position().map_or(0, |p| p.line());
                reject(&mut outcome, line, err.to_string());
                continue;
            }
        };
        let line = record.position().map_or(0, |p| p.line());

        let priced = record
            .deserialize::<BatchInputRow>(Some(&headers))
            .map_err(|err| err.to_string())
            .and_then(|row| price_row(&row).map_err(|err| err.to_string()));
        match priced {
            Ok(priced) => outcome.records.push(priced),
            Err(reason) => reject(&mut outcome, line, reason),
        }
    }

    Ok(outcome)
}

/// Reads and prices a CSV file.
pub fn price_csv_file(path: impl AsRef<Path>) -> Result<BatchOutcome> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open batch input {}", path.display()))?;
    price_csv(file)
}

/// Writes priced records as CSV, header first.
pub fn write_records<W: Write>(records: &[BatchRecord], output: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(output);
    for record in records {
        writer.serialize(record).context("failed to write batch record")?;
    }
    writer.flush().context("failed to flush batch output")?;
    Ok(())
}

fn price_row(row: &BatchInputRow) -> crate::Result<BatchRecord> {
    let params = OptionParameters::new(
        row.spot,
        row.strike,
        row.rate,
        row.volatility,
        row.maturity,
    )?;
    let v = valuation(&params, row.kind)?;
    Ok(BatchRecord {
        spot: row.spot,
        strike: row.strike,
        rate: row.rate,
        volatility: row.volatility,
        maturity: row.maturity,
        kind: row.kind,
        price: v.price,
        delta: v.delta,
        gamma: v.gamma,
        vega: v.vega,
        theta: v.theta,
        rho: v.rho,
    })
}

fn reject(outcome: &mut BatchOutcome, line: u64, reason: String) {
    warn!(line, %reason, "batch row rejected");
    outcome.rejections.push(BatchRejection { line, reason });
}
