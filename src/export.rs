//! Payloads for downstream consumers: CSV tables and chart data
//!
//! Rendering and file generation happen elsewhere; this module only shapes
//! the numbers.

use std::io::Write;

use serde::Serialize;

use crate::error::ExportError;
use crate::projection::{DualProjection, ProjectionPoint, ProjectionResult};

pub const BALANCE_COLOR: &str = "#3B82F6";
pub const COMPARISON_COLOR: &str = "#10B981";
pub const TFSA_COLOR: &str = "#8B5CF6";
pub const RRSP_COLOR: &str = "#10B981";

/// One row of the year-by-year breakdown table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    #[serde(rename = "Year")]
    pub year: u32,
    #[serde(rename = "Total Deposit")]
    pub deposit: f64,
    #[serde(rename = "Interest Earned")]
    pub interest: f64,
    #[serde(rename = "Balance")]
    pub balance: f64,
}

impl From<&ProjectionPoint> for TableRow {
    fn from(point: &ProjectionPoint) -> Self {
        Self {
            year: point.year,
            deposit: point.cumulative_deposit,
            interest: point.interest_earned,
            balance: point.balance,
        }
    }
}

pub fn table_rows(series: &[ProjectionPoint]) -> Vec<TableRow> {
    series.iter().map(TableRow::from).collect()
}

/// Write the breakdown table as CSV with a header row
pub fn write_csv<W: Write>(writer: W, series: &[ProjectionPoint]) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    if series.is_empty() {
        csv.write_record(["Year", "Total Deposit", "Interest Earned", "Balance"])?;
    }
    for row in table_rows(series) {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct DualRow<'a> {
    #[serde(rename = "Year")]
    year: &'a str,
    #[serde(rename = "TFSA")]
    tfsa: f64,
    #[serde(rename = "RRSP")]
    rrsp: f64,
}

/// Write aligned TFSA/RRSP series as CSV
pub fn write_dual_csv<W: Write>(
    writer: W,
    labels: &[String],
    tfsa: &[f64],
    rrsp: &[f64],
) -> Result<(), ExportError> {
    if labels.len() != tfsa.len() || labels.len() != rrsp.len() {
        return Err(ExportError::Mismatch(format!(
            "{} labels, {} TFSA values, {} RRSP values",
            labels.len(),
            tfsa.len(),
            rrsp.len()
        )));
    }

    let mut csv = csv::Writer::from_writer(writer);
    if labels.is_empty() {
        csv.write_record(["Year", "TFSA", "RRSP"])?;
    }
    for ((label, &tfsa), &rrsp) in labels.iter().zip(tfsa).zip(rrsp) {
        csv.serialize(DualRow { year: label, tfsa, rrsp })?;
    }
    csv.flush()?;
    Ok(())
}

/// One line on a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub color: String,
}

/// Labels plus datasets, the shape chart renderers consume
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    /// Balance-over-time chart of a single projection
    pub fn balance(result: &ProjectionResult, label: &str, color: &str) -> Self {
        Self {
            labels: result.labels(),
            datasets: vec![Dataset {
                label: label.to_string(),
                data: result.balances(),
                color: color.to_string(),
            }],
        }
    }

    /// TFSA and RRSP lines over shared labels
    pub fn dual(labels: &[String], tfsa: &[f64], rrsp: &[f64]) -> Self {
        Self {
            labels: labels.to_vec(),
            datasets: vec![
                Dataset {
                    label: "TFSA".to_string(),
                    data: tfsa.to_vec(),
                    color: TFSA_COLOR.to_string(),
                },
                Dataset {
                    label: "RRSP".to_string(),
                    data: rrsp.to_vec(),
                    color: RRSP_COLOR.to_string(),
                },
            ],
        }
    }

    pub fn from_dual(projection: &DualProjection) -> Self {
        Self::dual(
            &projection.labels(),
            &projection.tfsa_balances(),
            &projection.rrsp_balances(),
        )
    }
}
