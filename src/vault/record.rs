//! Saved simulation records

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RecordError;
use crate::export::ChartData;
use crate::projection::{whole_years, DualProjection};

/// Primary key of a vault record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable snapshot of one TFSA vs RRSP simulation.
///
/// Field aliases accept blobs written with the older short field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultRecord {
    pub id: RecordId,
    pub title: String,
    pub income: f64,
    #[serde(alias = "monthly")]
    pub monthly_contribution: f64,
    #[serde(deserialize_with = "deserialize_years")]
    pub years: u32,
    #[serde(alias = "created")]
    pub created_date: NaiveDate,
    #[serde(alias = "tfsaData")]
    pub tfsa_series: Vec<f64>,
    #[serde(alias = "rrspData")]
    pub rrsp_series: Vec<f64>,
    #[serde(alias = "labels")]
    pub year_labels: Vec<String>,
}

/// Older blobs stored the raw form value, which may be fractional
fn deserialize_years<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(whole_years)
}

/// Title used when the user does not name a simulation
pub fn default_title(years: u32) -> String {
    format!("TFSA vs RRSP - {} Years", years)
}

impl VaultRecord {
    /// Snapshot a simulation result
    pub fn from_projection(
        id: RecordId,
        title: String,
        created_date: NaiveDate,
        projection: &DualProjection,
    ) -> Self {
        Self {
            id,
            title,
            income: projection.income,
            monthly_contribution: projection.monthly_contribution,
            years: projection.years,
            created_date,
            tfsa_series: projection.tfsa_balances(),
            rrsp_series: projection.rrsp_balances(),
            year_labels: projection.labels(),
        }
    }

    /// Check the record against the fixed schema
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.title.trim().is_empty() {
            return Err(RecordError::EmptyTitle(self.id));
        }

        for (field, value) in [
            ("income", self.income),
            ("monthlyContribution", self.monthly_contribution),
        ] {
            if !value.is_finite() {
                return Err(RecordError::NonFinite { id: self.id, field });
            }
        }

        if self.monthly_contribution < 0.0 {
            return Err(RecordError::Negative { id: self.id, field: "monthlyContribution" });
        }

        let expected = self.years as usize;
        for (series, actual) in [
            ("tfsaSeries", self.tfsa_series.len()),
            ("rrspSeries", self.rrsp_series.len()),
            ("yearLabels", self.year_labels.len()),
        ] {
            if actual != expected {
                return Err(RecordError::SeriesLength {
                    id: self.id,
                    series,
                    expected,
                    actual,
                });
            }
        }

        if self.tfsa_series.iter().chain(&self.rrsp_series).any(|v| !v.is_finite()) {
            return Err(RecordError::NonFinite { id: self.id, field: "series" });
        }

        Ok(())
    }

    /// Chart of the stored series. Stored values are replayed as saved,
    /// never recomputed from the stored inputs.
    pub fn chart(&self) -> ChartData {
        ChartData::dual(&self.year_labels, &self.tfsa_series, &self.rrsp_series)
    }

    pub fn final_tfsa(&self) -> f64 {
        self.tfsa_series.last().copied().unwrap_or(0.0)
    }

    pub fn final_rrsp(&self) -> f64 {
        self.rrsp_series.last().copied().unwrap_or(0.0)
    }
}
