//! Yearly output structures for projections

use serde::{Deserialize, Serialize};

use super::state::{round_cents, AccountState};

/// Inputs for a single-account projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionInput {
    /// Deposit made at the end of each month
    pub monthly_contribution: f64,

    /// Nominal annual rate in percent (5.0 = 5%), compounded monthly
    pub annual_rate_percent: f64,

    /// Number of whole years to project
    pub years: u32,
}

impl ProjectionInput {
    pub fn new(monthly_contribution: f64, annual_rate_percent: f64, years: u32) -> Self {
        Self {
            monthly_contribution,
            annual_rate_percent,
            years,
        }
    }

    /// Build from loosely typed form input.
    ///
    /// Negative or non-finite `years` become 0 and fractional years are
    /// truncated, since a trailing partial year never produces a sample point.
    pub fn from_raw(monthly_contribution: f64, annual_rate_percent: f64, years: f64) -> Self {
        Self::new(monthly_contribution, annual_rate_percent, whole_years(years))
    }

    /// Contribution must be a finite non-negative amount and the rate finite
    pub fn is_valid(&self) -> bool {
        self.monthly_contribution.is_finite()
            && self.monthly_contribution >= 0.0
            && self.annual_rate_percent.is_finite()
    }

    pub fn total_months(&self) -> u32 {
        self.years.saturating_mul(12)
    }
}

/// Whole years in a loosely typed duration.
///
/// Negative or non-finite values become 0, fractions are truncated.
pub fn whole_years(years: f64) -> u32 {
    if years.is_finite() && years > 0.0 {
        years.trunc().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// Snapshot of one account at the end of a completed year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub year: u32,
    pub cumulative_deposit: f64,
    pub interest_earned: f64,
    pub balance: f64,
}

impl ProjectionPoint {
    /// Sample the state at a year end.
    ///
    /// Balance and deposit are rounded once; interest is derived from the
    /// rounded values so the three fields always add up.
    pub fn from_state(state: &AccountState) -> Self {
        let balance = round_cents(state.balance);
        let cumulative_deposit = round_cents(state.cumulative_deposit());
        Self {
            year: state.completed_years(),
            cumulative_deposit,
            interest_earned: round_cents(balance - cumulative_deposit),
            balance,
        }
    }

    /// Chart axis label, e.g. "Year 3"
    pub fn label(&self) -> String {
        year_label(self.year)
    }
}

pub fn year_label(year: u32) -> String {
    format!("Year {}", year)
}

/// Complete result of a single-account projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub input: ProjectionInput,

    /// One point per completed year
    pub series: Vec<ProjectionPoint>,

    /// Contribution multiplied by every projected month
    pub total_deposit: f64,

    /// Balance at the final year end
    pub final_balance: f64,
}

impl ProjectionResult {
    /// A result with no sample points and zero totals
    pub fn empty(input: ProjectionInput) -> Self {
        Self {
            input,
            series: Vec::new(),
            total_deposit: 0.0,
            final_balance: 0.0,
        }
    }

    pub fn add_point(&mut self, point: ProjectionPoint) {
        self.final_balance = point.balance;
        self.series.push(point);
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.series.iter().map(ProjectionPoint::label).collect()
    }

    pub fn balances(&self) -> Vec<f64> {
        self.series.iter().map(|p| p.balance).collect()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_interest = self.series.last().map(|p| p.interest_earned).unwrap_or(0.0);

        ProjectionSummary {
            years: self.series.len() as u32,
            total_deposit: self.total_deposit,
            total_interest,
            final_balance: self.final_balance,
        }
    }
}

/// Headline figures for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub years: u32,
    pub total_deposit: f64,
    pub total_interest: f64,
    pub final_balance: f64,
}
