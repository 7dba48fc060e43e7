//! TFSA vs RRSP dual-track comparison
//!
//! The RRSP track reinvests an approximate tax refund by scaling the monthly
//! contribution with an income-tier multiplier. The tiers are illustrative,
//! not a statement of tax law.

use serde::{Deserialize, Serialize};

use super::series::{year_label, ProjectionPoint};

/// Income tiers for the RRSP contribution multiplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundTiers {
    /// Income strictly above this earns `upper_bonus`
    pub upper_threshold: f64,
    pub upper_bonus: f64,

    /// Income strictly above this (and not above the upper threshold) earns `middle_bonus`
    pub middle_threshold: f64,
    pub middle_bonus: f64,

    /// Bonus for everyone else
    pub base_bonus: f64,
}

impl Default for RefundTiers {
    fn default() -> Self {
        Self {
            upper_threshold: 80_000.0,
            upper_bonus: 0.30,
            middle_threshold: 50_000.0,
            middle_bonus: 0.25,
            base_bonus: 0.20,
        }
    }
}

impl RefundTiers {
    pub fn bonus(&self, income: f64) -> f64 {
        if income > self.upper_threshold {
            self.upper_bonus
        } else if income > self.middle_threshold {
            self.middle_bonus
        } else {
            self.base_bonus
        }
    }

    pub fn multiplier(&self, income: f64) -> f64 {
        1.0 + self.bonus(income)
    }
}

/// Contribution multiplier under the default tiers
pub fn contribution_multiplier(income: f64) -> f64 {
    RefundTiers::default().multiplier(income)
}

/// Result of a TFSA vs RRSP simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DualProjection {
    pub income: f64,

    /// TFSA deposit per month
    pub monthly_contribution: f64,

    /// RRSP deposit per month (TFSA deposit times the multiplier)
    pub rrsp_contribution: f64,

    pub contribution_multiplier: f64,
    pub annual_rate_percent: f64,
    pub years: u32,

    pub tfsa: Vec<ProjectionPoint>,
    pub rrsp: Vec<ProjectionPoint>,
}

impl DualProjection {
    pub(crate) fn empty(
        income: f64,
        monthly_contribution: f64,
        contribution_multiplier: f64,
        annual_rate_percent: f64,
        years: u32,
    ) -> Self {
        Self {
            income,
            monthly_contribution,
            rrsp_contribution: monthly_contribution * contribution_multiplier,
            contribution_multiplier,
            annual_rate_percent,
            years,
            tfsa: Vec::with_capacity(years.min(100) as usize),
            rrsp: Vec::with_capacity(years.min(100) as usize),
        }
    }

    /// Shared year labels for both tracks
    pub fn labels(&self) -> Vec<String> {
        self.tfsa.iter().map(|p| year_label(p.year)).collect()
    }

    pub fn tfsa_balances(&self) -> Vec<f64> {
        self.tfsa.iter().map(|p| p.balance).collect()
    }

    pub fn rrsp_balances(&self) -> Vec<f64> {
        self.rrsp.iter().map(|p| p.balance).collect()
    }

    /// RRSP final balance minus TFSA final balance
    pub fn final_gap(&self) -> f64 {
        let tfsa = self.tfsa.last().map(|p| p.balance).unwrap_or(0.0);
        let rrsp = self.rrsp.last().map(|p| p.balance).unwrap_or(0.0);
        rrsp - tfsa
    }
}
