//! Core projection engine for monthly-compounded savings projections

use log::{debug, warn};

use super::dual::{DualProjection, RefundTiers};
use super::series::{ProjectionInput, ProjectionPoint, ProjectionResult};
use super::state::{round_cents, AccountState};

/// Annual rate used by the TFSA/RRSP simulator
pub const DEFAULT_DUAL_ANNUAL_RATE: f64 = 5.0;

/// Longest horizon a projection will run
pub const DEFAULT_MAX_YEARS: u32 = 150;

/// Configuration for projection runs
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Annual rate (percent) shared by both dual-track accounts
    pub dual_annual_rate_percent: f64,

    /// Income tiers that scale the RRSP contribution
    pub refund_tiers: RefundTiers,

    /// Inputs with more years than this are rejected
    pub max_years: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            dual_annual_rate_percent: DEFAULT_DUAL_ANNUAL_RATE,
            refund_tiers: RefundTiers::default(),
            max_years: DEFAULT_MAX_YEARS,
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    fn accepts(&self, input: &ProjectionInput) -> bool {
        input.is_valid() && input.years <= self.config.max_years
    }

    /// Run a single-account projection.
    ///
    /// Invalid input yields an empty result rather than an error.
    pub fn project(&self, input: &ProjectionInput) -> ProjectionResult {
        if !self.accepts(input) {
            warn!("Ignoring invalid projection input: {:?}", input);
            return ProjectionResult::empty(*input);
        }

        let mut result = ProjectionResult::empty(*input);
        let mut state = AccountState::new(input.monthly_contribution, input.annual_rate_percent);

        for _month in 1..=input.total_months() {
            state.advance_month();
            if state.is_year_end() {
                result.add_point(ProjectionPoint::from_state(&state));
            }
        }

        result.total_deposit = round_cents(input.monthly_contribution * input.total_months() as f64);

        debug!(
            "Projected {} years at {}%: final balance {:.2}",
            input.years, input.annual_rate_percent, result.final_balance
        );
        result
    }

    /// Run the TFSA and RRSP tracks side by side.
    ///
    /// Both accounts compound at the configured dual rate; the RRSP deposit is
    /// the TFSA deposit scaled by the income-based contribution multiplier.
    pub fn simulate_dual(&self, income: f64, monthly_contribution: f64, years: u32) -> DualProjection {
        let rate = self.config.dual_annual_rate_percent;
        let multiplier = self.config.refund_tiers.multiplier(income);
        let mut projection = DualProjection::empty(income, monthly_contribution, multiplier, rate, years);

        let tfsa_input = ProjectionInput::new(monthly_contribution, rate, years);
        if !income.is_finite() || !self.accepts(&tfsa_input) {
            warn!(
                "Ignoring invalid simulation input: income={}, monthly={}, years={}",
                income, monthly_contribution, years
            );
            projection.years = 0;
            return projection;
        }

        let mut tfsa = AccountState::new(monthly_contribution, rate);
        let mut rrsp = AccountState::new(projection.rrsp_contribution, rate);

        for _month in 1..=tfsa_input.total_months() {
            tfsa.advance_month();
            rrsp.advance_month();
            if tfsa.is_year_end() {
                projection.tfsa.push(ProjectionPoint::from_state(&tfsa));
                projection.rrsp.push(ProjectionPoint::from_state(&rrsp));
            }
        }

        debug!(
            "Simulated {} years for income {}: multiplier {:.2}, gap {:.2}",
            years,
            income,
            multiplier,
            projection.final_gap()
        );
        projection
    }
}

/// Project with the default configuration
pub fn project(monthly_contribution: f64, annual_rate_percent: f64, years: u32) -> ProjectionResult {
    ProjectionEngine::default().project(&ProjectionInput::new(
        monthly_contribution,
        annual_rate_percent,
        years,
    ))
}

/// Simulate TFSA vs RRSP with the default configuration
pub fn simulate_dual(income: f64, monthly_contribution: f64, years: u32) -> DualProjection {
    ProjectionEngine::default().simulate_dual(income, monthly_contribution, years)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_regression_fixture() {
        let result = project(200.0, 5.0, 5);

        assert_eq!(result.series.len(), 5);
        assert_relative_eq!(result.final_balance, 13601.22, epsilon = 1e-6);
        assert_relative_eq!(result.total_deposit, 12000.0);
        assert_relative_eq!(result.series[0].balance, 2455.77, epsilon = 1e-6);

        for pair in result.series.windows(2) {
            assert!(pair[1].balance > pair[0].balance);
        }
        assert_eq!(result.labels(), vec!["Year 1", "Year 2", "Year 3", "Year 4", "Year 5"]);
    }

    #[test]
    fn test_zero_contribution_stays_zero() {
        for &(rate, years) in &[(5.0, 5), (-3.0, 10), (12.5, 1), (0.0, 30)] {
            let result = project(0.0, rate, years);
            assert_eq!(result.series.len(), years as usize);
            for point in &result.series {
                assert_eq!(point.balance, 0.0);
                assert_eq!(point.interest_earned, 0.0);
            }
        }
    }

    #[test]
    fn test_zero_rate_is_sum_of_deposits() {
        let result = project(150.0, 0.0, 3);
        assert_relative_eq!(result.final_balance, 5400.0);
        assert!(result.series.iter().all(|p| p.interest_earned == 0.0));
    }

    #[test]
    fn test_negative_rate_is_not_special_cased() {
        let result = project(100.0, -5.0, 2);

        assert_eq!(result.series.len(), 2);
        assert!(result.final_balance < result.total_deposit);
        assert!(result.series[1].interest_earned < 0.0);
    }

    #[test]
    fn test_zero_years_yields_no_points() {
        let result = project(100.0, 5.0, 0);
        assert!(result.is_empty());
        assert_eq!(result.total_deposit, 0.0);
        assert_eq!(result.final_balance, 0.0);
    }

    #[test]
    fn test_invalid_input_yields_empty_result() {
        assert!(project(f64::NAN, 5.0, 5).is_empty());
        assert!(project(-10.0, 5.0, 5).is_empty());
        assert!(project(100.0, f64::NAN, 5).is_empty());
    }

    #[test]
    fn test_balance_is_deposit_plus_interest() {
        let result = project(333.33, 6.75, 25);
        for point in &result.series {
            assert_relative_eq!(
                point.balance,
                point.cumulative_deposit + point.interest_earned,
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_monotonic_for_non_negative_rates() {
        for &(monthly, rate) in &[(50.0, 0.0), (200.0, 3.0), (1000.0, 9.5)] {
            let result = project(monthly, rate, 40);
            for pair in result.series.windows(2) {
                assert!(pair[1].balance >= pair[0].balance);
            }
        }
    }

    #[test]
    fn test_dual_tracks_are_aligned() {
        let dual = simulate_dual(60_000.0, 500.0, 10);

        assert_eq!(dual.tfsa.len(), 10);
        assert_eq!(dual.rrsp.len(), 10);
        assert_relative_eq!(dual.contribution_multiplier, 1.25);
        assert_relative_eq!(dual.rrsp_contribution, 625.0);

        for (t, r) in dual.tfsa.iter().zip(&dual.rrsp) {
            assert_eq!(t.year, r.year);
            assert!(r.balance > t.balance);
        }
    }

    #[test]
    fn test_dual_tfsa_matches_single_projection() {
        let dual = simulate_dual(40_000.0, 250.0, 8);
        let single = project(250.0, DEFAULT_DUAL_ANNUAL_RATE, 8);

        assert_eq!(dual.tfsa, single.series);
    }

    #[test]
    fn test_dual_uses_configured_rate() {
        let engine = ProjectionEngine::new(ProjectionConfig {
            dual_annual_rate_percent: 0.0,
            ..Default::default()
        });
        let dual = engine.simulate_dual(90_000.0, 100.0, 1);

        assert_relative_eq!(dual.tfsa[0].balance, 1200.0);
        assert_relative_eq!(dual.rrsp[0].balance, 1560.0, epsilon = 1e-9);
    }

    #[test]
    fn test_years_above_cap_are_rejected() {
        let result = project(100.0, 5.0, DEFAULT_MAX_YEARS + 1);
        assert!(result.is_empty());
        assert_eq!(result.total_deposit, 0.0);

        let huge = project(100.0, 5.0, u32::MAX);
        assert!(huge.is_empty());

        let dual = simulate_dual(60_000.0, 500.0, DEFAULT_MAX_YEARS + 1);
        assert!(dual.tfsa.is_empty());
        assert_eq!(dual.years, 0);
    }

    #[test]
    fn test_years_at_cap_are_projected() {
        let result = project(10.0, 0.0, DEFAULT_MAX_YEARS);
        assert_eq!(result.series.len(), DEFAULT_MAX_YEARS as usize);
        assert_relative_eq!(result.final_balance, 120.0 * DEFAULT_MAX_YEARS as f64, epsilon = 1e-6);
    }

    #[test]
    fn test_custom_year_cap() {
        let engine = ProjectionEngine::new(ProjectionConfig {
            max_years: 3,
            ..Default::default()
        });

        assert_eq!(engine.project(&ProjectionInput::new(100.0, 5.0, 3)).series.len(), 3);
        assert!(engine.project(&ProjectionInput::new(100.0, 5.0, 4)).is_empty());
        assert!(engine.simulate_dual(60_000.0, 100.0, 4).rrsp.is_empty());
    }

    #[test]
    fn test_dual_invalid_input_is_empty() {
        let dual = simulate_dual(f64::NAN, 500.0, 10);
        assert!(dual.tfsa.is_empty());
        assert!(dual.rrsp.is_empty());
        assert_eq!(dual.years, 0);
    }
}
