//! Projection engine for single-account and TFSA/RRSP projections

mod state;
mod series;
mod engine;
mod dual;
mod advice;

pub use state::{AccountState, monthly_rate, round_cents};
pub use series::{ProjectionInput, ProjectionPoint, ProjectionResult, ProjectionSummary, whole_years, year_label};
pub use engine::{ProjectionEngine, ProjectionConfig, DEFAULT_DUAL_ANNUAL_RATE, DEFAULT_MAX_YEARS, project, simulate_dual};
pub use dual::{DualProjection, RefundTiers, contribution_multiplier};
pub use advice::{Recommendation, recommend};
