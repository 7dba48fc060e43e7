//! Scenario runner for batch and side-by-side projections
//!
//! Holds one configured engine and runs many inputs through it. The
//! calculator's compare mode is a two-input run.

use serde::Serialize;

use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionInput, ProjectionResult};

/// Two projections shown side by side
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub first: ProjectionResult,
    pub second: ProjectionResult,
}

impl Comparison {
    /// Second final balance minus first final balance
    pub fn final_balance_gap(&self) -> f64 {
        self.second.final_balance - self.first.final_balance
    }
}

/// Pre-configured runner for many projections
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    pub fn run(&self, input: &ProjectionInput) -> ProjectionResult {
        self.engine.project(input)
    }

    /// Run projections for multiple inputs, preserving order
    pub fn run_batch(&self, inputs: &[ProjectionInput]) -> Vec<ProjectionResult> {
        inputs.iter().map(|input| self.engine.project(input)).collect()
    }

    pub fn compare(&self, first: &ProjectionInput, second: &ProjectionInput) -> Comparison {
        Comparison {
            first: self.engine.project(first),
            second: self.engine.project(second),
        }
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }
}
