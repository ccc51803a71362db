//! Comparison of a scenario's run against a baseline run.

use serde::{Deserialize, Serialize};

use crate::model::SimulationResult;

/// Headline deltas, `current - baseline`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioComparison {
    pub min_balance_delta: f64,
    pub negative_days_delta: i64,
    pub end_balance_delta: f64,
}

impl ScenarioComparison {
    pub fn between(current: &SimulationResult, baseline: &SimulationResult) -> Self {
        Self {
            min_balance_delta: current.min_balance - baseline.min_balance,
            negative_days_delta: i64::from(current.negative_days)
                - i64::from(baseline.negative_days),
            end_balance_delta: current.end_balance - baseline.end_balance,
        }
    }

    pub fn min_balance_improved(&self) -> bool {
        self.min_balance_delta >= 0.0
    }

    pub fn negative_days_improved(&self) -> bool {
        self.negative_days_delta <= 0
    }

    pub fn end_balance_improved(&self) -> bool {
        self.end_balance_delta >= 0.0
    }
}

/// Day-by-day balance difference over the days both runs cover
pub fn daily_balance_deltas(current: &SimulationResult, baseline: &SimulationResult) -> Vec<f64> {
    current
        .daily_balances
        .iter()
        .zip(&baseline.daily_balances)
        .map(|(c, b)| c - b)
        .collect()
}
