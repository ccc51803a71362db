//! Simulation metrics collection for debugging
//!
//! Counts what the day loop did: days simulated, ledger entries by kind, and
//! subscription charges that were skipped and why.

use std::collections::HashMap;

use crate::apply::ChargeStatus;
use crate::model::TransactionKind;

/// Metrics collected during simulation execution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationMetrics {
    /// Total number of simulated days
    pub days_simulated: u32,
    /// Ledger entries written, per kind
    pub transactions_by_kind: HashMap<TransactionKind, u32>,
    /// Subscription charges skipped because of cancellation
    pub suppressed_cancelled: u32,
    /// Subscription charges skipped because of a pause
    pub suppressed_paused: u32,
}

impl SimulationMetrics {
    /// Create empty metrics
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_day(&mut self) {
        self.days_simulated += 1;
    }

    pub fn record_transaction(&mut self, kind: TransactionKind) {
        *self.transactions_by_kind.entry(kind).or_insert(0) += 1;
    }

    pub fn record_suppressed(&mut self, status: ChargeStatus) {
        match status {
            ChargeStatus::Cancelled => self.suppressed_cancelled += 1,
            ChargeStatus::Paused => self.suppressed_paused += 1,
            ChargeStatus::Charged => {}
        }
    }

    /// Ledger entries of one kind
    #[must_use]
    pub fn transactions(&self, kind: TransactionKind) -> u32 {
        self.transactions_by_kind.get(&kind).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total_transactions(&self) -> u32 {
        self.transactions_by_kind.values().sum()
    }

    #[must_use]
    pub fn total_suppressed(&self) -> u32 {
        self.suppressed_cancelled + self.suppressed_paused
    }
}
