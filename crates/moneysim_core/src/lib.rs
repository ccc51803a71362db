//! Personal cash-flow scenario simulation library
//!
//! This crate projects a daily account balance over a short horizon (1 to 6
//! months) from a monthly income, a starting balance, recurring bills,
//! subscriptions and flexible spending. It supports:
//! - A simplified 30-day month calendar
//! - Subscription cancellation (effective the month after) and per-month pauses
//! - Monthly summaries, category breakdown and notable cash-flow events
//! - Risk tiering and heuristic insights derived from the balance series
//! - What-if adjustments and baseline comparisons
//!
//! # Builder DSL
//!
//! ```
//! use moneysim_core::config::{InputsBuilder, SubscriptionBuilder};
//! use moneysim_core::simulation::simulate;
//!
//! let inputs = InputsBuilder::new()
//!     .income(3_000.0)
//!     .starting_cash(1_000.0)
//!     .flex_spend(600.0)
//!     .months(3)
//!     .bill("Rent", 1_200.0, 1)
//!     .subscription(SubscriptionBuilder::new("Streaming", 15.0, 5).cancelled())
//!     .build();
//!
//! let result = simulate(&inputs);
//! assert_eq!(result.daily_balances.len(), 90);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod adjust;
pub mod analysis;
pub mod apply;
pub mod calendar;
pub mod compare;
pub mod error;
pub mod metrics;
pub mod simulation;
pub mod simulation_state;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use adjust::WhatIf;
pub use compare::ScenarioComparison;
pub use config::{
    Bill, BillId, FinancialInputs, InputsBuilder, Subscription, SubscriptionBuilder,
    SubscriptionId,
};
pub use model::{RiskScore, SimulationResult};
pub use simulation::{simulate, simulate_what_ifs, simulate_with_metrics};
