//! Integration tests for the moneysim simulation engine
//!
//! Tests are organized by topic:
//! - `basic` - Day loop mechanics and the reference scenarios
//! - `subscriptions` - Cancellation and pause suppression
//! - `invariants` - Properties checked over seeded random inputs
//! - `analysis` - Summaries, events, risk and insights end to end
//! - `builder_dsl` - Builder DSL for fluent input setup
//! - `what_if` - Adjusted runs and baseline comparison

mod basic;
mod invariants;
mod what_if;

const EPS: f64 = 1e-9;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}
