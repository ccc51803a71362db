//! Metrics derived from a finished day loop.
//!
//! Runs in a fixed order over the same time series: monthly aggregation,
//! category totals, cash-flow events, risk scoring, then insights.

pub mod categories;
pub mod events;
pub mod insights;
pub mod monthly;
pub mod risk;

pub use categories::category_breakdown;
pub use events::{LARGE_CHARGE_SHARE, cash_flow_events};
pub use insights::{InsightContext, InsightRule, RULES, generate_insights};
pub use monthly::monthly_summaries;
pub use risk::{RiskInputs, risk_score};
