mod ids;
mod results;

pub use ids::{BillId, SubscriptionId};
pub use results::{
    CashFlowEvent, CashFlowEventKind, CategoryBreakdown, CategoryPercentages, MonthlySummary,
    RiskScore, SimulationResult, Transaction, TransactionKind,
};
