//! Simulation results
//!
//! Contains the output types from running a simulation: the transaction
//! ledger, monthly summaries, category breakdown, notable events and the
//! risk classification. Everything here is created fresh by each run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a ledger transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Bill,
    Subscription,
    FlexibleSpending,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 4] = [
        TransactionKind::Income,
        TransactionKind::Bill,
        TransactionKind::Subscription,
        TransactionKind::FlexibleSpending,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Bill => "bill",
            Self::Subscription => "subscription",
            Self::FlexibleSpending => "flexible_spending",
        }
    }
}

/// A single balance movement on a simulated day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// 0-based day index
    pub day: u32,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Positive for credits, negative for debits
    pub amount: f64,
    pub description: String,
    pub balance_after: f64,
}

/// Aggregates for one 30-day block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// 0-based month index
    pub month_index: u32,
    pub income: f64,
    pub bills: f64,
    pub subscriptions: f64,
    pub flexible_spending: f64,
    pub total_expenses: f64,
    pub net_change: f64,
    pub starting_balance: f64,
    pub ending_balance: f64,
    pub average_daily_balance: f64,
    pub negative_days: u32,
    pub min_balance: f64,
}

/// Percentage shares (0 to 100) of each expense category
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPercentages {
    pub bills: f64,
    pub subscriptions: f64,
    pub flexible_spending: f64,
}

/// Expense totals across the whole horizon
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub bills: f64,
    pub subscriptions: f64,
    pub flexible_spending: f64,
    pub total: f64,
    pub percentages: CategoryPercentages,
}

/// Why a day was flagged as notable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashFlowEventKind {
    Income,
    LargeBill,
    LargeSubscription,
    NegativeBalance,
}

/// A notable point in the balance series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowEvent {
    pub day: u32,
    #[serde(rename = "type")]
    pub kind: CashFlowEventKind,
    pub amount: f64,
    pub description: String,
    /// End-of-day balance on `day`
    pub balance_after: f64,
}

/// Three-tier ordinal risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskScore {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskScore::Low => write!(f, "low"),
            RiskScore::Medium => write!(f, "medium"),
            RiskScore::High => write!(f, "high"),
        }
    }
}

/// Complete results from a single simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// End-of-day balance for every simulated day
    pub daily_balances: Vec<f64>,
    pub min_balance: f64,
    /// First day index achieving `min_balance`
    pub min_balance_day: u32,
    pub negative_days: u32,
    /// Month indices (ascending) with at least one negative day
    pub tight_months: Vec<u32>,
    pub end_balance: f64,
    pub insights: Vec<String>,

    /// Every balance movement in day order
    pub transactions: Vec<Transaction>,
    pub monthly_summaries: Vec<MonthlySummary>,
    pub category_breakdown: CategoryBreakdown,
    pub cash_flow_events: Vec<CashFlowEvent>,
    pub risk_score: RiskScore,
}

impl SimulationResult {
    /// Number of simulated days
    pub fn total_days(&self) -> usize {
        self.daily_balances.len()
    }

    /// Balance at the end of `day`, if simulated
    pub fn balance_on(&self, day: u32) -> Option<f64> {
        self.daily_balances.get(day as usize).copied()
    }

    /// True if `month` had at least one negative day
    pub fn is_tight_month(&self, month: u32) -> bool {
        self.tight_months.contains(&month)
    }

    // === Helper methods to filter the ledger ===

    /// Get all transactions of a kind
    pub fn transactions_of(&self, kind: TransactionKind) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(move |t| t.kind == kind)
    }

    /// Get all transactions on a given day
    pub fn transactions_on(&self, day: u32) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(move |t| t.day == day)
    }

    /// Get all cash-flow events of a kind
    pub fn events_of(&self, kind: CashFlowEventKind) -> impl Iterator<Item = &CashFlowEvent> {
        self.cash_flow_events.iter().filter(move |e| e.kind == kind)
    }
}
