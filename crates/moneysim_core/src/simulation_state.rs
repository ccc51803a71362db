use crate::calendar;
use crate::config::FinancialInputs;
use crate::metrics::SimulationMetrics;
use crate::model::{Transaction, TransactionKind};

/// Per-month running totals, one slot per simulated month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthAccumulator {
    pub income: f64,
    pub bills: f64,
    pub subscriptions: f64,
    pub flexible_spending: f64,
    pub negative_days: u32,
    /// Lowest end-of-day balance seen in the month
    pub min_balance: f64,
    pub balance_sum: f64,
    pub days: u32,
}

impl Default for MonthAccumulator {
    fn default() -> Self {
        Self {
            income: 0.0,
            bills: 0.0,
            subscriptions: 0.0,
            flexible_spending: 0.0,
            negative_days: 0,
            min_balance: f64::INFINITY,
            balance_sum: 0.0,
            days: 0,
        }
    }
}

impl MonthAccumulator {
    pub fn total_expenses(&self) -> f64 {
        self.bills + self.subscriptions + self.flexible_spending
    }

    pub fn average_daily_balance(&self) -> f64 {
        if self.days == 0 {
            0.0
        } else {
            self.balance_sum / self.days as f64
        }
    }

    fn add(&mut self, kind: TransactionKind, amount: f64) {
        match kind {
            TransactionKind::Income => self.income += amount,
            TransactionKind::Bill => self.bills += amount,
            TransactionKind::Subscription => self.subscriptions += amount,
            TransactionKind::FlexibleSpending => self.flexible_spending += amount,
        }
    }
}

/// Accumulator threaded through the day loop.
///
/// Each simulated day is one [`SimulationState::step`]; the whole run is a
/// fold over the day indices. Nothing outside the state is mutated.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub starting_cash: f64,
    pub balance: f64,
    /// Lowest end-of-day balance so far (`INFINITY` before the first day)
    pub min_balance: f64,
    pub min_balance_day: u32,
    pub negative_days: u32,
    pub daily_balances: Vec<f64>,
    pub ledger: Vec<Transaction>,
    /// One slot per simulated month, indexed by month index
    pub months: Vec<MonthAccumulator>,
    pub metrics: SimulationMetrics,
}

impl SimulationState {
    pub fn new(inputs: &FinancialInputs) -> Self {
        let months = calendar::horizon_months(inputs.months) as usize;
        let total_days = calendar::total_days(months as u32) as usize;
        Self {
            starting_cash: inputs.starting_cash,
            balance: inputs.starting_cash,
            min_balance: f64::INFINITY,
            min_balance_day: 0,
            negative_days: 0,
            daily_balances: Vec::with_capacity(total_days),
            // income + flex per day, plus a little room for charges
            ledger: Vec::with_capacity(total_days * 2 + inputs.bills.len() * months),
            months: vec![MonthAccumulator::default(); months],
            metrics: SimulationMetrics::new(),
        }
    }

    /// Run one simulated day and hand the state back.
    pub fn step(mut self, inputs: &FinancialInputs, day: u32) -> Self {
        crate::apply::apply_day(&mut self, inputs, day);
        self.close_day(day);
        self
    }

    /// Move `amount` (signed, positive = credit) into the balance and record it.
    pub fn post(&mut self, day: u32, kind: TransactionKind, amount: f64, description: String) {
        self.balance += amount;
        self.month_mut(day).add(kind, amount.abs());
        self.metrics.record_transaction(kind);
        self.ledger.push(Transaction {
            day,
            kind,
            amount,
            description,
            balance_after: self.balance,
        });
    }

    /// Record the end-of-day balance and update running statistics.
    pub fn close_day(&mut self, day: u32) {
        let balance = self.balance;
        self.daily_balances.push(balance);
        self.metrics.record_day();

        // Strict comparison keeps the first day that reaches the minimum
        if balance < self.min_balance {
            self.min_balance = balance;
            self.min_balance_day = day;
        }

        let negative = balance < 0.0;
        if negative {
            self.negative_days += 1;
        }

        let month = self.month_mut(day);
        month.balance_sum += balance;
        month.days += 1;
        if negative {
            month.negative_days += 1;
        }
        if balance < month.min_balance {
            month.min_balance = balance;
        }
    }

    /// Month indices with at least one negative day, ascending
    pub fn tight_months(&self) -> Vec<u32> {
        self.months
            .iter()
            .enumerate()
            .filter(|(_, m)| m.negative_days > 0)
            .map(|(i, _)| i as u32)
            .collect()
    }

    /// Balance after the last simulated day (starting cash if none)
    pub fn end_balance(&self) -> f64 {
        self.daily_balances
            .last()
            .copied()
            .unwrap_or(self.starting_cash)
    }

    /// Global minimum, falling back to starting cash for an empty horizon
    pub fn min_balance(&self) -> f64 {
        if self.daily_balances.is_empty() {
            self.starting_cash
        } else {
            self.min_balance
        }
    }

    fn month_mut(&mut self, day: u32) -> &mut MonthAccumulator {
        let index = calendar::month_index(day) as usize;
        &mut self.months[index]
    }
}
