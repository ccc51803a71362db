//! Human-readable insights
//!
//! Each insight is a separate rule: a pure function from the finished run to
//! zero or one sentence. [`RULES`] fixes their order; every rule that fires
//! contributes its sentence.

use crate::apply::charged_months;
use crate::config::FinancialInputs;
use crate::model::{MonthlySummary, RiskScore, SimulationResult};

/// Everything a rule may look at. `result.insights` is not populated yet.
#[derive(Debug, Clone, Copy)]
pub struct InsightContext<'a> {
    pub inputs: &'a FinancialInputs,
    pub result: &'a SimulationResult,
}

impl<'a> InsightContext<'a> {
    pub fn new(inputs: &'a FinancialInputs, result: &'a SimulationResult) -> Self {
        Self { inputs, result }
    }

    fn income(&self) -> f64 {
        self.inputs.monthly_income
    }

    fn went_negative(&self) -> bool {
        self.result.min_balance < 0.0
    }

    /// Summary of the month containing the global minimum
    fn worst_month(&self) -> Option<&'a MonthlySummary> {
        let month = crate::calendar::month_index(self.result.min_balance_day);
        self.result.monthly_summaries.get(month as usize)
    }

    /// Simulated months
    fn months(&self) -> u32 {
        crate::calendar::horizon_months(self.inputs.months)
    }

    /// Spread an amount evenly over the horizon
    fn per_month(&self, amount: f64) -> f64 {
        match self.months() {
            0 => 0.0,
            months => amount / months as f64,
        }
    }
}

pub type InsightRule = fn(&InsightContext<'_>) -> Option<String>;

/// Rules in output order
pub const RULES: &[InsightRule] = &[
    risk_level,
    lowest_balance,
    worst_month_bills,
    worst_month_subscriptions,
    subscription_review,
    cancellation_suggestion,
    bill_clustering,
    safety_buffer,
    balance_trend,
    consecutive_negative_days,
    riskiest_month,
];

/// Run every rule in order and keep the sentences that fired.
pub fn generate_insights(inputs: &FinancialInputs, result: &SimulationResult) -> Vec<String> {
    let ctx = InsightContext::new(inputs, result);
    RULES.iter().filter_map(|rule| rule(&ctx)).collect()
}

fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

pub fn risk_level(ctx: &InsightContext<'_>) -> Option<String> {
    let r = ctx.result;
    Some(match r.risk_score {
        RiskScore::High => format!(
            "High risk: You have {} negative days and {} tight months. Consider increasing your starting buffer or reducing expenses.",
            r.negative_days,
            r.tight_months.len()
        ),
        RiskScore::Medium => {
            "Medium risk: You have some tight periods. Monitor your cash flow closely.".to_string()
        }
        RiskScore::Low => {
            "Low risk: Your cash flow stays positive throughout the simulation period.".to_string()
        }
    })
}

pub fn lowest_balance(ctx: &InsightContext<'_>) -> Option<String> {
    if !ctx.went_negative() {
        return None;
    }
    let day = ctx.result.min_balance_day;
    Some(format!(
        "Lowest balance: {} on day {} (month {}).",
        money(ctx.result.min_balance),
        day + 1,
        crate::calendar::month_index(day) + 1
    ))
}

pub fn worst_month_bills(ctx: &InsightContext<'_>) -> Option<String> {
    if !ctx.went_negative() {
        return None;
    }
    let month = ctx.worst_month()?;
    (month.bills > ctx.income() * 0.4).then(|| {
        format!(
            "Month {} has high bills ({}). Consider spreading bill due dates.",
            month.month_index + 1,
            money(month.bills)
        )
    })
}

pub fn worst_month_subscriptions(ctx: &InsightContext<'_>) -> Option<String> {
    if !ctx.went_negative() {
        return None;
    }
    let month = ctx.worst_month()?;
    (month.subscriptions > ctx.income() * 0.2).then(|| {
        format!(
            "Month {} has high subscription charges ({}).",
            month.month_index + 1,
            money(month.subscriptions)
        )
    })
}

/// Subscription spend over the horizon, counting only charged months.
pub fn total_subscription_cost(inputs: &FinancialInputs) -> f64 {
    let months = crate::calendar::horizon_months(inputs.months);
    inputs
        .subscriptions
        .iter()
        .map(|s| s.amount * charged_months(s, months) as f64)
        .sum()
}

pub fn subscription_review(ctx: &InsightContext<'_>) -> Option<String> {
    if ctx.inputs.subscriptions.is_empty() {
        return None;
    }
    let total = total_subscription_cost(ctx.inputs);
    if total <= ctx.income() * 0.2 {
        return None;
    }

    let months = ctx.months();
    if ctx.income() > 0.0 {
        let share = ctx.per_month(total) / ctx.income() * 100.0;
        Some(format!(
            "Your subscriptions total {} over {months} months ({share:.1}% of monthly income). Consider reviewing them.",
            money(total)
        ))
    } else {
        Some(format!(
            "Your subscriptions total {} over {months} months. Consider reviewing them.",
            money(total)
        ))
    }
}

pub fn cancellation_suggestion(ctx: &InsightContext<'_>) -> Option<String> {
    if !ctx.went_negative() {
        return None;
    }
    let floor = ctx.income() * 0.05;
    // Strict comparison keeps the first of equally priced subscriptions
    let priciest = ctx
        .inputs
        .subscriptions
        .iter()
        .filter(|s| !s.cancelled && s.amount > floor)
        .fold(None, |best: Option<&crate::config::Subscription>, s| match best {
            Some(b) if b.amount >= s.amount => Some(b),
            _ => Some(s),
        })?;

    Some(format!(
        "Consider cancelling {} (${}/month) to improve cash flow.",
        priciest.name, priciest.amount
    ))
}

/// Total billed per due day, in order of first appearance
pub fn bills_by_due_day(inputs: &FinancialInputs) -> Vec<(u32, f64)> {
    let mut totals: Vec<(u32, f64)> = Vec::new();
    for bill in &inputs.bills {
        match totals.iter_mut().find(|(day, _)| *day == bill.due_day) {
            Some((_, total)) => *total += bill.amount,
            None => totals.push((bill.due_day, bill.amount)),
        }
    }
    totals
}

pub fn bill_clustering(ctx: &InsightContext<'_>) -> Option<String> {
    let (day, total) = bills_by_due_day(ctx.inputs)
        .into_iter()
        .fold(None, |best: Option<(u32, f64)>, entry| match best {
            Some(b) if b.1 >= entry.1 => Some(b),
            _ => Some(entry),
        })?;

    (total > ctx.income() * 0.3).then(|| {
        format!(
            "Many bills are due on day {day} ({}). Consider spreading them across the month.",
            money(total)
        )
    })
}

pub fn safety_buffer(ctx: &InsightContext<'_>) -> Option<String> {
    if !ctx.went_negative() {
        return None;
    }
    let buffer = ctx.result.min_balance.abs() + ctx.income() * 0.1;
    Some(format!(
        "Recommended safety buffer: {} to avoid negative balances.",
        money(buffer)
    ))
}

pub fn balance_trend(ctx: &InsightContext<'_>) -> Option<String> {
    let start = ctx.inputs.starting_cash;
    let end = ctx.result.end_balance;

    Some(if end < start {
        format!(
            "Your ending balance ({}) is {} lower than starting. Average monthly loss: {}.",
            money(end),
            money(start - end),
            money(ctx.per_month(start - end))
        )
    } else {
        format!(
            "Your ending balance ({}) is {} higher than starting. Average monthly gain: {}.",
            money(end),
            money(end - start),
            money(ctx.per_month(end - start))
        )
    })
}

/// Length of the longest run of consecutive negative days
pub fn longest_negative_run(daily_balances: &[f64]) -> u32 {
    let mut longest = 0;
    let mut current = 0;
    for &balance in daily_balances {
        if balance < 0.0 {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

pub fn consecutive_negative_days(ctx: &InsightContext<'_>) -> Option<String> {
    let run = longest_negative_run(&ctx.result.daily_balances);
    (run > 5).then(|| format!("Warning: You have {run} consecutive days with negative balance."))
}

pub fn riskiest_month(ctx: &InsightContext<'_>) -> Option<String> {
    let worst = ctx
        .result
        .monthly_summaries
        .iter()
        .filter(|m| ctx.result.is_tight_month(m.month_index))
        .fold(None, |best: Option<&MonthlySummary>, m| match best {
            Some(b) if b.min_balance <= m.min_balance => Some(b),
            _ => Some(m),
        })?;

    Some(format!(
        "Highest risk month: Month {} (lowest balance: {}).",
        worst.month_index + 1,
        money(worst.min_balance)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_negative_run() {
        assert_eq!(longest_negative_run(&[]), 0);
        assert_eq!(longest_negative_run(&[1.0, -1.0, -1.0, 0.0, -1.0]), 2);
        assert_eq!(longest_negative_run(&[-1.0; 7]), 7);
    }

    #[test]
    fn test_bills_by_due_day_keeps_first_seen_order() {
        let inputs = crate::config::InputsBuilder::new()
            .bill("Rent", 900.0, 1)
            .bill("Car", 300.0, 15)
            .bill("Phone", 50.0, 1)
            .build();
        assert_eq!(bills_by_due_day(&inputs), vec![(1, 950.0), (15, 300.0)]);
    }

    #[test]
    fn test_riskiest_month_tie_keeps_first() {
        // flat -100 every day, so both months bottom out at the same balance
        let inputs = crate::config::InputsBuilder::new()
            .starting_cash(-100.0)
            .months(2)
            .build();
        let result = crate::simulation::simulate(&inputs);
        assert_eq!(result.tight_months, vec![0, 1]);

        let ctx = InsightContext::new(&inputs, &result);
        assert_eq!(
            riskiest_month(&ctx).as_deref(),
            Some("Highest risk month: Month 1 (lowest balance: $-100.00).")
        );
    }

    #[test]
    fn test_bill_clustering_tie_keeps_first_seen_day() {
        let inputs = crate::config::InputsBuilder::new()
            .income(1_000.0)
            .bill("Car", 400.0, 5)
            .bill("Rent", 400.0, 1)
            .build();
        let result = crate::simulation::simulate(&inputs);

        let ctx = InsightContext::new(&inputs, &result);
        assert_eq!(
            bill_clustering(&ctx).as_deref(),
            Some(
                "Many bills are due on day 5 ($400.00). Consider spreading them across the month."
            )
        );
    }

    #[test]
    fn test_money_format() {
        assert_eq!(money(12.5), "$12.50");
        assert_eq!(money(-3.456), "$-3.46");
    }
}
