//! Plain-text rendering of a simulation run for the terminal

use std::fmt;

use moneysim_core::ScenarioComparison;
use moneysim_core::model::{CashFlowEventKind, SimulationResult};

use crate::util::format::{format_currency, format_currency_delta, format_percentage};

/// A finished run, ready to print with `{}`
pub struct Report<'a> {
    pub title: &'a str,
    pub result: &'a SimulationResult,
    /// Deltas against the baseline, when one applies
    pub comparison: Option<ScenarioComparison>,
    /// How many cash-flow events to list
    pub max_events: usize,
}

impl<'a> Report<'a> {
    pub fn new(title: &'a str, result: &'a SimulationResult) -> Self {
        Self {
            title,
            result,
            comparison: None,
            max_events: 10,
        }
    }

    #[must_use]
    pub fn with_comparison(mut self, comparison: ScenarioComparison) -> Self {
        self.comparison = Some(comparison);
        self
    }

    #[must_use]
    pub fn max_events(mut self, max_events: usize) -> Self {
        self.max_events = max_events;
        self
    }

    fn write_headline(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        writeln!(f, "== {} ==", self.title)?;
        writeln!(f, "Risk:            {}", r.risk_score)?;
        writeln!(f, "Ending balance:  {}", format_currency(r.end_balance))?;
        writeln!(
            f,
            "Lowest balance:  {} (day {})",
            format_currency(r.min_balance),
            r.min_balance_day + 1
        )?;
        writeln!(f, "Negative days:   {}", r.negative_days)?;
        if !r.tight_months.is_empty() {
            let months: Vec<String> = r.tight_months.iter().map(|m| (m + 1).to_string()).collect();
            writeln!(f, "Tight months:    {}", months.join(", "))?;
        }
        Ok(())
    }

    fn write_months(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(
            f,
            "{:<6}{:>14}{:>14}{:>14}{:>14}{:>6}",
            "Month", "Income", "Expenses", "Net", "Ending", "Neg"
        )?;
        for m in &self.result.monthly_summaries {
            writeln!(
                f,
                "{:<6}{:>14}{:>14}{:>14}{:>14}{:>6}",
                m.month_index + 1,
                format_currency(m.income),
                format_currency(m.total_expenses),
                format_currency(m.net_change),
                format_currency(m.ending_balance),
                m.negative_days
            )?;
        }
        Ok(())
    }

    fn write_categories(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.result.category_breakdown;
        writeln!(f)?;
        writeln!(f, "Spending by category")?;
        for (label, amount, share) in [
            ("Bills", c.bills, c.percentages.bills),
            ("Subscriptions", c.subscriptions, c.percentages.subscriptions),
            ("Flexible", c.flexible_spending, c.percentages.flexible_spending),
        ] {
            writeln!(
                f,
                "  {label:<14}{:>14}{:>8}",
                format_currency(amount),
                format_percentage(share)
            )?;
        }
        Ok(())
    }

    fn write_events(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let events = &self.result.cash_flow_events;
        if events.is_empty() || self.max_events == 0 {
            return Ok(());
        }
        writeln!(f)?;
        writeln!(f, "Cash-flow events")?;
        for event in events.iter().take(self.max_events) {
            let marker = match event.kind {
                CashFlowEventKind::Income => "+",
                CashFlowEventKind::LargeBill | CashFlowEventKind::LargeSubscription => "-",
                CashFlowEventKind::NegativeBalance => "!",
            };
            writeln!(
                f,
                "  {marker} day {:>3}  {:<32}{:>14}",
                event.day + 1,
                event.description,
                format_currency(event.balance_after)
            )?;
        }
        if events.len() > self.max_events {
            writeln!(f, "  ... {} more", events.len() - self.max_events)?;
        }
        Ok(())
    }

    fn write_comparison(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(cmp) = self.comparison else {
            return Ok(());
        };
        writeln!(f)?;
        writeln!(f, "Compared to baseline")?;
        writeln!(f, "  Lowest balance  {}", format_currency_delta(cmp.min_balance_delta))?;
        writeln!(f, "  Negative days   {:+}", cmp.negative_days_delta)?;
        writeln!(f, "  Ending balance  {}", format_currency_delta(cmp.end_balance_delta))
    }

    fn write_insights(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "Insights")?;
        for insight in &self.result.insights {
            writeln!(f, "  * {insight}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_headline(f)?;
        self.write_months(f)?;
        self.write_categories(f)?;
        self.write_events(f)?;
        self.write_comparison(f)?;
        self.write_insights(f)
    }
}
