use crate::model::{CategoryBreakdown, CategoryPercentages, MonthlySummary};

/// Expense totals by category across all months, with 0 to 100 shares.
///
/// Shares are all zero when nothing was spent.
pub fn category_breakdown(summaries: &[MonthlySummary]) -> CategoryBreakdown {
    let bills: f64 = summaries.iter().map(|m| m.bills).sum();
    let subscriptions: f64 = summaries.iter().map(|m| m.subscriptions).sum();
    let flexible_spending: f64 = summaries.iter().map(|m| m.flexible_spending).sum();
    let total = bills + subscriptions + flexible_spending;

    let share = |amount: f64| {
        if total > 0.0 {
            amount / total * 100.0
        } else {
            0.0
        }
    };

    CategoryBreakdown {
        bills,
        subscriptions,
        flexible_spending,
        total,
        percentages: CategoryPercentages {
            bills: share(bills),
            subscriptions: share(subscriptions),
            flexible_spending: share(flexible_spending),
        },
    }
}
