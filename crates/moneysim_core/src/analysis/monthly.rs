use crate::calendar;
use crate::model::MonthlySummary;
use crate::simulation_state::SimulationState;

/// One summary per simulated month, chained so each month starts where the
/// previous one ended.
pub fn monthly_summaries(state: &SimulationState) -> Vec<MonthlySummary> {
    let total_days = state.daily_balances.len() as u32;
    let mut previous_end = state.starting_cash;

    state
        .months
        .iter()
        .enumerate()
        .map(|(index, month)| {
            let range = calendar::month_range(index as u32, total_days);
            let ending_balance = if range.is_empty() {
                previous_end
            } else {
                state.daily_balances[range.end - 1]
            };
            let total_expenses = month.total_expenses();

            let summary = MonthlySummary {
                month_index: index as u32,
                income: month.income,
                bills: month.bills,
                subscriptions: month.subscriptions,
                flexible_spending: month.flexible_spending,
                total_expenses,
                net_change: month.income - total_expenses,
                starting_balance: previous_end,
                ending_balance,
                average_daily_balance: month.average_daily_balance(),
                negative_days: month.negative_days,
                min_balance: if month.days == 0 {
                    ending_balance
                } else {
                    month.min_balance
                },
            };
            previous_end = ending_balance;
            summary
        })
        .collect()
}
