use crate::adjust::WhatIf;
use crate::analysis::{
    RiskInputs, cash_flow_events, category_breakdown, generate_insights, monthly_summaries,
    risk_score,
};
use crate::calendar;
use crate::config::FinancialInputs;
use crate::metrics::SimulationMetrics;
use crate::model::SimulationResult;
use crate::simulation_state::SimulationState;

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

/// Run the cash-flow simulation.
///
/// Total over its inputs: nothing here validates, and the same inputs always
/// produce the same result. Call [`FinancialInputs::validate`] first to reject
/// out-of-range values. Horizons longer than [`calendar::MAX_MONTHS`] are
/// simulated for `MAX_MONTHS` only.
pub fn simulate(inputs: &FinancialInputs) -> SimulationResult {
    simulate_with_metrics(inputs).0
}

/// Run the simulation and also return what the day loop counted.
pub fn simulate_with_metrics(inputs: &FinancialInputs) -> (SimulationResult, SimulationMetrics) {
    let months = calendar::horizon_months(inputs.months);
    let total_days = calendar::total_days(months);

    let state = (0..total_days).fold(SimulationState::new(inputs), |state, day| {
        state.step(inputs, day)
    });

    let summaries = monthly_summaries(&state);
    let breakdown = category_breakdown(&summaries);
    let events = cash_flow_events(&state.ledger, &state.daily_balances, inputs.monthly_income);
    let tight_months = state.tight_months();
    let min_balance = state.min_balance();

    let risk = risk_score(&RiskInputs::new(
        state.negative_days,
        total_days,
        tight_months.len(),
        months,
        inputs.starting_cash,
        inputs.monthly_income,
        min_balance,
    ));

    let mut result = SimulationResult {
        min_balance,
        min_balance_day: state.min_balance_day,
        negative_days: state.negative_days,
        tight_months,
        end_balance: state.end_balance(),
        insights: Vec::new(),
        monthly_summaries: summaries,
        category_breakdown: breakdown,
        cash_flow_events: events,
        risk_score: risk,
        daily_balances: state.daily_balances,
        transactions: state.ledger,
    };
    result.insights = generate_insights(inputs, &result);

    tracing::debug!(
        days = total_days,
        transactions = state.metrics.total_transactions(),
        suppressed = state.metrics.total_suppressed(),
        min_balance = result.min_balance,
        risk = %result.risk_score,
        "Simulation complete"
    );

    (result, state.metrics)
}

/// Run one simulation per what-if, each against its own adjusted copy of
/// `inputs`. Results come back in the order of `what_ifs`.
pub fn simulate_what_ifs(inputs: &FinancialInputs, what_ifs: &[WhatIf]) -> Vec<SimulationResult> {
    #[cfg(feature = "parallel")]
    {
        what_ifs
            .par_iter()
            .map(|what_if| simulate(&what_if.apply(inputs)))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        what_ifs
            .iter()
            .map(|what_if| simulate(&what_if.apply(inputs)))
            .collect()
    }
}
