//! Day-step rules
//!
//! Applies every balance movement of a single simulated day to the state, in
//! a fixed order: income (first day of a month), bills, subscriptions, then
//! the flat daily share of flexible spending.

use crate::calendar;
use crate::config::{FinancialInputs, Subscription};
use crate::model::TransactionKind;
use crate::simulation_state::SimulationState;

/// Outcome of a subscription on its charge day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeStatus {
    Charged,
    /// Cancelled, and past month 0
    Cancelled,
    /// Month is listed in `paused_months`
    Paused,
}

/// Decide whether `subscription` is charged in `month`.
///
/// Cancellation is checked first and only bites from month 1 onward.
pub fn charge_status(subscription: &Subscription, month: u32) -> ChargeStatus {
    if subscription.cancelled && month > 0 {
        ChargeStatus::Cancelled
    } else if subscription.is_paused_in(month) {
        ChargeStatus::Paused
    } else {
        ChargeStatus::Charged
    }
}

/// Number of months in `0..months` in which `subscription` is charged
pub fn charged_months(subscription: &Subscription, months: u32) -> u32 {
    (0..months)
        .filter(|&m| charge_status(subscription, m) == ChargeStatus::Charged)
        .count() as u32
}

/// Apply all of `day`'s transactions to `state`.
pub fn apply_day(state: &mut SimulationState, inputs: &FinancialInputs, day: u32) {
    let day_of_month = calendar::day_of_month(day);
    let month = calendar::month_index(day);

    if calendar::is_month_start(day) {
        state.post(
            day,
            TransactionKind::Income,
            inputs.monthly_income,
            "Monthly income".to_string(),
        );
    }

    for bill in inputs.bills.iter().filter(|b| b.due_day == day_of_month) {
        state.post(
            day,
            TransactionKind::Bill,
            -bill.amount,
            format!("Bill: {}", bill.name),
        );
    }

    for sub in inputs
        .subscriptions
        .iter()
        .filter(|s| s.charge_day == day_of_month)
    {
        match charge_status(sub, month) {
            ChargeStatus::Charged => state.post(
                day,
                TransactionKind::Subscription,
                -sub.amount,
                format!("Subscription: {}", sub.name),
            ),
            status => {
                tracing::trace!(subscription = %sub.id, month, ?status, "Charge suppressed");
                state.metrics.record_suppressed(status);
            }
        }
    }

    state.post(
        day,
        TransactionKind::FlexibleSpending,
        -inputs.daily_flex_spend(),
        "Daily flexible spending".to_string(),
    );
}
