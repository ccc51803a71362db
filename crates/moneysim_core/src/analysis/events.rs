use crate::model::{CashFlowEvent, CashFlowEventKind, Transaction, TransactionKind};

/// Charges at or above this share of monthly income are flagged as large
pub const LARGE_CHARGE_SHARE: f64 = 0.10;

/// Notable points of the run, in day order.
///
/// Per day: the income receipt, every large bill, every large subscription,
/// and the day a negative run begins. `transactions` must be day-ordered,
/// which the day loop guarantees. Event balances are end-of-day balances.
pub fn cash_flow_events(
    transactions: &[Transaction],
    daily_balances: &[f64],
    monthly_income: f64,
) -> Vec<CashFlowEvent> {
    let threshold = monthly_income * LARGE_CHARGE_SHARE;
    let mut events = Vec::new();
    let mut cursor = 0;

    for (index, &balance_after) in daily_balances.iter().enumerate() {
        let day = index as u32;
        let start = cursor;
        while cursor < transactions.len() && transactions[cursor].day == day {
            cursor += 1;
        }
        let todays = &transactions[start..cursor];

        if let Some(income) = todays.iter().find(|t| t.kind == TransactionKind::Income) {
            events.push(CashFlowEvent {
                day,
                kind: CashFlowEventKind::Income,
                amount: income.amount,
                description: "Monthly income received".to_string(),
                balance_after,
            });
        }

        for (kind, event_kind) in [
            (TransactionKind::Bill, CashFlowEventKind::LargeBill),
            (TransactionKind::Subscription, CashFlowEventKind::LargeSubscription),
        ] {
            events.extend(
                todays
                    .iter()
                    .filter(|t| t.kind == kind && t.amount.abs() >= threshold)
                    .map(|t| CashFlowEvent {
                        day,
                        kind: event_kind,
                        amount: t.amount,
                        description: t.description.clone(),
                        balance_after,
                    }),
            );
        }

        let run_starts = index == 0 || daily_balances[index - 1] >= 0.0;
        if balance_after < 0.0 && run_starts {
            events.push(CashFlowEvent {
                day,
                kind: CashFlowEventKind::NegativeBalance,
                amount: balance_after,
                description: "Balance went negative".to_string(),
                balance_after,
            });
        }
    }

    events
}
