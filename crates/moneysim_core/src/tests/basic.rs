//! Core day-loop mechanics

use super::approx;
use crate::calendar::MAX_MONTHS;
use crate::config::{FinancialInputs, InputsBuilder};
use crate::model::TransactionKind;
use crate::simulation::{simulate, simulate_with_metrics};

fn salary_only() -> FinancialInputs {
    InputsBuilder::new()
        .income(3_000.0)
        .starting_cash(1_000.0)
        .flex_spend(500.0)
        .months(1)
        .build()
}

#[test]
fn test_income_and_flex_only() {
    let result = simulate(&salary_only());

    assert_eq!(result.daily_balances.len(), 30);
    assert!(approx(result.daily_balances[0], 4_000.0 - 500.0 / 30.0));
    // flex spend drains evenly after the single income credit
    assert!(approx(result.end_balance, 3_500.0));
    assert_eq!(result.negative_days, 0);
    assert!(result.tight_months.is_empty());
}

#[test]
fn test_bill_on_first_day() {
    let inputs = InputsBuilder::new()
        .income(3_000.0)
        .starting_cash(1_000.0)
        .bill("Rent", 1_000.0, 1)
        .build();
    let result = simulate(&inputs);

    assert_eq!(result.daily_balances[0], 3_000.0);
    // nothing else happens for the rest of the month
    assert!(result.daily_balances.iter().all(|b| *b == 3_000.0));
}

#[test]
fn test_overdrawn_first_month() {
    let inputs = InputsBuilder::new()
        .income(1_000.0)
        .starting_cash(0.0)
        .flex_spend(500.0)
        .bill("Rent", 800.0, 1)
        .build();
    let result = simulate(&inputs);

    assert!(result.negative_days > 0);
    assert!(result.min_balance < 0.0);
    assert!(!result.tight_months.is_empty());
}

#[test]
fn test_income_arrives_each_month() {
    let inputs = InputsBuilder::new().income(2_000.0).months(3).build();
    let result = simulate(&inputs);

    let days: Vec<u32> = result
        .transactions_of(TransactionKind::Income)
        .map(|t| t.day)
        .collect();
    assert_eq!(days, vec![0, 30, 60]);
    assert_eq!(result.end_balance, 6_000.0);
}

#[test]
fn test_flex_spend_posted_every_day() {
    let inputs = InputsBuilder::new().months(2).build();
    let (result, metrics) = simulate_with_metrics(&inputs);

    // zero flex spend is still recorded
    assert_eq!(result.transactions_of(TransactionKind::FlexibleSpending).count(), 60);
    assert_eq!(metrics.days_simulated, 60);
    assert_eq!(metrics.transactions(TransactionKind::FlexibleSpending), 60);
    assert_eq!(metrics.total_transactions() as usize, result.transactions.len());
}

#[test]
fn test_ledger_balances_match_daily_closes() {
    let inputs = InputsBuilder::new()
        .income(2_500.0)
        .starting_cash(300.0)
        .flex_spend(900.0)
        .months(2)
        .bill("Rent", 1_400.0, 1)
        .bill("Power", 120.0, 14)
        .build();
    let result = simulate(&inputs);

    for (day, balance) in result.daily_balances.iter().enumerate() {
        let last = result
            .transactions_on(day as u32)
            .last()
            .map(|t| t.balance_after);
        assert_eq!(last, Some(*balance));
    }
}

#[test]
fn test_bills_fire_every_month() {
    let inputs = InputsBuilder::new()
        .months(4)
        .bill("Insurance", 75.0, 20)
        .build();
    let result = simulate(&inputs);

    let days: Vec<u32> = result.transactions_of(TransactionKind::Bill).map(|t| t.day).collect();
    assert_eq!(days, vec![19, 49, 79, 109]);
}

#[test]
fn test_out_of_range_inputs_do_not_panic() {
    let inputs = InputsBuilder::new()
        .income(-100.0)
        .months(0)
        .bill("Odd", 10.0, 31)
        .build();
    assert!(inputs.validate().is_err());

    let result = simulate(&inputs);
    assert!(result.daily_balances.is_empty());
    assert!(result.monthly_summaries.is_empty());
    assert_eq!(result.end_balance, 0.0);
    assert_eq!(result.min_balance, 0.0);
    assert!(!result.insights.is_empty());
}

#[test]
fn test_huge_horizon_is_cut_to_max_months() {
    let inputs = InputsBuilder::new()
        .income(1_000.0)
        .flex_spend(300.0)
        .months(200_000_000)
        .bill("Rent", 500.0, 1)
        .build();
    assert!(inputs.validate().is_err());

    let (result, metrics) = simulate_with_metrics(&inputs);
    assert_eq!(result.daily_balances.len(), 180);
    assert_eq!(result.monthly_summaries.len(), MAX_MONTHS as usize);
    assert_eq!(metrics.days_simulated, 180);
    assert!(approx(result.end_balance, 6.0 * 200.0));
}

#[test]
fn test_min_balance_day_is_first_occurrence() {
    // balance sits at its minimum from day 0 onward
    let inputs = InputsBuilder::new()
        .starting_cash(100.0)
        .bill("Rent", 150.0, 1)
        .build();
    let result = simulate(&inputs);

    assert_eq!(result.min_balance, -50.0);
    assert_eq!(result.min_balance_day, 0);
    assert_eq!(result.negative_days, 30);
}
