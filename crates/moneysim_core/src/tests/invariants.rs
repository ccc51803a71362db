//! Properties that hold for every valid input, checked over seeded random
//! scenarios.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::approx;
use crate::apply::{ChargeStatus, charge_status};
use crate::calendar::{MAX_CHARGE_DAY, MAX_MONTHS, MIN_MONTHS};
use crate::config::{FinancialInputs, InputsBuilder, SubscriptionBuilder};
use crate::simulation::simulate;

const SCENARIOS: u64 = 200;

fn random_inputs(rng: &mut SmallRng) -> FinancialInputs {
    let months = rng.random_range(MIN_MONTHS..=MAX_MONTHS);
    let mut builder = InputsBuilder::new()
        .income(rng.random_range(0.0..6_000.0))
        .starting_cash(rng.random_range(0.0..3_000.0))
        .flex_spend(rng.random_range(0.0..2_500.0))
        .months(months);

    for i in 0..rng.random_range(0..5) {
        builder = builder.bill(
            format!("Bill {i}"),
            rng.random_range(0.0..1_500.0),
            rng.random_range(1..=MAX_CHARGE_DAY),
        );
    }
    for i in 0..rng.random_range(0..5) {
        let mut sub = SubscriptionBuilder::new(
            format!("Sub {i}"),
            rng.random_range(0.0..200.0),
            rng.random_range(1..=MAX_CHARGE_DAY),
        );
        if rng.random_bool(0.3) {
            sub = sub.cancelled();
        }
        if rng.random_bool(0.3) {
            sub = sub.paused_in(rng.random_range(0..months));
        }
        builder = builder.subscription(sub);
    }
    builder.build()
}

fn for_each_scenario(check: impl Fn(&FinancialInputs)) {
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..SCENARIOS {
        let inputs = random_inputs(&mut rng);
        assert!(inputs.validate().is_ok());
        check(&inputs);
    }
}

#[test]
fn test_horizon_length() {
    for_each_scenario(|inputs| {
        let result = simulate(inputs);
        assert_eq!(result.daily_balances.len(), inputs.months as usize * 30);
        assert_eq!(result.monthly_summaries.len(), inputs.months as usize);
    });
}

#[test]
fn test_first_day_balance() {
    for_each_scenario(|inputs| {
        let result = simulate(inputs);

        let mut expected = inputs.starting_cash + inputs.monthly_income;
        for bill in inputs.bills.iter().filter(|b| b.due_day == 1) {
            expected -= bill.amount;
        }
        for sub in inputs.subscriptions.iter().filter(|s| s.charge_day == 1) {
            if charge_status(sub, 0) == ChargeStatus::Charged {
                expected -= sub.amount;
            }
        }
        expected -= inputs.monthly_flex_spend / 30.0;

        assert!(approx(result.daily_balances[0], expected));
    });
}

#[test]
fn test_months_chain() {
    for_each_scenario(|inputs| {
        let result = simulate(inputs);
        for (m, summary) in result.monthly_summaries.iter().enumerate() {
            let expected = if m == 0 {
                inputs.starting_cash
            } else {
                result.monthly_summaries[m - 1].ending_balance
            };
            assert_eq!(summary.starting_balance, expected);
            assert_eq!(summary.ending_balance, result.daily_balances[m * 30 + 29]);
        }
    });
}

#[test]
fn test_idempotent() {
    for_each_scenario(|inputs| {
        assert_eq!(simulate(inputs), simulate(inputs));
    });
}

#[test]
fn test_negative_days_and_minimum() {
    for_each_scenario(|inputs| {
        let result = simulate(inputs);
        let balances = &result.daily_balances;

        let negative = balances.iter().filter(|b| **b < 0.0).count();
        assert_eq!(result.negative_days as usize, negative);

        let min = balances.iter().copied().fold(f64::INFINITY, f64::min);
        assert_eq!(result.min_balance, min);

        let first = balances.iter().position(|b| *b == min);
        assert_eq!(Some(result.min_balance_day as usize), first);

        let tight = result.monthly_summaries.iter().filter(|m| m.negative_days > 0).count();
        assert_eq!(result.tight_months.len(), tight);
    });
}

#[test]
fn test_category_shares_sum_to_hundred() {
    for_each_scenario(|inputs| {
        let breakdown = simulate(inputs).category_breakdown;
        let p = &breakdown.percentages;
        let sum = p.bills + p.subscriptions + p.flexible_spending;
        if breakdown.total > 0.0 {
            assert!((sum - 100.0).abs() < 1e-6);
        } else {
            assert_eq!(sum, 0.0);
        }
    });
}

#[test]
fn test_insights_never_empty() {
    for_each_scenario(|inputs| {
        assert!(!simulate(inputs).insights.is_empty());
    });
}
