//! What-if runs and baseline comparison

use crate::adjust::WhatIf;
use crate::compare::ScenarioComparison;
use crate::config::{FinancialInputs, InputsBuilder, SubscriptionBuilder};
use crate::model::{BillId, SubscriptionId};
use crate::simulation::{simulate, simulate_what_ifs};

fn baseline() -> FinancialInputs {
    InputsBuilder::new()
        .income(2_000.0)
        .starting_cash(200.0)
        .flex_spend(900.0)
        .months(3)
        .bill("Rent", 1_300.0, 1)
        .subscription(SubscriptionBuilder::new("Gym", 60.0, 5))
        .build()
}

#[test]
fn test_what_ifs_keep_order() {
    let inputs = baseline();
    let what_ifs = vec![
        WhatIf::new(),
        WhatIf::new().income_pct(25.0),
        WhatIf::new().flex_spend_pct(-100.0),
    ];

    let results = simulate_what_ifs(&inputs, &what_ifs);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0], simulate(&inputs));
    for (what_if, result) in what_ifs.iter().zip(&results) {
        assert_eq!(*result, simulate(&what_if.apply(&inputs)));
    }
}

#[test]
fn test_cheaper_rent_improves_on_baseline() {
    let inputs = baseline();
    let what_if = WhatIf::new()
        .bill_delta(BillId::new("bill-1"), -300.0)
        .subscription_delta(SubscriptionId::new("sub-1"), -60.0);

    let base = simulate(&inputs);
    let adjusted = simulate(&what_if.apply(&inputs));
    let cmp = ScenarioComparison::between(&adjusted, &base);

    assert!(cmp.min_balance_improved());
    assert!(cmp.negative_days_improved());
    assert!(cmp.end_balance_improved());
    // 3 months of 300 cheaper rent and 60 cheaper gym
    assert!((cmp.end_balance_delta - 1_080.0).abs() < 1e-6);
}

#[test]
fn test_empty_what_if_list() {
    assert!(simulate_what_ifs(&baseline(), &[]).is_empty());
}
