//! Simulation inputs
//!
//! The main input type is `FinancialInputs`, which contains everything needed
//! to run a simulation. It is treated as immutable by the engine; what-if
//! variants are produced by copying it (see [`crate::adjust`]).
//!
//! # Builder DSL
//!
//! ```
//! use moneysim_core::config::{InputsBuilder, SubscriptionBuilder};
//!
//! let inputs = InputsBuilder::new()
//!     .income(4_200.0)
//!     .starting_cash(800.0)
//!     .flex_spend(900.0)
//!     .months(6)
//!     .bill("Rent", 1_650.0, 1)
//!     .bill("Phone", 45.0, 12)
//!     .subscription(SubscriptionBuilder::new("Gym", 40.0, 3).paused_in(2))
//!     .build();
//!
//! assert!(inputs.validate().is_ok());
//! ```

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::calendar::{MAX_CHARGE_DAY, MAX_MONTHS, MIN_MONTHS};
use crate::error::{InputError, ValidationErrors};

pub mod builder;

pub use crate::model::{BillId, SubscriptionId};
pub use builder::{InputsBuilder, SubscriptionBuilder};

/// A fixed recurring charge, debited on `due_day` of every month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: BillId,
    pub name: String,
    pub amount: f64,
    /// Day of month, 1..=28 after validation
    pub due_day: u32,
}

/// A recurring charge that may be cancelled or paused
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: SubscriptionId,
    pub name: String,
    pub amount: f64,
    /// Day of month, 1..=28 after validation
    pub charge_day: u32,
    /// Takes effect from month 1; month 0 is always charged
    #[serde(default)]
    pub cancelled: bool,
    /// 0-based month indices in which the charge is skipped
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub paused_months: BTreeSet<u32>,
}

impl Subscription {
    /// True if the subscription is paused in `month`
    pub fn is_paused_in(&self, month: u32) -> bool {
        self.paused_months.contains(&month)
    }
}

/// Complete simulation input
///
/// # Conceptual Organization
///
/// **Cash position**: `starting_cash`, credited `monthly_income`
///
/// **Fixed outflows**: `bills` (never suppressed) and `subscriptions`
/// (cancel/pause aware)
///
/// **Variable outflows**: `monthly_flex_spend`, amortized as a flat daily share
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialInputs {
    pub monthly_income: f64,
    pub starting_cash: f64,
    pub monthly_flex_spend: f64,
    /// Horizon in 30-day months
    #[serde(default = "default_months")]
    pub months: u32,
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

fn default_months() -> u32 {
    MIN_MONTHS
}

impl Default for FinancialInputs {
    fn default() -> Self {
        Self {
            monthly_income: 0.0,
            starting_cash: 0.0,
            monthly_flex_spend: 0.0,
            months: default_months(),
            bills: Vec::new(),
            subscriptions: Vec::new(),
        }
    }
}

impl FinancialInputs {
    /// Flat share of flexible spending debited every simulated day
    pub fn daily_flex_spend(&self) -> f64 {
        self.monthly_flex_spend / crate::calendar::DAYS_PER_MONTH as f64
    }

    pub fn bill(&self, id: &BillId) -> Option<&Bill> {
        self.bills.iter().find(|b| &b.id == id)
    }

    pub fn subscription(&self, id: &SubscriptionId) -> Option<&Subscription> {
        self.subscriptions.iter().find(|s| &s.id == id)
    }

    /// First `bill-N` id not in use, counting up from one past the bill count
    pub fn next_bill_id(&self) -> BillId {
        (self.bills.len() + 1..)
            .map(|n| BillId(format!("bill-{n}")))
            .find(|id| self.bill(id).is_none())
            .unwrap_or_else(|| BillId("bill-new".to_string()))
    }

    /// First `sub-N` id not in use, counting up from one past the subscription count
    pub fn next_subscription_id(&self) -> SubscriptionId {
        (self.subscriptions.len() + 1..)
            .map(|n| SubscriptionId(format!("sub-{n}")))
            .find(|id| self.subscription(id).is_none())
            .unwrap_or_else(|| SubscriptionId("sub-new".to_string()))
    }

    /// Check the ranges a caller is expected to enforce before simulating.
    ///
    /// The engine never calls this; out-of-range inputs still simulate. All
    /// violations are collected rather than stopping at the first.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        check_amount(&mut errors, "monthlyIncome", self.monthly_income);
        check_amount(&mut errors, "startingCash", self.starting_cash);
        check_amount(&mut errors, "monthlyFlexSpend", self.monthly_flex_spend);

        if !(MIN_MONTHS..=MAX_MONTHS).contains(&self.months) {
            errors.push(InputError::MonthsOutOfRange {
                months: self.months,
                min: MIN_MONTHS,
                max: MAX_MONTHS,
            });
        }

        let mut bill_ids = HashSet::new();
        for bill in &self.bills {
            if !bill_ids.insert(bill.id.as_str()) {
                errors.push(InputError::DuplicateId(bill.id.to_string()));
            }
            if bill.name.trim().is_empty() {
                errors.push(InputError::EmptyName {
                    id: bill.id.to_string(),
                });
            }
            check_amount(&mut errors, &format!("bill {:?}", bill.name), bill.amount);
            check_day(&mut errors, &format!("bill {:?}", bill.name), bill.due_day);
        }

        let mut subscription_ids = HashSet::new();
        for sub in &self.subscriptions {
            if !subscription_ids.insert(sub.id.as_str()) {
                errors.push(InputError::DuplicateId(sub.id.to_string()));
            }
            if sub.name.trim().is_empty() {
                errors.push(InputError::EmptyName {
                    id: sub.id.to_string(),
                });
            }
            let item = format!("subscription {:?}", sub.name);
            check_amount(&mut errors, &item, sub.amount);
            check_day(&mut errors, &item, sub.charge_day);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

fn check_amount(errors: &mut Vec<InputError>, field: &str, value: f64) {
    if !value.is_finite() || value < 0.0 {
        errors.push(InputError::InvalidAmount {
            field: field.to_string(),
            value,
        });
    }
}

fn check_day(errors: &mut Vec<InputError>, item: &str, day: u32) {
    if !(1..=MAX_CHARGE_DAY).contains(&day) {
        errors.push(InputError::DayOutOfRange {
            item: item.to_string(),
            day,
            max: MAX_CHARGE_DAY,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_inputs() -> FinancialInputs {
        InputsBuilder::new()
            .income(3_000.0)
            .starting_cash(1_000.0)
            .flex_spend(500.0)
            .months(2)
            .bill("Rent", 1_000.0, 1)
            .subscription(SubscriptionBuilder::new("Music", 10.0, 28))
            .build()
    }

    #[test]
    fn test_valid_inputs_pass() {
        assert!(valid_inputs().validate().is_ok());
    }

    #[test]
    fn test_collects_every_violation() {
        let mut inputs = valid_inputs();
        inputs.months = 7;
        inputs.monthly_income = -1.0;
        inputs.bills[0].due_day = 29;
        inputs.subscriptions[0].name = "  ".to_string();

        let errors = inputs.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.errors().contains(&InputError::MonthsOutOfRange {
            months: 7,
            min: 1,
            max: 6
        }));
        assert!(
            errors
                .errors()
                .iter()
                .any(|e| matches!(e, InputError::DayOutOfRange { day: 29, .. }))
        );
    }

    #[test]
    fn test_rejects_nan_and_duplicate_ids() {
        let mut inputs = valid_inputs();
        inputs.monthly_flex_spend = f64::NAN;
        let duplicate = inputs.bills[0].clone();
        inputs.bills.push(duplicate);

        let errors = inputs.validate().unwrap_err();
        let flex_rejected = errors.errors().iter().any(|e| {
            matches!(e, InputError::InvalidAmount { field, .. } if field == "monthlyFlexSpend")
        });
        assert!(flex_rejected);
        assert!(errors.errors().contains(&InputError::DuplicateId("bill-1".to_string())));
    }

    #[test]
    fn test_camel_case_round_trip() {
        let json = r#"{
            "monthlyIncome": 3000,
            "startingCash": 1000,
            "monthlyFlexSpend": 500,
            "months": 2,
            "bills": [{ "id": "1", "name": "Rent", "amount": 1000, "dueDay": 1 }],
            "subscriptions": [
                { "id": "1", "name": "Netflix", "amount": 15, "chargeDay": 5, "pausedMonths": [1] }
            ]
        }"#;

        let inputs: FinancialInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.bills[0].due_day, 1);
        assert!(!inputs.subscriptions[0].cancelled);
        assert!(inputs.subscriptions[0].is_paused_in(1));
        assert!(!inputs.subscriptions[0].is_paused_in(0));
    }
}
