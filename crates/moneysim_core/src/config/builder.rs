//! Inputs Builder
//!
//! Fluent construction of `FinancialInputs` with automatic id assignment.
//! Bills get ids `bill-1`, `bill-2`, ... and subscriptions `sub-1`, `sub-2`,
//! ... in insertion order, skipping any id already taken.

use std::collections::BTreeSet;

use super::{Bill, FinancialInputs, Subscription};
use crate::model::SubscriptionId;

/// Builder for `FinancialInputs`
pub struct InputsBuilder {
    inputs: FinancialInputs,
}

impl Default for InputsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InputsBuilder {
    /// Create a new builder with a one-month horizon and no charges
    #[must_use]
    pub fn new() -> Self {
        Self {
            inputs: FinancialInputs::default(),
        }
    }

    /// Start from existing inputs; new ids never collide with theirs
    #[must_use]
    pub fn from_inputs(inputs: FinancialInputs) -> Self {
        Self { inputs }
    }

    // =========================================================================
    // Cash position
    // =========================================================================

    #[must_use]
    pub fn income(mut self, monthly_income: f64) -> Self {
        self.inputs.monthly_income = monthly_income;
        self
    }

    #[must_use]
    pub fn starting_cash(mut self, starting_cash: f64) -> Self {
        self.inputs.starting_cash = starting_cash;
        self
    }

    #[must_use]
    pub fn flex_spend(mut self, monthly_flex_spend: f64) -> Self {
        self.inputs.monthly_flex_spend = monthly_flex_spend;
        self
    }

    #[must_use]
    pub fn months(mut self, months: u32) -> Self {
        self.inputs.months = months;
        self
    }

    // =========================================================================
    // Recurring charges
    // =========================================================================

    /// Add a bill due on `due_day` of every month
    #[must_use]
    pub fn bill(mut self, name: impl Into<String>, amount: f64, due_day: u32) -> Self {
        let id = self.inputs.next_bill_id();
        self.inputs.bills.push(Bill {
            id,
            name: name.into(),
            amount,
            due_day,
        });
        self
    }

    /// Add a subscription
    #[must_use]
    pub fn subscription(mut self, builder: SubscriptionBuilder) -> Self {
        let id = self.inputs.next_subscription_id();
        self.inputs.subscriptions.push(builder.into_subscription(id));
        self
    }

    pub fn build(self) -> FinancialInputs {
        self.inputs
    }
}

/// Builder for a single `Subscription`
#[derive(Debug, Clone)]
pub struct SubscriptionBuilder {
    name: String,
    amount: f64,
    charge_day: u32,
    cancelled: bool,
    paused_months: BTreeSet<u32>,
}

impl SubscriptionBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>, amount: f64, charge_day: u32) -> Self {
        Self {
            name: name.into(),
            amount,
            charge_day,
            cancelled: false,
            paused_months: BTreeSet::new(),
        }
    }

    /// Mark cancelled; still charged in month 0
    #[must_use]
    pub fn cancelled(mut self) -> Self {
        self.cancelled = true;
        self
    }

    /// Skip the charge in the given 0-based month
    #[must_use]
    pub fn paused_in(mut self, month: u32) -> Self {
        self.paused_months.insert(month);
        self
    }

    fn into_subscription(self, id: SubscriptionId) -> Subscription {
        Subscription {
            id,
            name: self.name,
            amount: self.amount,
            charge_day: self.charge_day,
            cancelled: self.cancelled,
            paused_months: self.paused_months,
        }
    }
}
