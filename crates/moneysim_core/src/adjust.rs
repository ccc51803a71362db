//! What-if adjustments
//!
//! A `WhatIf` is applied to a copy of `FinancialInputs` before re-running the
//! engine; the caller's inputs are never touched. Percent fields scale
//! (`+10.0` means 10% more), delta fields add an absolute amount.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::FinancialInputs;
use crate::model::{BillId, SubscriptionId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIf {
    /// Percent change to monthly income
    #[serde(default)]
    pub income_pct: f64,
    /// Absolute change to starting cash
    #[serde(default)]
    pub starting_cash_delta: f64,
    /// Percent change to monthly flexible spending
    #[serde(default)]
    pub flex_spend_pct: f64,
    /// Absolute change to individual bill amounts
    #[serde(default)]
    pub bill_deltas: FxHashMap<BillId, f64>,
    /// Absolute change to individual subscription amounts
    #[serde(default)]
    pub subscription_deltas: FxHashMap<SubscriptionId, f64>,
}

impl WhatIf {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn income_pct(mut self, pct: f64) -> Self {
        self.income_pct = pct;
        self
    }

    #[must_use]
    pub fn starting_cash_delta(mut self, delta: f64) -> Self {
        self.starting_cash_delta = delta;
        self
    }

    #[must_use]
    pub fn flex_spend_pct(mut self, pct: f64) -> Self {
        self.flex_spend_pct = pct;
        self
    }

    #[must_use]
    pub fn bill_delta(mut self, id: BillId, delta: f64) -> Self {
        self.bill_deltas.insert(id, delta);
        self
    }

    #[must_use]
    pub fn subscription_delta(mut self, id: SubscriptionId, delta: f64) -> Self {
        self.subscription_deltas.insert(id, delta);
        self
    }

    /// True when applying this adjustment changes nothing
    pub fn is_identity(&self) -> bool {
        self.income_pct == 0.0
            && self.starting_cash_delta == 0.0
            && self.flex_spend_pct == 0.0
            && self.bill_deltas.values().all(|d| *d == 0.0)
            && self.subscription_deltas.values().all(|d| *d == 0.0)
    }

    /// Adjusted copy of `inputs`. Deltas for ids not present are ignored.
    pub fn apply(&self, inputs: &FinancialInputs) -> FinancialInputs {
        let mut adjusted = inputs.clone();
        adjusted.monthly_income = inputs.monthly_income * (1.0 + self.income_pct / 100.0);
        adjusted.starting_cash = inputs.starting_cash + self.starting_cash_delta;
        adjusted.monthly_flex_spend =
            inputs.monthly_flex_spend * (1.0 + self.flex_spend_pct / 100.0);

        for bill in &mut adjusted.bills {
            if let Some(delta) = self.bill_deltas.get(&bill.id) {
                bill.amount += delta;
            }
        }
        for sub in &mut adjusted.subscriptions {
            if let Some(delta) = self.subscription_deltas.get(&sub.id) {
                sub.amount += delta;
            }
        }
        adjusted
    }
}
