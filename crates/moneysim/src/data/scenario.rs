//! Named scenarios and the book that holds them
//!
//! A scenario is a snapshot of `FinancialInputs` under an id. Results are
//! never stored; they are recomputed from the inputs on demand. One scenario
//! is current (the one being edited) and one may be the baseline that other
//! scenarios are compared against.

use jiff::Timestamp;
use moneysim_core::{Bill, BillId, FinancialInputs, Subscription, SubscriptionId};
use serde::{Deserialize, Serialize};

/// Id given to the scenario created by [`ScenarioBook::create_baseline`]
pub const BASELINE_ID: &str = "baseline";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub inputs: FinancialInputs,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioError {
    UnknownScenario(String),
    UnknownBill { scenario: String, bill: BillId },
    UnknownSubscription {
        scenario: String,
        subscription: SubscriptionId,
    },
    DuplicateBill(BillId),
    DuplicateSubscription(SubscriptionId),
    /// The book must keep at least one scenario
    LastScenario,
    /// The baseline cannot be deleted while it is the baseline
    BaselineProtected(String),
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioError::UnknownScenario(id) => write!(f, "No scenario with id {id:?}"),
            ScenarioError::UnknownBill { scenario, bill } => {
                write!(f, "Scenario {scenario:?} has no bill {bill}")
            }
            ScenarioError::UnknownSubscription {
                scenario,
                subscription,
            } => write!(f, "Scenario {scenario:?} has no subscription {subscription}"),
            ScenarioError::DuplicateBill(id) => write!(f, "Bill {id} already exists"),
            ScenarioError::DuplicateSubscription(id) => {
                write!(f, "Subscription {id} already exists")
            }
            ScenarioError::LastScenario => write!(f, "Cannot delete the last scenario"),
            ScenarioError::BaselineProtected(id) => {
                write!(f, "Cannot delete {id:?} while it is the baseline")
            }
        }
    }
}

impl std::error::Error for ScenarioError {}

/// All saved scenarios plus the current and baseline pointers.
///
/// Serializes to the same document shape the browser app exports
/// (`scenarios`, `currentScenarioId`, `baselineScenarioId`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioBook {
    pub scenarios: Vec<Scenario>,
    #[serde(rename = "currentScenarioId", default)]
    pub current_id: Option<String>,
    #[serde(rename = "baselineScenarioId", default)]
    pub baseline_id: Option<String>,
}

impl ScenarioBook {
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn current(&self) -> Option<&Scenario> {
        self.current_id.as_deref().and_then(|id| self.get(id))
    }

    pub fn baseline(&self) -> Option<&Scenario> {
        self.baseline_id.as_deref().and_then(|id| self.get(id))
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Scenario, ScenarioError> {
        self.scenarios
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ScenarioError::UnknownScenario(id.to_string()))
    }

    /// Id for a new scenario, derived from the clock and bumped past any clash
    fn fresh_id(&self) -> String {
        let mut millis = Timestamp::now().as_millisecond();
        loop {
            let id = format!("scenario-{millis}");
            if self.get(&id).is_none() {
                return id;
            }
            millis += 1;
        }
    }

    // =========================================================================
    // Scenario lifecycle
    // =========================================================================

    /// Replace the whole book with a single baseline scenario.
    pub fn create_baseline(&mut self, inputs: FinancialInputs) {
        *self = Self {
            scenarios: vec![Scenario {
                id: BASELINE_ID.to_string(),
                name: "Baseline".to_string(),
                inputs,
                created_at: Timestamp::now(),
            }],
            current_id: Some(BASELINE_ID.to_string()),
            baseline_id: Some(BASELINE_ID.to_string()),
        };
    }

    /// Add a scenario and make it current. Returns its id.
    pub fn add(&mut self, name: impl Into<String>, inputs: FinancialInputs) -> String {
        let id = self.fresh_id();
        self.scenarios.push(Scenario {
            id: id.clone(),
            name: name.into(),
            inputs,
            created_at: Timestamp::now(),
        });
        self.current_id = Some(id.clone());
        id
    }

    /// Copy a scenario's inputs under a new name; the copy becomes current.
    pub fn duplicate(
        &mut self,
        id: &str,
        name: impl Into<String>,
    ) -> Result<String, ScenarioError> {
        let inputs = self
            .get(id)
            .ok_or_else(|| ScenarioError::UnknownScenario(id.to_string()))?
            .inputs
            .clone();
        Ok(self.add(name, inputs))
    }

    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> Result<(), ScenarioError> {
        self.get_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn update(&mut self, id: &str, inputs: FinancialInputs) -> Result<(), ScenarioError> {
        self.get_mut(id)?.inputs = inputs;
        Ok(())
    }

    /// Remove a scenario. The last remaining scenario and the baseline are
    /// kept; deleting the current scenario moves current to the baseline.
    pub fn delete(&mut self, id: &str) -> Result<(), ScenarioError> {
        if self.get(id).is_none() {
            return Err(ScenarioError::UnknownScenario(id.to_string()));
        }
        if self.scenarios.len() <= 1 {
            return Err(ScenarioError::LastScenario);
        }
        if self.baseline_id.as_deref() == Some(id) {
            return Err(ScenarioError::BaselineProtected(id.to_string()));
        }

        self.scenarios.retain(|s| s.id != id);
        if self.current_id.as_deref() == Some(id) {
            self.current_id = self.baseline_id.clone();
        }
        Ok(())
    }

    pub fn set_current(&mut self, id: &str) -> Result<(), ScenarioError> {
        self.get_mut(id)?;
        self.current_id = Some(id.to_string());
        Ok(())
    }

    pub fn set_baseline(&mut self, id: &str) -> Result<(), ScenarioError> {
        self.get_mut(id)?;
        self.baseline_id = Some(id.to_string());
        Ok(())
    }

    // =========================================================================
    // Bills
    // =========================================================================

    pub fn add_bill(&mut self, scenario: &str, bill: Bill) -> Result<(), ScenarioError> {
        let inputs = &mut self.get_mut(scenario)?.inputs;
        if inputs.bill(&bill.id).is_some() {
            return Err(ScenarioError::DuplicateBill(bill.id));
        }
        inputs.bills.push(bill);
        Ok(())
    }

    /// Replace the bill with id `bill_id` in place
    pub fn update_bill(
        &mut self,
        scenario: &str,
        bill_id: &BillId,
        bill: Bill,
    ) -> Result<(), ScenarioError> {
        let slot = self
            .get_mut(scenario)?
            .inputs
            .bills
            .iter_mut()
            .find(|b| &b.id == bill_id)
            .ok_or_else(|| ScenarioError::UnknownBill {
                scenario: scenario.to_string(),
                bill: bill_id.clone(),
            })?;
        *slot = bill;
        Ok(())
    }

    pub fn remove_bill(&mut self, scenario: &str, bill_id: &BillId) -> Result<Bill, ScenarioError> {
        let bills = &mut self.get_mut(scenario)?.inputs.bills;
        let index = bills
            .iter()
            .position(|b| &b.id == bill_id)
            .ok_or_else(|| ScenarioError::UnknownBill {
                scenario: scenario.to_string(),
                bill: bill_id.clone(),
            })?;
        Ok(bills.remove(index))
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    pub fn add_subscription(
        &mut self,
        scenario: &str,
        subscription: Subscription,
    ) -> Result<(), ScenarioError> {
        let inputs = &mut self.get_mut(scenario)?.inputs;
        if inputs.subscription(&subscription.id).is_some() {
            return Err(ScenarioError::DuplicateSubscription(subscription.id));
        }
        inputs.subscriptions.push(subscription);
        Ok(())
    }

    pub fn update_subscription(
        &mut self,
        scenario: &str,
        subscription_id: &SubscriptionId,
        subscription: Subscription,
    ) -> Result<(), ScenarioError> {
        *self.subscription_mut(scenario, subscription_id)? = subscription;
        Ok(())
    }

    pub fn remove_subscription(
        &mut self,
        scenario: &str,
        subscription_id: &SubscriptionId,
    ) -> Result<Subscription, ScenarioError> {
        let subscriptions = &mut self.get_mut(scenario)?.inputs.subscriptions;
        let index = subscriptions
            .iter()
            .position(|s| &s.id == subscription_id)
            .ok_or_else(|| ScenarioError::UnknownSubscription {
                scenario: scenario.to_string(),
                subscription: subscription_id.clone(),
            })?;
        Ok(subscriptions.remove(index))
    }

    /// Mark cancelled; the charge stops from the second simulated month
    pub fn cancel_subscription(
        &mut self,
        scenario: &str,
        subscription_id: &SubscriptionId,
    ) -> Result<(), ScenarioError> {
        self.subscription_mut(scenario, subscription_id)?.cancelled = true;
        Ok(())
    }

    /// Skip the charge in 0-based `month`. Pausing twice is a no-op.
    pub fn pause_subscription(
        &mut self,
        scenario: &str,
        subscription_id: &SubscriptionId,
        month: u32,
    ) -> Result<(), ScenarioError> {
        self.subscription_mut(scenario, subscription_id)?
            .paused_months
            .insert(month);
        Ok(())
    }

    fn subscription_mut(
        &mut self,
        scenario: &str,
        subscription_id: &SubscriptionId,
    ) -> Result<&mut Subscription, ScenarioError> {
        self.get_mut(scenario)?
            .inputs
            .subscriptions
            .iter_mut()
            .find(|s| &s.id == subscription_id)
            .ok_or_else(|| ScenarioError::UnknownSubscription {
                scenario: scenario.to_string(),
                subscription: subscription_id.clone(),
            })
    }
}
