use crate::model::RiskScore;

/// Aggregate ratios the risk tiers are defined over
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskInputs {
    pub negative_days_ratio: f64,
    pub tight_months_ratio: f64,
    /// `starting_cash / monthly_income`; `INFINITY` when income is zero
    pub buffer_ratio: f64,
    pub min_balance: f64,
    pub monthly_income: f64,
}

impl RiskInputs {
    pub fn new(
        negative_days: u32,
        total_days: u32,
        tight_months: usize,
        months: u32,
        starting_cash: f64,
        monthly_income: f64,
        min_balance: f64,
    ) -> Self {
        Self {
            negative_days_ratio: ratio(negative_days as f64, total_days as f64),
            tight_months_ratio: ratio(tight_months as f64, months as f64),
            buffer_ratio: if monthly_income == 0.0 {
                f64::INFINITY
            } else {
                starting_cash / monthly_income
            },
            min_balance,
            monthly_income,
        }
    }
}

fn ratio(part: f64, whole: f64) -> f64 {
    if whole == 0.0 { 0.0 } else { part / whole }
}

/// Classify a run; high is checked before medium and the first match wins.
pub fn risk_score(r: &RiskInputs) -> RiskScore {
    if r.negative_days_ratio > 0.10
        || r.tight_months_ratio > 0.5
        || r.min_balance < -r.monthly_income * 0.5
    {
        RiskScore::High
    } else if r.negative_days_ratio > 0.05
        || r.tight_months_ratio > 0.3
        || r.min_balance < 0.0
        || r.buffer_ratio < 0.5
    {
        RiskScore::Medium
    } else {
        RiskScore::Low
    }
}
