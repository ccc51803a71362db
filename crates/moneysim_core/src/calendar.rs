//! Simplified day model used by the engine.
//!
//! Every simulated month has exactly 30 days regardless of the real calendar.
//! Days are addressed by a 0-based index across the whole horizon; the
//! day-of-month cycles through 1..=30.

use std::ops::Range;

/// Days in every simulated month.
pub const DAYS_PER_MONTH: u32 = 30;

/// Shortest horizon accepted by input validation.
pub const MIN_MONTHS: u32 = 1;

/// Longest horizon accepted by input validation.
pub const MAX_MONTHS: u32 = 6;

/// Latest due/charge day accepted by input validation. The engine itself will
/// still process days 29 and 30 if given them.
pub const MAX_CHARGE_DAY: u32 = 28;

/// Total number of simulated days for a horizon.
#[inline]
pub fn total_days(months: u32) -> u32 {
    months.saturating_mul(DAYS_PER_MONTH)
}

/// Months the engine actually simulates. Horizons past `MAX_MONTHS` are cut
/// short so unvalidated input cannot blow up the per-month state.
#[inline]
pub fn horizon_months(months: u32) -> u32 {
    months.min(MAX_MONTHS)
}

/// Day of the month (1..=30) for a 0-based day index.
#[inline]
pub fn day_of_month(day: u32) -> u32 {
    day % DAYS_PER_MONTH + 1
}

/// 0-based month index for a 0-based day index.
#[inline]
pub fn month_index(day: u32) -> u32 {
    day / DAYS_PER_MONTH
}

/// True on the first day of each simulated month, when income is credited.
#[inline]
pub fn is_month_start(day: u32) -> bool {
    day % DAYS_PER_MONTH == 0
}

/// Day indices covered by `month`, clamped to the simulated horizon.
pub fn month_range(month: u32, total_days: u32) -> Range<usize> {
    let start = (month * DAYS_PER_MONTH).min(total_days);
    let end = ((month + 1) * DAYS_PER_MONTH).min(total_days);
    start as usize..end as usize
}
