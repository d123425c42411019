//! Month-end spend projection
//!
//! The series has one point per day of the month. `actual` is the running
//! total up to today; `forecast` starts at today (the anchor, equal to the
//! actual) and extends linearly to the end of the month.

use serde::{Deserialize, Serialize};

use super::money::Money;

/// One day of the cumulative spend series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Day of month, starting at 1
    pub day: u32,
    pub actual: Option<Money>,
    pub forecast: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub total_days_in_month: u32,
    pub days_so_far: u32,
    pub total_spent_so_far: Money,
    /// Rounded to the cent; projection uses the unrounded value
    pub average_daily_spend: Money,
    pub projected_month_total: Money,
    pub series: Vec<ForecastPoint>,
}

impl ForecastResult {
    /// Point for a day of the month (1-based)
    pub fn point(&self, day: u32) -> Option<&ForecastPoint> {
        day.checked_sub(1)
            .and_then(|index| self.series.get(index as usize))
    }

    pub fn days_remaining(&self) -> u32 {
        self.total_days_in_month.saturating_sub(self.days_so_far)
    }
}
