//! Cycle types and date windows
//!
//! A budget period recurs monthly or weekly, or covers one custom range.
//! A [`DateWindow`] is the concrete inclusive range a period resolves to.

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recurrence rule for a budget period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CycleType {
    /// Repeats every calendar month from the start date
    #[default]
    Monthly,
    /// Repeats every 7 days from the start date
    Weekly,
    /// One-off range with an explicit end date
    Custom,
}

impl CycleType {
    /// Whether the end date is derived from the start date
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Self::Custom)
    }

    /// Start of the `index`-th recurrence of a cycle beginning on `start`.
    ///
    /// Monthly offsets are taken from the original start so a start on the
    /// 31st lands on the last day of shorter months without drifting.
    /// Custom cycles have no recurrences beyond index 0.
    pub fn nth_start(&self, start: NaiveDate, index: u32) -> Option<NaiveDate> {
        match self {
            Self::Monthly => start.checked_add_months(Months::new(index)),
            Self::Weekly => start.checked_add_signed(Duration::weeks(i64::from(index))),
            Self::Custom => (index == 0).then_some(start),
        }
    }

    /// Inclusive end of the first window for a recurring cycle
    pub fn first_window_end(&self, start: NaiveDate) -> Option<NaiveDate> {
        if !self.is_recurring() {
            return None;
        }
        self.nth_start(start, 1).map(|next| next - Duration::days(1))
    }
}

impl fmt::Display for CycleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Weekly => write!(f, "weekly"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for CycleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" => Ok(Self::Monthly),
            "weekly" | "week" => Ok(Self::Weekly),
            "custom" => Ok(Self::Custom),
            other => Err(format!("Invalid cycle type: {}", other)),
        }
    }
}

/// An inclusive `[start, end]` date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The `days`-long window ending on (and including) `end`, clamped to
    /// the earliest representable date
    pub fn trailing_days(end: NaiveDate, days: u32) -> Self {
        let span = i64::from(days.max(1)) - 1;
        Self {
            start: end
                .checked_sub_signed(Duration::days(span))
                .unwrap_or(NaiveDate::MIN),
            end,
        }
    }

    /// Both ends are inclusive
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days covered
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}
