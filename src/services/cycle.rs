//! Cycle resolution
//!
//! Works out which concrete window a budget period covers on a given date.
//! Recurring periods roll forward from their start date by whole cycles, so
//! a monthly budget created in January is still active in March.

use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use crate::models::{BudgetPeriod, CycleType, DateWindow};

/// Resolve the window of `period` that applies on `as_of`.
///
/// For recurring cycles this is the window containing `as_of`, or the first
/// window when `as_of` is before the start date. Custom cycles always
/// resolve to `[start_date, end_date]`.
pub fn resolve_window(period: &BudgetPeriod, as_of: NaiveDate) -> DateWindow {
    let first = DateWindow::new(period.start_date, period.end_date);
    if !period.cycle_type.is_recurring() || as_of <= period.end_date {
        return first;
    }

    let index = cycles_elapsed(period.cycle_type, period.start_date, as_of);
    match window_at(period.cycle_type, period.start_date, index) {
        Some(window) => window,
        None => {
            debug!(budget = %period.id, index, "cycle index out of date range, using first window");
            first
        }
    }
}

/// Resolve the window for `as_of` only if it actually contains `as_of`
pub fn active_window(period: &BudgetPeriod, as_of: NaiveDate) -> Option<DateWindow> {
    let window = resolve_window(period, as_of);
    window.contains(as_of).then_some(window)
}

/// First period, in the given order, whose resolved window contains `as_of`.
///
/// Overlapping periods are not merged or ranked; the earliest listed wins.
pub fn find_active_period(periods: &[BudgetPeriod], as_of: NaiveDate) -> Option<&BudgetPeriod> {
    periods
        .iter()
        .find(|period| active_window(period, as_of).is_some())
}

/// Number of whole cycles between `start` and the cycle containing `as_of`
fn cycles_elapsed(cycle: CycleType, start: NaiveDate, as_of: NaiveDate) -> u32 {
    if as_of < start {
        return 0;
    }
    match cycle {
        CycleType::Monthly => {
            let months = (as_of.year() - start.year()) * 12 + as_of.month() as i32
                - start.month() as i32;
            let mut index = months.max(0) as u32;
            // as_of's day may fall before the anchored start day of its month
            if index > 0 && cycle.nth_start(start, index).is_some_and(|s| s > as_of) {
                index -= 1;
            }
            index
        }
        CycleType::Weekly => ((as_of - start).num_days() / 7) as u32,
        CycleType::Custom => 0,
    }
}

fn window_at(cycle: CycleType, start: NaiveDate, index: u32) -> Option<DateWindow> {
    let window_start = cycle.nth_start(start, index)?;
    let next_start = cycle.nth_start(start, index.checked_add(1)?)?;
    Some(DateWindow::new(window_start, next_start - Duration::days(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetDraft, Money};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn period(cycle: CycleType, start: NaiveDate) -> BudgetPeriod {
        BudgetPeriod::from_draft(BudgetDraft::new(
            "Test",
            Money::from_units(500),
            cycle,
            start,
        ))
        .unwrap()
    }

    fn custom(start: NaiveDate, end: NaiveDate) -> BudgetPeriod {
        BudgetPeriod::from_draft(
            BudgetDraft::new("Trip", Money::from_units(500), CycleType::Custom, start)
                .with_end_date(end),
        )
        .unwrap()
    }

    #[test]
    fn test_monthly_rolls_forward_to_current_month() {
        let budget = period(CycleType::Monthly, date(2024, 1, 1));
        let window = resolve_window(&budget, date(2024, 3, 15));
        assert_eq!(window, DateWindow::new(date(2024, 3, 1), date(2024, 3, 31)));
    }

    #[test]
    fn test_monthly_mid_month_start() {
        let budget = period(CycleType::Monthly, date(2024, 1, 15));

        let window = resolve_window(&budget, date(2024, 3, 14));
        assert_eq!(window, DateWindow::new(date(2024, 2, 15), date(2024, 3, 14)));

        let window = resolve_window(&budget, date(2024, 3, 15));
        assert_eq!(window, DateWindow::new(date(2024, 3, 15), date(2024, 4, 14)));
    }

    #[test]
    fn test_monthly_end_of_month_start_does_not_drift() {
        let budget = period(CycleType::Monthly, date(2024, 1, 31));

        assert_eq!(
            resolve_window(&budget, date(2024, 2, 28)),
            DateWindow::new(date(2024, 1, 31), date(2024, 2, 28))
        );
        assert_eq!(
            resolve_window(&budget, date(2024, 3, 1)),
            DateWindow::new(date(2024, 2, 29), date(2024, 3, 30))
        );
        assert_eq!(
            resolve_window(&budget, date(2024, 5, 31)),
            DateWindow::new(date(2024, 5, 31), date(2024, 6, 29))
        );
    }

    #[test]
    fn test_monthly_windows_advance_by_whole_months_only() {
        let start = date(2023, 11, 20);
        let budget = period(CycleType::Monthly, start);
        let mut as_of = start;
        for _ in 0..500 {
            let window = resolve_window(&budget, as_of);
            assert!(window.contains(as_of), "{} not in {}", as_of, window);
            let months = (window.start.year() - start.year()) * 12 + window.start.month() as i32
                - start.month() as i32;
            assert_eq!(
                CycleType::Monthly.nth_start(start, months as u32),
                Some(window.start)
            );
            as_of += Duration::days(3);
        }
    }

    #[test]
    fn test_weekly_rolls_forward_in_seven_day_steps() {
        let start = date(2024, 3, 4);
        let budget = period(CycleType::Weekly, start);

        assert_eq!(
            resolve_window(&budget, start),
            DateWindow::new(start, date(2024, 3, 10))
        );
        assert_eq!(
            resolve_window(&budget, date(2024, 3, 11)),
            DateWindow::new(date(2024, 3, 11), date(2024, 3, 17))
        );

        for offset in 0..120 {
            let as_of = start + Duration::days(offset);
            let window = resolve_window(&budget, as_of);
            assert!(window.contains(as_of));
            assert_eq!((window.start - start).num_days() % 7, 0);
            assert_eq!(window.len_days(), 7);
        }
    }

    #[test]
    fn test_first_window_contains_start_date() {
        for cycle in [CycleType::Monthly, CycleType::Weekly] {
            let start = date(2024, 2, 29);
            let budget = period(cycle, start);
            assert!(resolve_window(&budget, start).contains(start));
        }
    }

    #[test]
    fn test_before_start_returns_first_window_not_active() {
        let budget = period(CycleType::Monthly, date(2024, 5, 1));
        let as_of = date(2024, 4, 30);
        assert_eq!(
            resolve_window(&budget, as_of),
            DateWindow::new(date(2024, 5, 1), date(2024, 5, 31))
        );
        assert_eq!(active_window(&budget, as_of), None);
    }

    #[test]
    fn test_custom_has_single_window() {
        let budget = custom(date(2024, 6, 10), date(2024, 6, 20));
        let window = DateWindow::new(date(2024, 6, 10), date(2024, 6, 20));
        assert_eq!(resolve_window(&budget, date(2024, 6, 15)), window);
        assert_eq!(resolve_window(&budget, date(2024, 9, 1)), window);
        assert_eq!(active_window(&budget, date(2024, 6, 21)), None);
        assert_eq!(active_window(&budget, date(2024, 6, 20)), Some(window));
    }

    #[test]
    fn test_find_active_period_first_listed_wins() {
        let expired = custom(date(2024, 1, 1), date(2024, 1, 31));
        let monthly = period(CycleType::Monthly, date(2024, 1, 1));
        let weekly = period(CycleType::Weekly, date(2024, 3, 11));
        let periods = vec![expired, monthly.clone(), weekly.clone()];

        let found = find_active_period(&periods, date(2024, 3, 15)).unwrap();
        assert_eq!(found.id, monthly.id);

        let reordered = vec![weekly.clone(), monthly];
        let found = find_active_period(&reordered, date(2024, 3, 15)).unwrap();
        assert_eq!(found.id, weekly.id);
    }

    #[test]
    fn test_find_active_period_none() {
        let periods = vec![custom(date(2024, 1, 1), date(2024, 1, 31))];
        assert!(find_active_period(&periods, date(2024, 2, 1)).is_none());
        assert!(find_active_period(&[], date(2024, 2, 1)).is_none());
    }
}
