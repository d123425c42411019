//! Month-end spend forecast
//!
//! Projects the month's total spend from the days elapsed so far by linear
//! extrapolation of the average daily spend.

use chrono::{Datelike, Local, NaiveDate};
use tracing::{debug, warn};

use crate::error::SpendcastResult;
use crate::models::{
    DateWindow, ForecastPoint, ForecastResult, Money, Transaction, TransactionKind,
};

use super::LedgerQuery;

/// Build the cumulative actual and forecast series for `today`'s month.
///
/// `month_transactions` is expected to hold this month's expenses only;
/// income and records from other months are ignored rather than counted.
pub fn project(month_transactions: &[Transaction], today: NaiveDate) -> ForecastResult {
    let total_days = days_in_month(today.year(), today.month());
    let days_so_far = today.day();

    let mut by_day = vec![Money::zero(); total_days as usize + 1];
    for txn in month_transactions {
        if txn.kind != TransactionKind::Expense {
            continue;
        }
        if txn.date.year() != today.year() || txn.date.month() != today.month() {
            debug!(transaction = %txn.id, date = %txn.date, "ignoring expense outside forecast month");
            continue;
        }
        if !txn.amount.is_positive() {
            warn!(transaction = %txn.id, amount = %txn.amount, "skipping expense with non-positive amount");
            continue;
        }
        by_day[txn.date.day() as usize] += txn.amount;
    }

    let total_spent: Money = by_day[1..=days_so_far as usize].iter().sum();
    let average_cents = if days_so_far == 0 {
        0.0
    } else {
        total_spent.cents() as f64 / f64::from(days_so_far)
    };
    let project_to = |day: u32| {
        let ahead = f64::from(day - days_so_far);
        Money::from_fractional_cents(total_spent.cents() as f64 + average_cents * ahead)
    };

    let mut series = Vec::with_capacity(total_days as usize);
    let mut cumulative = Money::zero();
    for day in 1..=total_days {
        let actual = if day <= days_so_far {
            cumulative += by_day[day as usize];
            Some(cumulative)
        } else {
            None
        };
        let forecast = match day.cmp(&days_so_far) {
            std::cmp::Ordering::Less => None,
            std::cmp::Ordering::Equal => Some(cumulative),
            std::cmp::Ordering::Greater => Some(project_to(day)),
        };
        series.push(ForecastPoint {
            day,
            actual,
            forecast,
        });
    }

    ForecastResult {
        total_days_in_month: total_days,
        days_so_far,
        total_spent_so_far: total_spent,
        average_daily_spend: Money::from_fractional_cents(average_cents),
        projected_month_total: project_to(total_days),
        series,
    }
}

/// Number of days in the given month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// The calendar month containing `date`
pub fn month_window(date: NaiveDate) -> DateWindow {
    let start = date.with_day(1).unwrap_or(date);
    let end = date
        .with_day(days_in_month(date.year(), date.month()))
        .unwrap_or(date);
    DateWindow::new(start, end)
}

/// Service that feeds the projector from the transaction store
pub struct ForecastService<'a, Q: LedgerQuery + ?Sized> {
    ledger: &'a Q,
}

impl<'a, Q: LedgerQuery + ?Sized> ForecastService<'a, Q> {
    pub fn new(ledger: &'a Q) -> Self {
        Self { ledger }
    }

    /// Forecast for the month containing `as_of` (today when `None`)
    pub fn expense_forecast(&self, as_of: Option<NaiveDate>) -> SpendcastResult<ForecastResult> {
        let today = as_of.unwrap_or_else(|| Local::now().date_naive());
        let month = month_window(today);
        let expenses = self
            .ledger
            .list_transactions(Some(TransactionKind::Expense), Some(month))?;

        let result = project(&expenses, today);
        debug!(
            %today,
            expenses = expenses.len(),
            projected = %result.projected_month_total,
            "computed expense forecast"
        );
        Ok(result)
    }
}
