//! Budget status calculation
//!
//! Combines a budget definition with its aggregated spend. No I/O happens
//! here; callers fetch the data and pass it in.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::error::{SpendcastError, SpendcastResult};
use crate::models::{
    BudgetId, BudgetPeriod, BudgetStatus, CategoryStatus, DateWindow, Money, TransactionKind,
};

use super::aggregate::{aggregate, SpendAggregation};
use super::cycle::{find_active_period, resolve_window};
use super::LedgerQuery;

/// Build the status report for `period` in `window`.
///
/// Overspend is reported through negative remainders and the `overspent`
/// flags, never as an error. Categories keep the allocation order.
pub fn compute_status(
    period: &BudgetPeriod,
    window: DateWindow,
    aggregation: &SpendAggregation,
) -> BudgetStatus {
    let per_category = period
        .category_allocations
        .iter()
        .map(|allocation| {
            let spent = aggregation.spent_in(&allocation.category);
            let remaining = allocation.amount - spent;
            CategoryStatus {
                category: allocation.category.clone(),
                allocated: allocation.amount,
                spent,
                remaining,
                overspent: remaining.is_negative(),
            }
        })
        .collect();

    let overall_remaining = period.overall_amount - aggregation.overall_spent;

    BudgetStatus {
        period_id: period.id,
        name: period.name.clone(),
        window,
        overall_amount: period.overall_amount,
        total_spent_overall: aggregation.overall_spent,
        overall_remaining,
        overspent: overall_remaining.is_negative(),
        per_category,
    }
}

/// Read-side budget queries over a [`LedgerQuery`]
pub struct StatusService<'a, Q: LedgerQuery + ?Sized> {
    ledger: &'a Q,
}

impl<'a, Q: LedgerQuery + ?Sized> StatusService<'a, Q> {
    pub fn new(ledger: &'a Q) -> Self {
        Self { ledger }
    }

    /// Status of budget `id` in the window resolved for `as_of` (today when `None`)
    pub fn budget_status(
        &self,
        id: BudgetId,
        as_of: Option<NaiveDate>,
    ) -> SpendcastResult<BudgetStatus> {
        let as_of = as_of.unwrap_or_else(today);
        let period = self
            .ledger
            .list_budget_periods()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| SpendcastError::budget_not_found(id.to_string()))?;

        self.status_for(&period, resolve_window(&period, as_of))
    }

    /// Status of the first budget active on `as_of`, `None` when there is none
    pub fn active_budget_status(
        &self,
        as_of: Option<NaiveDate>,
    ) -> SpendcastResult<Option<BudgetStatus>> {
        let as_of = as_of.unwrap_or_else(today);
        let periods = self.ledger.list_budget_periods()?;

        match find_active_period(&periods, as_of) {
            Some(period) => {
                debug!(budget = %period.id, %as_of, "found active budget");
                self.status_for(period, resolve_window(period, as_of))
                    .map(Some)
            }
            None => {
                debug!(%as_of, budgets = periods.len(), "no active budget");
                Ok(None)
            }
        }
    }

    /// Expense spend per category over the `window_days` days ending on `as_of`
    pub fn category_spending(
        &self,
        window_days: u32,
        as_of: Option<NaiveDate>,
    ) -> SpendcastResult<BTreeMap<String, Money>> {
        let window = DateWindow::trailing_days(as_of.unwrap_or_else(today), window_days);
        debug!(%window, days = window.len_days(), "category spending window");
        self.ledger.category_spending(window)
    }

    fn status_for(&self, period: &BudgetPeriod, window: DateWindow) -> SpendcastResult<BudgetStatus> {
        let expenses = self
            .ledger
            .list_transactions(Some(TransactionKind::Expense), Some(window))?;
        let aggregation = aggregate(period, &window, &expenses);
        debug!(
            budget = %period.id,
            %window,
            expenses = expenses.len(),
            spent = %aggregation.overall_spent,
            "computed budget status"
        );
        Ok(compute_status(period, window, &aggregation))
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
