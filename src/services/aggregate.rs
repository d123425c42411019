//! Spend aggregation
//!
//! Totals expense transactions inside a budget window, overall and for each
//! category the budget allocates.

use std::collections::BTreeMap;

use tracing::warn;

use crate::models::{BudgetPeriod, DateWindow, Money, Transaction};

/// Expense totals for one budget window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpendAggregation {
    /// Every matching expense, allocated category or not
    pub overall_spent: Money,
    /// Only categories the period allocates
    pub by_category: BTreeMap<String, Money>,
}

impl SpendAggregation {
    /// Spent in `category`, zero when nothing was recorded
    pub fn spent_in(&self, category: &str) -> Money {
        self.by_category.get(category).copied().unwrap_or_default()
    }
}

/// Sum the expenses in `transactions` that fall inside `window`.
///
/// Income is ignored. Records with a non-positive amount are skipped with a
/// warning instead of failing the whole aggregation.
pub fn aggregate(
    period: &BudgetPeriod,
    window: &DateWindow,
    transactions: &[Transaction],
) -> SpendAggregation {
    let mut result = SpendAggregation::default();

    for txn in transactions {
        if !txn.is_expense() || !window.contains(txn.date) {
            continue;
        }
        if !txn.amount.is_positive() {
            warn!(transaction = %txn.id, amount = %txn.amount, "skipping expense with non-positive amount");
            continue;
        }

        result.overall_spent += txn.amount;
        if period.has_allocation(&txn.category) {
            *result
                .by_category
                .entry(txn.category.clone())
                .or_default() += txn.amount;
        }
    }

    result
}
