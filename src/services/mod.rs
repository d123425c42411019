//! Business logic layer for spendcast
//!
//! The cycle resolver, aggregator, status calculator and forecast projector
//! are pure functions. The services around them fetch data through
//! [`LedgerQuery`] and handle validation, persistence and audit logging.

pub mod aggregate;
pub mod budget;
pub mod cycle;
pub mod forecast;
pub mod status;
pub mod subscription;
pub mod summary;
pub mod transaction;

use std::collections::BTreeMap;

use crate::error::SpendcastResult;
use crate::models::{BudgetPeriod, DateWindow, Money, Transaction, TransactionKind};

pub use budget::BudgetService;
pub use forecast::ForecastService;
pub use status::StatusService;
pub use subscription::SubscriptionService;
pub use summary::SummaryService;
pub use transaction::{TransactionFilter, TransactionService};

/// Read-only view of stored budgets and transactions.
///
/// Every call returns an owned snapshot; computations never hold a live
/// reference into the store.
pub trait LedgerQuery {
    /// All budget periods in stored order
    fn list_budget_periods(&self) -> SpendcastResult<Vec<BudgetPeriod>>;

    /// Transactions of `kind` (all kinds when `None`) dated inside `range`
    fn list_transactions(
        &self,
        kind: Option<TransactionKind>,
        range: Option<DateWindow>,
    ) -> SpendcastResult<Vec<Transaction>>;

    /// Expense totals per category inside `window`
    fn category_spending(&self, window: DateWindow) -> SpendcastResult<BTreeMap<String, Money>> {
        let expenses = self.list_transactions(Some(TransactionKind::Expense), Some(window))?;
        let mut totals: BTreeMap<String, Money> = BTreeMap::new();
        for txn in expenses.into_iter().filter(|t| t.amount.is_positive()) {
            *totals.entry(txn.category).or_default() += txn.amount;
        }
        Ok(totals)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory ledger for service tests

    use super::*;

    #[derive(Default)]
    pub struct MemoryLedger {
        pub budgets: Vec<BudgetPeriod>,
        pub transactions: Vec<Transaction>,
    }

    impl LedgerQuery for MemoryLedger {
        fn list_budget_periods(&self) -> SpendcastResult<Vec<BudgetPeriod>> {
            Ok(self.budgets.clone())
        }

        fn list_transactions(
            &self,
            kind: Option<TransactionKind>,
            range: Option<DateWindow>,
        ) -> SpendcastResult<Vec<Transaction>> {
            Ok(self
                .transactions
                .iter()
                .filter(|t| kind.map_or(true, |k| t.kind == k))
                .filter(|t| range.map_or(true, |r| r.contains(t.date)))
                .cloned()
                .collect())
        }
    }
}
