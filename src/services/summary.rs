//! Ledger summary: income, expenses, balance and recent activity

use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

use crate::error::SpendcastResult;
use crate::models::{DateWindow, LedgerSummary, Money, Transaction, TransactionKind};

use super::LedgerQuery;

/// Default number of recent transactions in a summary
pub const DEFAULT_RECENT: usize = 5;

/// Summarize every transaction dated on or before `as_of`.
///
/// Records with a non-positive amount are skipped with a warning. The
/// `recent` newest records are kept, ties broken by recording time.
pub fn summarize(transactions: &[Transaction], as_of: NaiveDate, recent: usize) -> LedgerSummary {
    let mut total_income = Money::zero();
    let mut total_expense = Money::zero();
    let mut included: Vec<&Transaction> = Vec::new();

    for txn in transactions.iter().filter(|t| t.date <= as_of) {
        if !txn.amount.is_positive() {
            warn!(transaction = %txn.id, amount = %txn.amount, "skipping transaction with non-positive amount");
            continue;
        }
        match txn.kind {
            TransactionKind::Income => total_income += txn.amount,
            TransactionKind::Expense => total_expense += txn.amount,
        }
        included.push(txn);
    }

    included.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
    let recent_transactions = included.into_iter().take(recent).cloned().collect();

    LedgerSummary {
        as_of,
        total_income,
        total_expense,
        balance: total_income - total_expense,
        recent_transactions,
    }
}

pub struct SummaryService<'a, Q: LedgerQuery + ?Sized> {
    ledger: &'a Q,
}

impl<'a, Q: LedgerQuery + ?Sized> SummaryService<'a, Q> {
    pub fn new(ledger: &'a Q) -> Self {
        Self { ledger }
    }

    /// Summary up to `as_of` (today when `None`) with `recent` latest transactions
    pub fn overview(&self, as_of: Option<NaiveDate>, recent: usize) -> SpendcastResult<LedgerSummary> {
        let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
        let transactions = self
            .ledger
            .list_transactions(None, Some(DateWindow::new(NaiveDate::MIN, as_of)))?;

        let summary = summarize(&transactions, as_of, recent);
        debug!(
            %as_of,
            transactions = transactions.len(),
            balance = %summary.balance,
            "computed ledger summary"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::MemoryLedger;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ledger() -> MemoryLedger {
        MemoryLedger {
            budgets: Vec::new(),
            transactions: vec![
                Transaction::income(Money::from_units(3000), "Salary", date(2024, 3, 1)),
                Transaction::expense(Money::from_units(50), "Food", date(2024, 3, 2)),
                Transaction::expense(Money::from_cents(1999), "Fun", date(2024, 3, 9)),
                Transaction::income(Money::from_units(200), "Refund", date(2024, 3, 5)),
                Transaction::expense(Money::from_units(900), "Rent", date(2024, 4, 1)),
            ],
        }
    }

    #[test]
    fn test_totals_and_balance() {
        let summary = SummaryService::new(&ledger())
            .overview(Some(date(2024, 3, 31)), DEFAULT_RECENT)
            .unwrap();

        assert_eq!(summary.total_income, Money::from_units(3200));
        assert_eq!(summary.total_expense, Money::from_cents(6999));
        assert_eq!(summary.balance, Money::from_cents(313_001));
    }

    #[test]
    fn test_future_dated_records_are_excluded() {
        let summary = SummaryService::new(&ledger())
            .overview(Some(date(2024, 3, 4)), DEFAULT_RECENT)
            .unwrap();

        assert_eq!(summary.total_income, Money::from_units(3000));
        assert_eq!(summary.total_expense, Money::from_units(50));
        assert_eq!(summary.recent_transactions.len(), 2);
    }

    #[test]
    fn test_recent_transactions_newest_first_and_limited() {
        let summary = SummaryService::new(&ledger())
            .overview(Some(date(2024, 4, 30)), 3)
            .unwrap();

        let categories: Vec<_> = summary
            .recent_transactions
            .iter()
            .map(|t| t.category.as_str())
            .collect();
        assert_eq!(categories, vec!["Rent", "Fun", "Refund"]);
    }

    #[test]
    fn test_overspending_gives_negative_balance() {
        let transactions = vec![
            Transaction::income(Money::from_units(100), "Salary", date(2024, 3, 1)),
            Transaction::expense(Money::from_units(150), "Rent", date(2024, 3, 2)),
            Transaction::expense(Money::from_cents(-500), "Food", date(2024, 3, 3)),
        ];
        let summary = summarize(&transactions, date(2024, 3, 31), DEFAULT_RECENT);

        assert_eq!(summary.balance, Money::from_units(-50));
        assert_eq!(summary.recent_transactions.len(), 2);
    }

    #[test]
    fn test_empty_ledger() {
        let summary = SummaryService::new(&MemoryLedger::default())
            .overview(Some(date(2024, 3, 31)), DEFAULT_RECENT)
            .unwrap();

        assert_eq!(summary.balance, Money::zero());
        assert!(summary.recent_transactions.is_empty());
    }
}
