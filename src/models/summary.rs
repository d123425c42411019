//! Ledger summary
//!
//! All-time income and expense totals with the most recent activity. Derived
//! on every read, never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;
use super::transaction::Transaction;

/// Totals and recent activity up to and including `as_of`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub as_of: NaiveDate,
    pub total_income: Money,
    pub total_expense: Money,
    /// Income minus expenses, negative when more went out than came in
    pub balance: Money,
    /// Newest first
    pub recent_transactions: Vec<Transaction>,
}
