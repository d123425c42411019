//! Ledger summary formatting

use super::{format_transaction_register, DisplayStyle};
use crate::models::LedgerSummary;

pub fn format_summary(summary: &LedgerSummary, style: DisplayStyle<'_>) -> String {
    let mut output = format!("Financial overview as of {}\n\n", style.date(summary.as_of));
    output.push_str(&format!("Total income:   {:>14}\n", style.money(summary.total_income)));
    output.push_str(&format!("Total expenses: {:>14}\n", style.money(summary.total_expense)));
    output.push_str(&format!("Balance:        {:>14}\n", style.money(summary.balance)));

    output.push_str("\nRecent transactions\n");
    output.push_str(&format_transaction_register(
        &summary.recent_transactions,
        style,
    ));
    output
}
