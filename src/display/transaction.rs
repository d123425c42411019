//! Transaction display formatting

use super::{truncate, DisplayStyle};
use crate::models::{Transaction, TransactionKind};

fn format_transaction_row(txn: &Transaction, style: DisplayStyle<'_>) -> String {
    let signed = match txn.kind {
        TransactionKind::Expense => -txn.amount,
        TransactionKind::Income => txn.amount,
    };

    let mut row = format!(
        "{:12} {:10} {:16} {:>12}",
        txn.id.to_string(),
        style.date(txn.date),
        truncate(&txn.category, 16),
        style.money(signed)
    );
    if !txn.note.is_empty() {
        row.push_str("  ");
        row.push_str(&truncate(&txn.note, 30));
    }
    row
}

/// Register view, one line per transaction; expenses shown negative
pub fn format_transaction_register(transactions: &[Transaction], style: DisplayStyle<'_>) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = format!(
        "{:12} {:10} {:16} {:>12}  {}\n",
        "ID", "Date", "Category", "Amount", "Note"
    );
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, style));
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    #[test]
    fn test_register_signs_by_kind() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let transactions = vec![
            Transaction::expense(Money::from_cents(1250), "Food", date).with_note("lunch"),
            Transaction::income(Money::from_units(900), "Salary", date),
        ];

        let output = format_transaction_register(&transactions, DisplayStyle::default());
        assert!(output.contains("-$12.50  lunch"));
        assert!(output.contains("$900.00"));
        assert!(!output.contains("-$900.00"));
    }

    #[test]
    fn test_empty_register() {
        assert_eq!(
            format_transaction_register(&[], DisplayStyle::default()),
            "No transactions found.\n"
        );
    }
}
