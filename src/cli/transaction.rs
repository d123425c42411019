//! Transaction CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{date_or_today, parse_amount, parse_optional_date};
use crate::config::settings::Settings;
use crate::display::{self, DisplayStyle};
use crate::error::{SpendcastError, SpendcastResult};
use crate::models::{DateWindow, TransactionKind};
use crate::services::{TransactionFilter, TransactionService};
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an expense (or income with --income)
    Add {
        /// Amount, always positive (e.g. "12.50")
        amount: String,
        /// Category name
        category: String,
        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        note: Option<String>,
        /// Record as income instead of an expense
        #[arg(long)]
        income: bool,
    },

    /// List transactions, newest first
    List {
        /// income or expense
        #[arg(short, long)]
        kind: Option<TransactionKind>,
        /// Earliest date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Latest date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID (full or short form)
        id: String,
    },
}

pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> SpendcastResult<()> {
    let service = TransactionService::new(storage);
    let style = DisplayStyle::from(settings);

    match cmd {
        TransactionCommands::Add {
            amount,
            category,
            date,
            note,
            income,
        } => {
            let kind = if income {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };
            let txn = service.add(
                kind,
                parse_amount(&amount)?,
                &category,
                date_or_today(date.as_deref())?,
                note.as_deref(),
            )?;
            println!(
                "Recorded {} {} in {} on {} ({})",
                txn.kind,
                style.money(txn.amount),
                txn.category,
                style.date(txn.date),
                txn.id
            );
        }

        TransactionCommands::List {
            kind,
            from,
            to,
            limit,
        } => {
            let range = match (
                parse_optional_date(from.as_deref())?,
                parse_optional_date(to.as_deref())?,
            ) {
                (None, None) => None,
                (from, to) => {
                    let window = DateWindow::new(
                        from.unwrap_or(NaiveDate::MIN),
                        to.unwrap_or(NaiveDate::MAX),
                    );
                    if window.start > window.end {
                        return Err(SpendcastError::Validation(
                            "--from must not be after --to".into(),
                        ));
                    }
                    Some(window)
                }
            };

            let transactions = service.list(&TransactionFilter {
                kind,
                range,
                limit: Some(limit),
            })?;
            print!(
                "{}",
                display::format_transaction_register(&transactions, style)
            );
        }

        TransactionCommands::Delete { id } => {
            let txn = service.delete(&id)?;
            println!("Deleted transaction {} ({})", txn.id, txn);
        }
    }

    Ok(())
}
