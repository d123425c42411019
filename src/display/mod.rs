//! Display formatting for terminal output
//!
//! Formatters return `String`s; the CLI decides where they go.

pub mod budget;
pub mod forecast;
pub mod subscription;
pub mod summary;
pub mod transaction;

pub use budget::{
    format_budget_details, format_budget_list, format_budget_status, format_category_spending,
};
pub use forecast::format_forecast;
pub use subscription::{format_due_reminder, format_subscription_list};
pub use summary::format_summary;
pub use transaction::format_transaction_register;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::models::Money;

/// User display preferences threaded through every formatter
#[derive(Debug, Clone, Copy)]
pub struct DisplayStyle<'a> {
    pub currency_symbol: &'a str,
    pub date_format: &'a str,
}

impl<'a> DisplayStyle<'a> {
    pub fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(self.currency_symbol)
    }

    pub fn date(&self, date: NaiveDate) -> String {
        date.format(self.date_format).to_string()
    }
}

impl<'a> From<&'a Settings> for DisplayStyle<'a> {
    fn from(settings: &'a Settings) -> Self {
        Self {
            currency_symbol: &settings.currency_symbol,
            date_format: &settings.date_format,
        }
    }
}

impl Default for DisplayStyle<'static> {
    fn default() -> Self {
        Self {
            currency_symbol: "$",
            date_format: "%Y-%m-%d",
        }
    }
}

/// Truncate to `max_len` characters, marking the cut with "..."
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
