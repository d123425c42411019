//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Handlers print to
//! stdout; logging goes to stderr.

pub mod audit;
pub mod budget;
pub mod forecast;
pub mod subscription;
pub mod summary;
pub mod transaction;

pub use audit::handle_audit_command;
pub use budget::{handle_budget_command, BudgetCommands};
pub use forecast::{handle_forecast_command, ForecastArgs};
pub use subscription::{handle_subscription_command, SubscriptionCommands};
pub use summary::{handle_summary_command, SummaryArgs};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{Local, NaiveDate};

use crate::error::{SpendcastError, SpendcastResult};
use crate::models::Money;

/// Parse a `YYYY-MM-DD` argument
pub(crate) fn parse_date(value: &str) -> SpendcastResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        SpendcastError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", value))
    })
}

/// Parse an optional date argument, defaulting to today
pub(crate) fn date_or_today(value: Option<&str>) -> SpendcastResult<NaiveDate> {
    match value {
        Some(value) => parse_date(value),
        None => Ok(Local::now().date_naive()),
    }
}

pub(crate) fn parse_optional_date(value: Option<&str>) -> SpendcastResult<Option<NaiveDate>> {
    value.map(parse_date).transpose()
}

pub(crate) fn parse_amount(value: &str) -> SpendcastResult<Money> {
    Money::parse(value).map_err(|e| SpendcastError::Validation(format!("{}: '{}'", e, value)))
}

/// Parse a `CATEGORY=AMOUNT` allocation argument
pub(crate) fn parse_allocation(value: &str) -> SpendcastResult<(String, Money)> {
    let (category, amount) = value.rsplit_once('=').ok_or_else(|| {
        SpendcastError::Validation(format!(
            "Invalid allocation '{}', expected CATEGORY=AMOUNT",
            value
        ))
    })?;
    Ok((category.trim().to_string(), parse_amount(amount)?))
}
