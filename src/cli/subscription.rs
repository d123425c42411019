//! Subscription CLI commands

use clap::Subcommand;

use super::{date_or_today, parse_amount, parse_date};
use crate::config::settings::Settings;
use crate::display::{self, DisplayStyle};
use crate::error::SpendcastResult;
use crate::services::SubscriptionService;
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum SubscriptionCommands {
    /// Track a recurring charge
    Add {
        name: String,
        amount: String,
        /// Next billing date (YYYY-MM-DD)
        #[arg(short, long)]
        next: String,
        /// When the subscription started (defaults to today)
        #[arg(short, long)]
        start: Option<String>,
    },

    /// List subscriptions, soonest billing first
    List,

    /// Stop tracking a subscription
    Delete {
        /// Subscription name or ID
        subscription: String,
    },

    /// Show subscriptions billed on a date
    Due {
        /// Date to check (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
}

pub fn handle_subscription_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SubscriptionCommands,
) -> SpendcastResult<()> {
    let service = SubscriptionService::new(storage);
    let style = DisplayStyle::from(settings);

    match cmd {
        SubscriptionCommands::Add {
            name,
            amount,
            next,
            start,
        } => {
            let next = parse_date(&next)?;
            let start = match start {
                Some(start) => parse_date(&start)?,
                None => date_or_today(None)?.min(next),
            };
            let sub = service.add(&name, parse_amount(&amount)?, start, next)?;
            println!(
                "Added subscription: {} ({}), next billing {}",
                sub.name,
                style.money(sub.amount),
                style.date(sub.next_billing_date)
            );
        }

        SubscriptionCommands::List => {
            let subscriptions = service.list()?;
            print!("{}", display::format_subscription_list(&subscriptions, style));
        }

        SubscriptionCommands::Delete { subscription } => {
            let deleted = service.delete(&subscription)?;
            println!("Deleted subscription: {}", deleted.name);
        }

        SubscriptionCommands::Due { date } => {
            let date = date_or_today(date.as_deref())?;
            let due = service.due_on(date)?;
            if due.is_empty() {
                println!("Nothing due on {}.", style.date(date));
            } else {
                print!("{}", display::format_due_reminder(&due, style));
            }
        }
    }

    Ok(())
}
