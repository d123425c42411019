//! Subscription display formatting

use super::{truncate, DisplayStyle};
use crate::models::{Money, Subscription};

pub fn format_subscription_list(subscriptions: &[Subscription], style: DisplayStyle<'_>) -> String {
    if subscriptions.is_empty() {
        return "No subscriptions found.\n".to_string();
    }

    let mut output = format!(
        "{:12} {:20} {:>10}  {:10}  {}\n",
        "ID", "Name", "Amount", "Started", "Next billing"
    );
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for sub in subscriptions {
        output.push_str(&format!(
            "{:12} {:20} {:>10}  {:10}  {}\n",
            sub.id.to_string(),
            truncate(&sub.name, 20),
            style.money(sub.amount),
            style.date(sub.start_date),
            style.date(sub.next_billing_date)
        ));
    }

    let total: Money = subscriptions.iter().map(|s| s.amount).sum();
    output.push_str(&format!("\nTotal: {}\n", style.money(total)));
    output
}

/// Reminder for subscriptions billed today; empty when nothing is due
pub fn format_due_reminder(due: &[Subscription], style: DisplayStyle<'_>) -> String {
    due.iter()
        .map(|sub| {
            format!(
                "Reminder: {} ({}) is due today.\n",
                sub.name,
                style.money(sub.amount)
            )
        })
        .collect()
}
