//! Budget display formatting
//!
//! Tables for the budget list and the status report, plus the detail view
//! and the category spending preview.

use std::collections::BTreeMap;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::DisplayStyle;
use crate::models::{BudgetPeriod, BudgetStatus, Money};
use crate::services::budget::BudgetListing;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Cycle")]
    cycle: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Allocated")]
    allocated: String,
    #[tabled(rename = "Current window")]
    window: String,
    #[tabled(rename = "Active")]
    active: String,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Allocated")]
    allocated: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
}

/// Table of stored budgets with the window each resolves to today
pub fn format_budget_list(listings: &[BudgetListing], style: DisplayStyle<'_>) -> String {
    if listings.is_empty() {
        return "No budgets found.\n\nRun 'spendcast budget create' to add one.\n".to_string();
    }

    let rows = listings.iter().map(|listing| BudgetRow {
        id: listing.period.id.to_string(),
        name: super::truncate(&listing.period.name, 24),
        cycle: listing.period.cycle_type.to_string(),
        amount: style.money(listing.period.overall_amount),
        allocated: style.money(listing.period.allocated_total()),
        window: format!(
            "{} - {}",
            style.date(listing.window.start),
            style.date(listing.window.end)
        ),
        active: if listing.active { "yes" } else { "" }.to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Full definition of one budget period
pub fn format_budget_details(period: &BudgetPeriod, style: DisplayStyle<'_>) -> String {
    let mut output = String::new();

    output.push_str(&format!("Budget:  {}\n", period.name));
    output.push_str(&format!("ID:      {}\n", period.id));
    output.push_str(&format!("Cycle:   {}\n", period.cycle_type));
    output.push_str(&format!("Amount:  {}\n", style.money(period.overall_amount)));
    output.push_str(&format!("Start:   {}\n", style.date(period.start_date)));
    let end_label = if period.cycle_type.is_recurring() {
        "First window ends"
    } else {
        "End"
    };
    output.push_str(&format!("{}: {}\n", end_label, style.date(period.end_date)));

    if period.category_allocations.is_empty() {
        output.push_str("\nNo category allocations.\n");
        return output;
    }

    output.push_str("\nAllocations:\n");
    let width = period
        .category_allocations
        .iter()
        .map(|a| a.category.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);
    for allocation in &period.category_allocations {
        output.push_str(&format!(
            "  {:width$}  {:>12}\n",
            allocation.category,
            style.money(allocation.amount),
            width = width
        ));
    }
    output.push_str(&format!(
        "  {:width$}  {:>12}\n",
        "Unallocated",
        style.money(period.unallocated()),
        width = width
    ));

    output
}

/// Status report: overall totals and a per-category table
pub fn format_budget_status(status: &BudgetStatus, style: DisplayStyle<'_>) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} ({} - {})\n\n",
        status.name,
        style.date(status.window.start),
        style.date(status.window.end)
    ));
    output.push_str(&format!("Budget:     {}\n", style.money(status.overall_amount)));
    output.push_str(&format!(
        "Spent:      {}\n",
        style.money(status.total_spent_overall)
    ));
    output.push_str(&format!(
        "Remaining:  {}{}\n",
        style.money(status.overall_remaining),
        if status.overspent { "  OVERSPENT" } else { "" }
    ));

    if status.per_category.is_empty() {
        return output;
    }

    let rows = status.per_category.iter().map(|c| CategoryRow {
        category: if c.overspent {
            format!("{} !", c.category)
        } else {
            c.category.clone()
        },
        allocated: style.money(c.allocated),
        spent: style.money(c.spent),
        remaining: style.money(c.remaining),
        used: format!("{:.0}%", c.percent_used()),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    output.push('\n');
    output.push_str(&table.to_string());
    output.push('\n');

    let overspent: Vec<&str> = status
        .overspent_categories()
        .map(|c| c.category.as_str())
        .collect();
    if !overspent.is_empty() {
        output.push_str(&format!("\nOverspent: {}\n", overspent.join(", ")));
    }

    output
}

/// Trailing-window spend per category, largest first
pub fn format_category_spending(
    spending: &BTreeMap<String, Money>,
    window_days: u32,
    style: DisplayStyle<'_>,
) -> String {
    if spending.is_empty() {
        return format!("No expenses in the last {} days.\n", window_days);
    }

    let mut entries: Vec<_> = spending.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let width = entries
        .iter()
        .map(|(category, _)| category.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = format!("Spending over the last {} days:\n", window_days);
    for (category, amount) in entries {
        output.push_str(&format!(
            "  {:width$}  {:>12}\n",
            category,
            style.money(*amount),
            width = width
        ));
    }
    output
}
