//! Budget CLI commands

use clap::Subcommand;

use super::{date_or_today, parse_allocation, parse_amount, parse_date, parse_optional_date};
use crate::config::settings::Settings;
use crate::display::{self, DisplayStyle};
use crate::error::SpendcastResult;
use crate::models::{BudgetDraft, CategoryAllocation, CycleType};
use crate::services::BudgetService;
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a budget period
    Create {
        /// Budget name
        name: String,
        /// Overall amount for each cycle (e.g. "500" or "500.00")
        #[arg(short, long)]
        amount: String,
        /// monthly, weekly or custom
        #[arg(short, long, default_value = "monthly")]
        cycle: CycleType,
        /// First day of the first cycle (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        start: Option<String>,
        /// Last day, custom cycles only (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,
        /// Category allocation, repeatable (e.g. --allocate Food=200)
        #[arg(long = "allocate", value_name = "CATEGORY=AMOUNT")]
        allocations: Vec<String>,
    },

    /// List budgets with the window each covers
    List {
        /// Resolve windows for this date instead of today
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Show a budget's definition
    Show {
        /// Budget name or ID
        budget: String,
    },

    /// Change a budget; unspecified fields keep their values
    Edit {
        /// Budget name or ID
        budget: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        cycle: Option<CycleType>,
        #[arg(short, long)]
        start: Option<String>,
        #[arg(short, long)]
        end: Option<String>,
        /// Set or replace one allocation, repeatable
        #[arg(long = "allocate", value_name = "CATEGORY=AMOUNT")]
        allocations: Vec<String>,
        /// Remove an allocation, repeatable
        #[arg(long = "remove", value_name = "CATEGORY")]
        removals: Vec<String>,
    },

    /// Delete a budget
    Delete {
        /// Budget name or ID
        budget: String,
    },

    /// Show spend against a budget for the cycle containing a date
    Status {
        /// Budget name or ID
        budget: String,
        #[arg(long)]
        as_of: Option<String>,
        /// Print the status as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show status for the budget active on a date
    Active {
        #[arg(long)]
        as_of: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// Recent spending per category, to help choose allocations
    Preview {
        /// Trailing days to include (defaults to the configured window)
        #[arg(short, long)]
        days: Option<u32>,
        #[arg(long)]
        as_of: Option<String>,
    },
}

pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> SpendcastResult<()> {
    let service = BudgetService::new(storage);
    let style = DisplayStyle::from(settings);

    match cmd {
        BudgetCommands::Create {
            name,
            amount,
            cycle,
            start,
            end,
            allocations,
        } => {
            let mut draft = BudgetDraft::new(
                name,
                parse_amount(&amount)?,
                cycle,
                date_or_today(start.as_deref())?,
            );
            draft.end_date = parse_optional_date(end.as_deref())?;
            for allocation in &allocations {
                let (category, amount) = parse_allocation(allocation)?;
                draft = draft.with_allocation(category, amount);
            }

            let period = service.create(draft)?;
            println!("Created budget: {}", period.name);
            println!("  ID: {}", period.id);
            println!(
                "  {} {} starting {}",
                period.cycle_type,
                style.money(period.overall_amount),
                style.date(period.start_date)
            );
        }

        BudgetCommands::List { as_of } => {
            let as_of = date_or_today(as_of.as_deref())?;
            let listings = service.listings(as_of)?;
            print!("{}", display::format_budget_list(&listings, style));
        }

        BudgetCommands::Show { budget } => {
            let period = service.find(&budget)?;
            print!("{}", display::format_budget_details(&period, style));
        }

        BudgetCommands::Edit {
            budget,
            name,
            amount,
            cycle,
            start,
            end,
            allocations,
            removals,
        } => {
            let period = service.find(&budget)?;
            let mut draft = period.to_draft();

            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(amount) = amount {
                draft.overall_amount = parse_amount(&amount)?;
            }
            if let Some(cycle) = cycle {
                draft.cycle_type = cycle;
                if cycle.is_recurring() {
                    draft.end_date = None;
                }
            }
            if let Some(start) = start {
                draft.start_date = parse_date(&start)?;
            }
            if let Some(end) = end {
                draft.end_date = Some(parse_date(&end)?);
            }
            draft
                .category_allocations
                .retain(|a| !removals.iter().any(|r| r.trim() == a.category));
            for allocation in &allocations {
                let (category, amount) = parse_allocation(allocation)?;
                match draft
                    .category_allocations
                    .iter_mut()
                    .find(|a| a.category == category)
                {
                    Some(existing) => existing.amount = amount,
                    None => draft
                        .category_allocations
                        .push(CategoryAllocation::new(category, amount)),
                }
            }

            let updated = service.update(period.id, draft)?;
            println!("Updated budget: {}", updated.name);
        }

        BudgetCommands::Delete { budget } => {
            let period = service.find(&budget)?;
            let deleted = service.delete(period.id)?;
            println!("Deleted budget: {}", deleted.name);
        }

        BudgetCommands::Status {
            budget,
            as_of,
            json,
        } => {
            let period = service.find(&budget)?;
            let status = service.budget_status(period.id, parse_optional_date(as_of.as_deref())?)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print!("{}", display::format_budget_status(&status, style));
            }
        }

        BudgetCommands::Active { as_of, json } => {
            let status = service.active_budget_status(parse_optional_date(as_of.as_deref())?)?;
            match (status, json) {
                (Some(status), true) => println!("{}", serde_json::to_string_pretty(&status)?),
                (Some(status), false) => {
                    print!("{}", display::format_budget_status(&status, style))
                }
                (None, true) => println!("null"),
                (None, false) => println!("No active budget."),
            }
        }

        BudgetCommands::Preview { days, as_of } => {
            let days = days.unwrap_or(settings.preview_window_days);
            let spending = service.category_spending(days, parse_optional_date(as_of.as_deref())?)?;
            print!("{}", display::format_category_spending(&spending, days, style));
        }
    }

    Ok(())
}
