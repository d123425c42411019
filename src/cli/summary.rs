//! Summary CLI command

use clap::Args;

use super::parse_optional_date;
use crate::config::settings::Settings;
use crate::display::{self, DisplayStyle};
use crate::error::SpendcastResult;
use crate::services::summary::DEFAULT_RECENT;
use crate::services::SummaryService;
use crate::storage::Storage;

#[derive(Args)]
pub struct SummaryArgs {
    /// Summarize as if today were this date (YYYY-MM-DD)
    #[arg(long)]
    as_of: Option<String>,
    /// Number of recent transactions to show
    #[arg(short, long, default_value_t = DEFAULT_RECENT)]
    recent: usize,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    args: SummaryArgs,
) -> SpendcastResult<()> {
    let as_of = parse_optional_date(args.as_of.as_deref())?;
    let summary = SummaryService::new(storage).overview(as_of, args.recent)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!(
            "{}",
            display::format_summary(&summary, DisplayStyle::from(settings))
        );
    }

    Ok(())
}
