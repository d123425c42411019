//! Forecast CLI command

use clap::Args;

use super::parse_optional_date;
use crate::config::settings::Settings;
use crate::display::{self, DisplayStyle};
use crate::error::SpendcastResult;
use crate::services::ForecastService;
use crate::storage::Storage;

#[derive(Args)]
pub struct ForecastArgs {
    /// Project as if today were this date (YYYY-MM-DD)
    #[arg(long)]
    as_of: Option<String>,
    /// Include the day-by-day actual and forecast series
    #[arg(long)]
    series: bool,
    /// Print the forecast as JSON
    #[arg(long)]
    json: bool,
}

pub fn handle_forecast_command(
    storage: &Storage,
    settings: &Settings,
    args: ForecastArgs,
) -> SpendcastResult<()> {
    let as_of = parse_optional_date(args.as_of.as_deref())?;
    let result = ForecastService::new(storage).expense_forecast(as_of)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!(
            "{}",
            display::format_forecast(&result, DisplayStyle::from(settings), args.series)
        );
    }

    Ok(())
}
