//! Forecast display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::DisplayStyle;
use crate::models::{ForecastResult, Money};

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "Day")]
    day: u32,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Forecast")]
    forecast: String,
}

/// Summary lines, optionally followed by the day-by-day series
pub fn format_forecast(result: &ForecastResult, style: DisplayStyle<'_>, with_series: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Day {} of {} ({} remaining)\n",
        result.days_so_far,
        result.total_days_in_month,
        result.days_remaining()
    ));
    output.push_str(&format!(
        "Spent so far:     {}\n",
        style.money(result.total_spent_so_far)
    ));
    output.push_str(&format!(
        "Daily average:    {}\n",
        style.money(result.average_daily_spend)
    ));
    output.push_str(&format!(
        "Projected total:  {}\n",
        style.money(result.projected_month_total)
    ));

    if with_series {
        let cell = |value: Option<Money>| value.map(|m| style.money(m)).unwrap_or_default();
        let rows = result.series.iter().map(|point| SeriesRow {
            day: point.day,
            actual: cell(point.actual),
            forecast: cell(point.forecast),
        });

        let mut table = Table::new(rows);
        table.with(Style::psql());
        output.push('\n');
        output.push_str(&table.to_string());
        output.push('\n');
    }

    output
}
