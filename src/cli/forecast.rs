//! CLI commands for forecasts and the month overview

use clap::Args;

use super::{print_json, resolve_period};
use crate::config::Settings;
use crate::error::TallyResult;
use crate::models::{parse_year_month, Algorithm, SeriesField};
use crate::reports::{FinanceOverview, ForecastReport, ForecastRequest};
use crate::source::Snapshot;

/// Arguments for `tally forecast`
#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// Number of months to predict
    #[arg(short = 'n', long)]
    pub horizon: Option<usize>,

    /// Algorithm (average, linear, seasonal)
    #[arg(short, long)]
    pub algorithm: Option<Algorithm>,

    /// Months of history to learn from
    #[arg(long)]
    pub history_months: Option<u32>,

    /// Last month of history (YYYY-MM); defaults to the latest month with data
    #[arg(short, long)]
    pub until: Option<String>,

    /// Total carried by the chart series (expense, revenue, balance)
    #[arg(short, long, default_value = "expense")]
    pub field: SeriesField,

    /// Print JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `tally overview`
#[derive(Args, Debug)]
pub struct OverviewArgs {
    /// Month to summarize (YYYY-MM); defaults to the latest month with data
    #[arg(short, long)]
    pub period: Option<String>,

    /// Print JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

/// Handle `tally forecast`
pub fn handle_forecast_command(
    snapshot: &Snapshot,
    settings: &Settings,
    args: ForecastArgs,
) -> TallyResult<()> {
    let mut request = ForecastRequest::from_settings(settings, snapshot);
    if let Some(until) = args.until.as_deref() {
        request.until = parse_year_month(until)?;
    }
    if let Some(horizon) = args.horizon {
        request.horizon = horizon;
    }
    if let Some(algorithm) = args.algorithm {
        request.algorithm = algorithm;
    }
    if let Some(history_months) = args.history_months {
        request.history_months = history_months;
    }
    request.field = args.field;

    let report = ForecastReport::generate(snapshot, settings, &request)?;

    if args.json {
        return print_json(&report);
    }

    println!("{}", report.format_terminal());
    Ok(())
}

/// Handle `tally overview`
pub fn handle_overview_command(
    snapshot: &Snapshot,
    settings: &Settings,
    args: OverviewArgs,
) -> TallyResult<()> {
    let (year, month) = resolve_period(args.period.as_deref(), snapshot)?;
    let overview = FinanceOverview::generate(snapshot, settings, year, month)?;

    if args.json {
        return print_json(&overview);
    }

    println!("{}", overview.format_terminal());
    Ok(())
}
