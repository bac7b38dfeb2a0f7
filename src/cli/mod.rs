//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod analysis;
pub mod config;
pub mod forecast;

use std::path::Path;

use serde::Serialize;

use crate::error::{TallyError, TallyResult};
use crate::models::parse_year_month;
use crate::reports::latest_month;
use crate::source::Snapshot;

pub use analysis::{
    handle_anomalies_command, handle_budget_command, handle_buckets_command, AnomaliesArgs,
    BucketsArgs, BudgetArgs,
};
pub use config::{handle_config_command, ConfigCommands};
pub use forecast::{handle_forecast_command, handle_overview_command, ForecastArgs, OverviewArgs};

/// Load the snapshot named by `--input`
pub fn load_snapshot(input: Option<&Path>) -> TallyResult<Snapshot> {
    let path = input.ok_or_else(|| {
        TallyError::Validation(
            "No input snapshot given. Use --input <file> or set TALLY_INPUT".into(),
        )
    })?;
    Snapshot::load(path)
}

/// Parse an optional "YYYY-MM" argument, defaulting to the snapshot's latest month
pub(crate) fn resolve_period(period: Option<&str>, snapshot: &Snapshot) -> TallyResult<(i32, u32)> {
    match period {
        Some(p) => parse_year_month(p),
        None => Ok(latest_month(snapshot)),
    }
}

/// Print a value as pretty JSON on stdout
pub(crate) fn print_json<T: Serialize>(value: &T) -> TallyResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
