//! CLI commands for bucketing, budgets and anomalies

use clap::Args;
use serde::Serialize;

use super::{print_json, resolve_period};
use crate::config::Settings;
use crate::display::{anomaly_table, bucket_table, budget_table};
use crate::error::{TallyError, TallyResult};
use crate::models::{AnomalySignal, Bucket, BucketMode, PeriodKey, Window};
use crate::services::{
    detect_between, detect_series, BucketService, BudgetAnalyzer, CategoryResolver,
};
use crate::source::Snapshot;

/// Arguments for `tally buckets`
#[derive(Args, Debug)]
pub struct BucketsArgs {
    /// Bucket granularity (day, weekday, month, year)
    #[arg(short, long, default_value = "month")]
    pub mode: BucketMode,

    /// Year to bucket
    #[arg(short, long)]
    pub year: i32,

    /// Restrict to one month of the year (1-12)
    #[arg(long)]
    pub month: Option<u32>,

    /// Collapse the window into a single total bucket
    #[arg(long)]
    pub total: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `tally budget`
#[derive(Args, Debug)]
pub struct BudgetArgs {
    /// Month to check (YYYY-MM); defaults to the latest month with data
    #[arg(short, long)]
    pub period: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `tally anomalies`
#[derive(Args, Debug)]
pub struct AnomaliesArgs {
    /// Month to compare with the month before (YYYY-MM)
    #[arg(short, long, conflicts_with = "year")]
    pub period: Option<String>,

    /// Scan every month of a year against its predecessor
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Growth threshold in percent (overrides settings)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Handle `tally buckets`
pub fn handle_buckets_command(
    snapshot: &Snapshot,
    settings: &Settings,
    args: BucketsArgs,
) -> TallyResult<()> {
    let window = Window::new(args.year, args.month)?;
    let resolver = CategoryResolver::new(&snapshot.categories);
    let service = BucketService::new(&resolver);

    let buckets: Vec<Bucket> = if args.total {
        vec![service.total(&snapshot.transactions, args.mode, &window)]
    } else {
        service.bucket(&snapshot.transactions, args.mode, &window)
    };

    if args.json {
        return print_json(&buckets);
    }

    println!("Buckets by {} for {}", args.mode, window);
    println!("{}", bucket_table(&buckets, &settings.currency_symbol));
    Ok(())
}

/// Handle `tally budget`
pub fn handle_budget_command(
    snapshot: &Snapshot,
    settings: &Settings,
    args: BudgetArgs,
) -> TallyResult<()> {
    let (year, month) = resolve_period(args.period.as_deref(), snapshot)?;
    let window = Window::month(year, month)?;

    let resolver = CategoryResolver::new(&snapshot.categories);
    let bucket =
        BucketService::new(&resolver).total(&snapshot.transactions, BucketMode::Month, &window);
    let budgets = BudgetAnalyzer::new(settings.budget).analyze_bucket(&bucket, &resolver);

    if args.json {
        return print_json(&budgets);
    }

    println!("Budget status for {}", window);
    if budgets.is_empty() {
        println!("No category budgets set.");
    } else {
        println!("{}", budget_table(&budgets, &settings.currency_symbol));
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnomalyOutput {
    threshold_percent: f64,
    signals: Vec<AnomalySignal>,
}

/// Handle `tally anomalies`
pub fn handle_anomalies_command(
    snapshot: &Snapshot,
    settings: &Settings,
    args: AnomaliesArgs,
) -> TallyResult<()> {
    let threshold = args.threshold.unwrap_or(settings.anomaly_threshold_percent);
    let resolver = CategoryResolver::new(&snapshot.categories);
    let service = BucketService::new(&resolver);

    let (scope, signals) = if let Some(year) = args.year {
        // December of the prior year seeds the January comparison
        let window = Window::months((year - 1, 12), (year, 12))?;
        let history = service.bucket(&snapshot.transactions, BucketMode::Month, &window);
        (Window::year(year)?, detect_series(&history, threshold))
    } else {
        let (year, month) = resolve_period(args.period.as_deref(), snapshot)?;
        let period = PeriodKey::month(year, month);
        let window = Window::period(period)?;
        let prior = period
            .prev()
            .ok_or_else(|| TallyError::Validation(format!("{} has no prior month", period)))?;
        let prior = Window::period(prior)?;
        let current = service.total(&snapshot.transactions, BucketMode::Month, &window);
        let previous = service.total(&snapshot.transactions, BucketMode::Month, &prior);
        (window, detect_between(&current, &previous, threshold))
    };

    if args.json {
        return print_json(&AnomalyOutput {
            threshold_percent: threshold,
            signals,
        });
    }

    println!("Spending increases above {}% in {}", threshold, scope);
    if signals.is_empty() {
        println!("No unusual spending increases.");
    } else {
        println!("{}", anomaly_table(&signals));
    }
    Ok(())
}
