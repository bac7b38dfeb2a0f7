use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tally::cli::{
    handle_anomalies_command, handle_budget_command, handle_buckets_command, handle_config_command,
    handle_forecast_command, handle_overview_command, load_snapshot,
};
use tally::config::{Settings, TallyPaths};

#[derive(Parser)]
#[command(
    name = "tally",
    author = "Kaylee Beyene",
    version,
    about = "Aggregate expenses and revenues, check budgets and forecast spending",
    long_about = "Tally reads a snapshot of expenses, revenues and categories, \
                  groups them by day, weekday, month or year, flags categories \
                  that are over budget or growing unusually fast, and forecasts \
                  the months ahead."
)]
struct Cli {
    /// Snapshot file (.json, .yaml or .yml)
    #[arg(short, long, global = true, env = "TALLY_INPUT")]
    input: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Group transactions into period buckets
    Buckets(tally::cli::BucketsArgs),

    /// Show budget status per category for a month
    Budget(tally::cli::BudgetArgs),

    /// Flag categories whose spending grew unusually fast
    Anomalies(tally::cli::AnomaliesArgs),

    /// Forecast the coming months
    Forecast(tally::cli::ForecastArgs),

    /// Month overview: totals, budgets, anomalies and forecast
    Overview(tally::cli::OverviewArgs),

    /// Show current configuration and paths
    Config {
        #[command(subcommand)]
        command: Option<tally::cli::ConfigCommands>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Initialize paths and settings
    let paths = TallyPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("Tally - expense aggregation, budget signals and forecasting");
        println!();
        println!("Run 'tally --help' for usage information.");
        return Ok(());
    };

    let snapshot = || load_snapshot(cli.input.as_deref());

    match command {
        Commands::Buckets(args) => handle_buckets_command(&snapshot()?, &settings, args)?,
        Commands::Budget(args) => handle_budget_command(&snapshot()?, &settings, args)?,
        Commands::Anomalies(args) => handle_anomalies_command(&snapshot()?, &settings, args)?,
        Commands::Forecast(args) => handle_forecast_command(&snapshot()?, &settings, args)?,
        Commands::Overview(args) => handle_overview_command(&snapshot()?, &settings, args)?,
        Commands::Config { command } => handle_config_command(&paths, &settings, command)?,
    }

    Ok(())
}
