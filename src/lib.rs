//! Tally - expense aggregation, budget signals and forecasting
//!
//! This library turns a snapshot of personal finance records (expenses,
//! revenues and categories) into the figures a dashboard needs: period
//! buckets, budget statuses, spending anomalies, forecasts and chart
//! series.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, periods, buckets, signals)
//! - `source`: Snapshot loading and record cleaning
//! - `services`: Aggregation, budget, anomaly and forecast logic
//! - `reports`: End-to-end month overview and forecast reports
//! - `display`: Terminal formatting and tables
//! - `cli`: Command handlers for the `tally` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::config::{Settings, TallyPaths};
//! use tally::reports::FinanceOverview;
//! use tally::source::Snapshot;
//!
//! let paths = TallyPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let snapshot = Snapshot::load("finances.json".as_ref())?;
//! let overview = FinanceOverview::generate(&snapshot, &settings, 2025, 3)?;
//! println!("{}", overview.format_terminal());
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod source;

pub use error::{TallyError, TallyResult};
