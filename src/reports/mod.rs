//! Reports module for Tally
//!
//! Runs the engine end to end: a month overview (buckets, budgets,
//! anomalies, forecast) and a standalone forecast report.

pub mod forecast;
pub mod overview;

pub use forecast::{latest_month, ForecastReport, ForecastRequest};
pub use overview::FinanceOverview;
