//! Display formatting for terminal output
//!
//! Formatting helpers and tables for buckets, budgets, anomalies and
//! forecasts.

pub mod report;
pub mod tables;

pub use report::{
    double_separator, format_amount, format_bar, format_header, format_optional, format_percentage,
    format_status,
};
pub use tables::{anomaly_table, bucket_table, budget_table, forecast_table, series_table};
