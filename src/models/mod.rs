//! Core data models for Tally
//!
//! Plain data structures for the aggregation engine: cleaned transactions,
//! categories, period keys and windows, buckets, and the derived signals the
//! services produce.

pub mod amount;
pub mod bucket;
pub mod budget;
pub mod category;
pub mod forecast;
pub mod period;
pub mod signal;
pub mod transaction;

pub use amount::{normalize_amount, RawAmount};
pub use bucket::Bucket;
pub use budget::{BudgetStatus, BudgetThresholds};
pub use category::{Category, UNCATEGORIZED};
pub use forecast::{Algorithm, ForecastPoint};
pub use period::{days_in_month, parse_year_month, BucketMode, PeriodKey, Window};
pub use signal::{AnomalySignal, SeriesField, SeriesPoint};
pub use transaction::{CategoryRef, Transaction, TransactionKind};
