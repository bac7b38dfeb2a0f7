//! Service layer for Tally
//!
//! The aggregation engine proper: bucketing, category resolution, budget
//! thresholds, forecasting, anomaly detection and series projection. Every
//! service is a pure computation over borrowed inputs and returns freshly
//! allocated results.

pub mod anomaly;
pub mod bucket;
pub mod budget;
pub mod category;
pub mod forecast;
pub mod projection;

pub use anomaly::{detect, detect_between, detect_series, DEFAULT_THRESHOLD_PERCENT};
pub use bucket::BucketService;
pub use budget::{BudgetAnalyzer, CategoryBudget};
pub use category::{CategoryResolver, ResolveStrategy};
pub use forecast::{forecast, Forecaster, LinearFit};
pub use projection::{LabelFormats, SeriesProjector};
