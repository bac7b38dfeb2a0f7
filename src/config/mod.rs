//! Configuration module for Tally
//!
//! - Config directory resolution
//! - User settings persistence (thresholds, forecast defaults, label formats)

pub mod paths;
pub mod settings;

pub use paths::TallyPaths;
pub use settings::{ForecastSettings, Settings};
