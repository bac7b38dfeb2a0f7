//! User settings for Tally
//!
//! Thresholds, forecast defaults and label formats. Every field has a
//! default, so a partial or missing config file is fine.

use serde::{Deserialize, Serialize};

use super::paths::TallyPaths;
use crate::error::{TallyError, TallyResult};
use crate::models::{Algorithm, BudgetThresholds};
use crate::services::anomaly::DEFAULT_THRESHOLD_PERCENT;
use crate::services::forecast::DEFAULT_MAX_HORIZON;
use crate::services::LabelFormats;

/// Forecast defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSettings {
    /// Number of future periods predicted when none is given
    #[serde(default = "default_horizon")]
    pub horizon: usize,

    /// Largest horizon accepted
    #[serde(default = "default_max_horizon")]
    pub max_horizon: usize,

    /// Algorithm used when none is given
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Months of history fed to the forecaster
    #[serde(default = "default_history_months")]
    pub history_months: u32,
}

fn default_horizon() -> usize {
    3
}

fn default_max_horizon() -> usize {
    DEFAULT_MAX_HORIZON
}

fn default_history_months() -> u32 {
    6
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            horizon: default_horizon(),
            max_horizon: default_max_horizon(),
            algorithm: Algorithm::default(),
            history_months: default_history_months(),
        }
    }
}

/// User settings for Tally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Budget warning/over ratios
    #[serde(default)]
    pub budget: BudgetThresholds,

    /// Month-over-month growth (percent) above which a category is flagged
    #[serde(default = "default_anomaly_threshold")]
    pub anomaly_threshold_percent: f64,

    /// Forecast defaults
    #[serde(default)]
    pub forecast: ForecastSettings,

    /// Period label formats for chart series
    #[serde(default)]
    pub label_format: LabelFormats,

    /// Currency symbol for terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_anomaly_threshold() -> f64 {
    DEFAULT_THRESHOLD_PERCENT
}

fn default_currency() -> String {
    "€".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            budget: BudgetThresholds::default(),
            anomaly_threshold_percent: default_anomaly_threshold(),
            forecast: ForecastSettings::default(),
            label_format: LabelFormats::default(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &TallyPaths) -> TallyResult<Self> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| TallyError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                TallyError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TallyPaths) -> TallyResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TallyError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TallyError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> TallyResult<()> {
        self.budget
            .validate()
            .map_err(|e| TallyError::Config(e.to_string()))?;

        if !self.anomaly_threshold_percent.is_finite() || self.anomaly_threshold_percent < 0.0 {
            return Err(TallyError::Config(format!(
                "anomaly threshold must be a non-negative percentage, got {}",
                self.anomaly_threshold_percent
            )));
        }

        let forecast = &self.forecast;
        if forecast.horizon == 0 || forecast.horizon > forecast.max_horizon {
            return Err(TallyError::Config(format!(
                "forecast horizon must be between 1 and {}, got {}",
                forecast.max_horizon, forecast.horizon
            )));
        }
        if forecast.history_months < 2 {
            return Err(TallyError::Config(
                "forecast history must cover at least 2 months".into(),
            ));
        }

        self.label_format
            .validate()
            .map_err(|e| TallyError::Config(e.to_string()))?;

        Ok(())
    }
}
