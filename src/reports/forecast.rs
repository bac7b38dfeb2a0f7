//! Forecast Report
//!
//! Buckets a trailing span of months, forecasts the following months and
//! projects both halves into one chart series.

use chrono::{Datelike, Local};
use serde::Serialize;
use tracing::debug;

use crate::config::Settings;
use crate::display::{double_separator, forecast_table, series_table};
use crate::error::TallyResult;
use crate::models::{Algorithm, Bucket, BucketMode, ForecastPoint, SeriesField, SeriesPoint, Window};
use crate::services::{BucketService, CategoryResolver, Forecaster, SeriesProjector};
use crate::source::Snapshot;

/// What to forecast
#[derive(Debug, Clone)]
pub struct ForecastRequest {
    /// Last month of history (year, month)
    pub until: (i32, u32),
    /// Number of history months
    pub history_months: u32,
    /// Number of future months
    pub horizon: usize,
    pub algorithm: Algorithm,
    /// Which total the chart series carries
    pub field: SeriesField,
}

impl ForecastRequest {
    /// Request built from settings, ending at the latest month with data
    pub fn from_settings(settings: &Settings, snapshot: &Snapshot) -> Self {
        Self {
            until: latest_month(snapshot),
            history_months: settings.forecast.history_months,
            horizon: settings.forecast.horizon,
            algorithm: settings.forecast.algorithm,
            field: SeriesField::Expense,
        }
    }
}

/// History, forecast and the chart series joining them
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub algorithm: Algorithm,
    pub history: Vec<Bucket>,
    pub forecast: Vec<ForecastPoint>,
    pub series: Vec<SeriesPoint>,
    #[serde(skip)]
    currency_symbol: String,
}

impl ForecastReport {
    /// Generate a forecast report
    pub fn generate(
        snapshot: &Snapshot,
        settings: &Settings,
        request: &ForecastRequest,
    ) -> TallyResult<Self> {
        let resolver = CategoryResolver::new(&snapshot.categories);
        let bucketer = BucketService::new(&resolver);
        let window = Window::trailing_months(request.until, request.history_months)?;

        let history = bucketer.bucket(&snapshot.transactions, BucketMode::Month, &window);
        let forecast = Forecaster::new(settings.forecast.max_horizon).forecast(
            &history,
            request.horizon,
            request.algorithm,
        )?;
        let series = SeriesProjector::new(settings.label_format.clone()).project(
            &history,
            &forecast,
            request.field,
        );

        debug!(%window, points = series.len(), "forecast report generated");

        Ok(Self {
            algorithm: request.algorithm,
            history,
            forecast,
            series,
            currency_symbol: settings.currency_symbol.clone(),
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Forecast ({})\n", self.algorithm));
        output.push_str(&double_separator(60));
        output.push('\n');

        if self.forecast.is_empty() {
            output.push_str("Not enough history to forecast (need at least 2 months).\n");
            return output;
        }

        output.push_str(&forecast_table(&self.forecast, &self.currency_symbol));
        output.push_str("\n\nSeries\n");
        output.push_str(&series_table(&self.series, &self.currency_symbol));
        output.push('\n');

        output
    }
}

/// Latest month holding a dated transaction, or the current month
pub fn latest_month(snapshot: &Snapshot) -> (i32, u32) {
    snapshot
        .transactions
        .iter()
        .filter_map(|t| t.date)
        .max()
        .map(|d| (d.year(), d.month()))
        .unwrap_or_else(|| {
            let today = Local::now().date_naive();
            (today.year(), today.month())
        })
}
