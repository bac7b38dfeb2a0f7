//! Series projection
//!
//! Joins a bucket history and its forecast into one labelled series. History
//! points carry only `actual`, forecast points carry only `predicted`, so a
//! renderer can draw two separate lines on one shared axis.

use std::collections::HashMap;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::{TallyError, TallyResult};
use crate::models::{Bucket, ForecastPoint, PeriodKey, SeriesField, SeriesPoint};

/// chrono format strings used for period labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelFormats {
    #[serde(default = "default_day_format")]
    pub day: String,
    #[serde(default = "default_month_format")]
    pub month: String,
    #[serde(default = "default_year_format")]
    pub year: String,
}

fn default_day_format() -> String {
    "%d %b".to_string()
}

fn default_month_format() -> String {
    "%b %Y".to_string()
}

fn default_year_format() -> String {
    "%Y".to_string()
}

impl Default for LabelFormats {
    fn default() -> Self {
        Self {
            day: default_day_format(),
            month: default_month_format(),
            year: default_year_format(),
        }
    }
}

impl LabelFormats {
    /// Label for one key
    pub fn label(&self, key: &PeriodKey) -> String {
        match key {
            PeriodKey::Day(_) => key.label(&self.day),
            PeriodKey::Month { .. } => key.label(&self.month),
            PeriodKey::Year(_) => key.label(&self.year),
            PeriodKey::Weekday(_) => key.to_string(),
        }
    }

    /// Reject format strings chrono cannot render
    pub fn validate(&self) -> TallyResult<()> {
        for (name, format) in [("day", &self.day), ("month", &self.month), ("year", &self.year)] {
            if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
                return Err(TallyError::Validation(format!(
                    "invalid {} label format: {:?}",
                    name, format
                )));
            }
        }
        Ok(())
    }
}

/// Builds chart series from history and forecast
#[derive(Debug, Clone, Default)]
pub struct SeriesProjector {
    formats: LabelFormats,
}

impl SeriesProjector {
    /// Create a projector with the given label formats
    pub fn new(formats: LabelFormats) -> Self {
        Self { formats }
    }

    /// One point per history bucket followed by one per forecast point
    pub fn project(
        &self,
        history: &[Bucket],
        forecast: &[ForecastPoint],
        field: SeriesField,
    ) -> Vec<SeriesPoint> {
        // Each key is labelled exactly once so both halves share the same axis text
        let mut labels: HashMap<PeriodKey, String> = HashMap::new();
        for key in history
            .iter()
            .map(|b| b.period_key)
            .chain(forecast.iter().map(|p| p.period_key))
        {
            labels.entry(key).or_insert_with(|| self.formats.label(&key));
        }
        let label = |key: &PeriodKey| labels.get(key).cloned().unwrap_or_default();

        let actual = history.iter().map(|bucket| SeriesPoint {
            label: label(&bucket.period_key),
            actual: Some(actual_value(bucket, field)),
            predicted: None,
        });

        let predicted = forecast.iter().map(|point| SeriesPoint {
            label: label(&point.period_key),
            actual: None,
            predicted: Some(predicted_value(point, field)),
        });

        actual.chain(predicted).collect()
    }
}

fn actual_value(bucket: &Bucket, field: SeriesField) -> f64 {
    match field {
        SeriesField::Expense => bucket.total_expense,
        SeriesField::Revenue => bucket.total_revenue,
        SeriesField::Balance => bucket.balance(),
    }
}

fn predicted_value(point: &ForecastPoint, field: SeriesField) -> f64 {
    match field {
        SeriesField::Expense => point.predicted_expense,
        SeriesField::Revenue => point.predicted_revenue,
        SeriesField::Balance => point.predicted_balance(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Algorithm, BucketMode, Category, Transaction, Window};
    use crate::services::{forecast, BucketService, CategoryResolver};
    use chrono::NaiveDate;

    fn history() -> Vec<Bucket> {
        [(1, 100.0), (2, 150.0), (3, 200.0)]
            .iter()
            .map(|&(m, e)| {
                let mut b = Bucket::empty(PeriodKey::month(2025, m));
                b.total_expense = e;
                b.total_revenue = 500.0;
                b
            })
            .collect()
    }

    #[test]
    fn test_halves_are_exclusive() {
        let history = history();
        let forecast = forecast(&history, 2, Algorithm::LinearTrend).unwrap();
        let series = SeriesProjector::default().project(&history, &forecast, SeriesField::Expense);

        assert_eq!(series.len(), history.len() + forecast.len());
        assert!(series[..3].iter().all(|p| p.actual.is_some() && p.predicted.is_none()));
        assert!(series[3..].iter().all(|p| p.actual.is_none() && p.predicted.is_some()));
        assert_eq!(series[0].label, "Jan 2025");
        assert_eq!(series[3].label, "Apr 2025");
        assert_eq!(series[4].predicted, Some(300.0));
    }

    #[test]
    fn test_balance_field() {
        let history = history();
        let forecast = forecast(&history, 1, Algorithm::Average).unwrap();
        let series = SeriesProjector::default().project(&history, &forecast, SeriesField::Balance);
        assert_eq!(series[0].actual, Some(400.0));
        assert_eq!(series[3].predicted, Some(350.0));
    }

    #[test]
    fn test_custom_label_formats() {
        let formats = LabelFormats {
            month: "%m/%Y".into(),
            ..Default::default()
        };
        let series = SeriesProjector::new(formats).project(&history(), &[], SeriesField::Revenue);
        assert_eq!(series[1].label, "02/2025");
        assert_eq!(series[1].actual, Some(500.0));
    }

    #[test]
    fn test_bad_label_format() {
        let formats = LabelFormats {
            month: "%Q".into(),
            ..LabelFormats::default()
        };
        assert!(formats.validate().unwrap_err().is_validation());
        assert!(LabelFormats::default().validate().is_ok());

        let series = SeriesProjector::new(formats).project(&history(), &[], SeriesField::Expense);
        assert_eq!(series[0].label, "2025-01");
    }

    #[test]
    fn test_empty_inputs() {
        let series = SeriesProjector::default().project(&[], &[], SeriesField::Expense);
        assert!(series.is_empty());
    }

    #[test]
    fn test_rebucketing_reproduces_actuals() {
        let cats = vec![Category::new("1", "Food")];
        let resolver = CategoryResolver::new(&cats);
        let service = BucketService::new(&resolver);
        let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
        let txns = vec![
            Transaction::expense("a", d(1, 4), 12.5).with_category(1),
            Transaction::expense("b", d(2, 9), 40.0),
            Transaction::expense("c", d(2, 28), 7.5).with_category("Gifts"),
            Transaction::revenue("d", d(3, 1), 900.0),
        ];
        let window = Window::months((2025, 1), (2025, 3)).unwrap();

        let first = service.bucket(&txns, BucketMode::Month, &window);
        let projected = SeriesProjector::default().project(&first, &[], SeriesField::Expense);
        let second = service.bucket(&txns, BucketMode::Month, &window);

        let actuals: Vec<f64> = projected.iter().filter_map(|p| p.actual).collect();
        let again: Vec<f64> = second.iter().map(|b| b.total_expense).collect();
        assert_eq!(actuals, again);
        assert_eq!(actuals, vec![12.5, 47.5, 0.0]);
    }
}
