//! Trend forecasting
//!
//! Predicts expense and revenue totals for the periods following a
//! chronological bucket history. The three algorithms share one entry point,
//! [`Forecaster::forecast`], so every caller gets the same output shape.

use tracing::{debug, warn};

use crate::error::{TallyError, TallyResult};
use crate::models::amount::finite_or_zero;
use crate::models::{Algorithm, Bucket, ForecastPoint, PeriodKey};

/// Minimum number of historical buckets needed to forecast
pub const MIN_HISTORY: usize = 2;

/// Default upper bound on the forecast horizon accepted from settings and the CLI
pub const DEFAULT_MAX_HORIZON: usize = 36;

/// Least-squares line `value = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fit over `x = 0..n-1`; `None` when the system is degenerate
    pub fn fit(values: &[f64]) -> Option<Self> {
        let n = values.len() as f64;
        let sum_x: f64 = (0..values.len()).map(|i| i as f64).sum();
        let sum_y: f64 = values.iter().sum();
        let sum_xy: f64 = values.iter().enumerate().map(|(i, &y)| i as f64 * y).sum();
        let sum_x2: f64 = (0..values.len()).map(|i| (i as f64).powi(2)).sum();

        let denominator = n * sum_x2 - sum_x.powi(2);
        if values.is_empty() || denominator.abs() < f64::EPSILON {
            return None;
        }

        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / n;
        Some(Self { slope, intercept })
    }

    /// Evaluate the line at `x`
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Produces forecast points from a bucket history
///
/// The default forecaster accepts any horizon; [`Forecaster::new`] caps it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Forecaster {
    max_horizon: Option<usize>,
}

impl Forecaster {
    /// Create a forecaster accepting horizons up to `max_horizon`
    pub fn new(max_horizon: usize) -> Self {
        Self {
            max_horizon: Some(max_horizon),
        }
    }

    /// Predict `horizon` periods after the end of `history`
    ///
    /// `history` must be chronological. Fewer than two buckets yields an
    /// empty forecast. Weekday-class buckets have no "next period" and are
    /// rejected, as is a horizon of zero or above the configured maximum.
    pub fn forecast(
        &self,
        history: &[Bucket],
        horizon: usize,
        algorithm: Algorithm,
    ) -> TallyResult<Vec<ForecastPoint>> {
        if horizon == 0 {
            return Err(TallyError::Validation(
                "forecast horizon must be at least 1".into(),
            ));
        }
        if let Some(max_horizon) = self.max_horizon.filter(|&max| horizon > max) {
            return Err(TallyError::Validation(format!(
                "forecast horizon {} exceeds the maximum of {}",
                horizon, max_horizon
            )));
        }
        if history.iter().any(|b| !b.period_key.mode().is_chronological()) {
            return Err(TallyError::Validation(
                "cannot forecast from weekday buckets".into(),
            ));
        }

        if history.len() < MIN_HISTORY {
            debug!(history = history.len(), "not enough history to forecast");
            return Ok(Vec::new());
        }

        let keys: Vec<PeriodKey> = history.iter().map(|b| b.period_key).collect();
        let expenses: Vec<f64> = history.iter().map(|b| b.total_expense).collect();
        let revenues: Vec<f64> = history.iter().map(|b| b.total_revenue).collect();

        let expense_model = SeriesModel::build(&keys, &expenses);
        let revenue_model = SeriesModel::build(&keys, &revenues);

        let mut points = Vec::with_capacity(horizon);
        let mut key = keys[keys.len() - 1];
        for offset in 1..=horizon {
            key = key.next().ok_or_else(|| {
                TallyError::Validation(format!("period {} has no successor", key))
            })?;

            points.push(ForecastPoint {
                period_key: key,
                predicted_expense: expense_model.predict(algorithm, &key, offset),
                predicted_revenue: revenue_model.predict(algorithm, &key, offset),
                algorithm,
            });
        }

        debug!(
            %algorithm,
            history = history.len(),
            horizon,
            first = %points[0].period_key,
            "forecast computed"
        );

        Ok(points)
    }
}

/// Forecast without a horizon limit
pub fn forecast(
    history: &[Bucket],
    horizon: usize,
    algorithm: Algorithm,
) -> TallyResult<Vec<ForecastPoint>> {
    Forecaster::default().forecast(history, horizon, algorithm)
}

/// Precomputed statistics for one value series
struct SeriesModel<'h> {
    keys: &'h [PeriodKey],
    values: &'h [f64],
    mean: f64,
    fit: Option<LinearFit>,
}

impl<'h> SeriesModel<'h> {
    fn build(keys: &'h [PeriodKey], values: &'h [f64]) -> Self {
        Self {
            keys,
            values,
            mean: mean(values),
            fit: LinearFit::fit(values),
        }
    }

    /// Prediction for the period `offset` steps after the last one, never negative
    fn predict(&self, algorithm: Algorithm, target: &PeriodKey, offset: usize) -> f64 {
        let raw = match algorithm {
            Algorithm::Average => self.mean,
            Algorithm::LinearTrend => match self.fit {
                Some(fit) => fit.at((self.values.len() - 1 + offset) as f64),
                None => self.mean,
            },
            Algorithm::Seasonal => self.seasonal(target).unwrap_or_else(|| {
                warn!(period = %target, "no same-month history, using overall average");
                self.mean
            }),
        };

        finite_or_zero(raw).max(0.0)
    }

    /// Mean of historical values in the target's calendar month
    fn seasonal(&self, target: &PeriodKey) -> Option<f64> {
        let month = target.calendar_month()?;
        let matching: Vec<f64> = self
            .keys
            .iter()
            .zip(self.values)
            .filter(|(k, _)| k.calendar_month() == Some(month))
            .map(|(_, v)| *v)
            .collect();

        if matching.is_empty() {
            None
        } else {
            Some(mean(&matching))
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monthly_history(start: (i32, u32), expenses: &[f64]) -> Vec<Bucket> {
        let mut key = PeriodKey::month(start.0, start.1);
        expenses
            .iter()
            .map(|&e| {
                let mut bucket = Bucket::empty(key);
                bucket.total_expense = e;
                bucket.by_category.insert("All".into(), e);
                bucket.total_revenue = 1000.0;
                key = key.next().unwrap();
                bucket
            })
            .collect()
    }

    #[test]
    fn test_average() {
        let history = monthly_history((2025, 1), &[100.0, 200.0, 300.0]);
        let points = forecast(&history, 3, Algorithm::Average).unwrap();

        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.predicted_expense == 200.0));
        assert!(points.iter().all(|p| p.predicted_revenue == 1000.0));
        assert_eq!(points[0].period_key, PeriodKey::month(2025, 4));
        assert_eq!(points[2].period_key, PeriodKey::month(2025, 6));
        assert!(points.iter().all(|p| p.algorithm == Algorithm::Average));
    }

    #[test]
    fn test_linear_trend() {
        let history = monthly_history((2024, 11), &[10.0, 20.0, 30.0, 40.0]);
        let points = forecast(&history, 2, Algorithm::LinearTrend).unwrap();

        assert!((points[0].predicted_expense - 50.0).abs() < 1e-9);
        assert!((points[1].predicted_expense - 60.0).abs() < 1e-9);
        assert_eq!(points[0].period_key, PeriodKey::month(2025, 3));
    }

    #[test]
    fn test_linear_trend_clamps_negative() {
        let history = monthly_history((2025, 1), &[300.0, 200.0, 100.0]);
        let points = forecast(&history, 3, Algorithm::LinearTrend).unwrap();

        assert!((points[0].predicted_expense - 0.0).abs() < 1e-9);
        assert_eq!(points[1].predicted_expense, 0.0);
        assert_eq!(points[2].predicted_expense, 0.0);
    }

    #[test]
    fn test_seasonal_uses_same_month() {
        // Two years of history: every March costs 500, other months 100
        let expenses: Vec<f64> = (1..=24)
            .map(|i| if (i - 1) % 12 == 2 { 500.0 } else { 100.0 })
            .collect();
        let history = monthly_history((2023, 1), &expenses);
        let points = forecast(&history, 3, Algorithm::Seasonal).unwrap();

        assert_eq!(points[0].period_key, PeriodKey::month(2025, 1));
        assert_eq!(points[0].predicted_expense, 100.0);
        assert_eq!(points[2].period_key, PeriodKey::month(2025, 3));
        assert_eq!(points[2].predicted_expense, 500.0);
    }

    #[test]
    fn test_seasonal_falls_back_to_average() {
        let history = monthly_history((2025, 1), &[100.0, 300.0]);
        let points = forecast(&history, 1, Algorithm::Seasonal).unwrap();
        assert_eq!(points[0].period_key, PeriodKey::month(2025, 3));
        assert_eq!(points[0].predicted_expense, 200.0);
    }

    #[test]
    fn test_seasonal_year_buckets_use_average() {
        let history: Vec<Bucket> = [(2023, 10.0), (2024, 30.0)]
            .iter()
            .map(|&(y, e)| {
                let mut b = Bucket::empty(PeriodKey::Year(y));
                b.total_expense = e;
                b
            })
            .collect();
        let points = forecast(&history, 1, Algorithm::Seasonal).unwrap();
        assert_eq!(points[0].period_key, PeriodKey::Year(2025));
        assert_eq!(points[0].predicted_expense, 20.0);
    }

    #[test]
    fn test_short_history_is_empty() {
        let history = monthly_history((2025, 1), &[100.0]);
        for algorithm in Algorithm::all() {
            assert!(forecast(&history, 3, *algorithm).unwrap().is_empty());
        }
        assert!(forecast(&[], 3, Algorithm::Average).unwrap().is_empty());
    }

    #[test]
    fn test_boundary_validation() {
        let history = monthly_history((2025, 1), &[1.0, 2.0]);
        assert!(forecast(&history, 0, Algorithm::Average).unwrap_err().is_validation());
        assert!(Forecaster::new(6)
            .forecast(&history, 7, Algorithm::Average)
            .unwrap_err()
            .is_validation());

        let weekdays: Vec<Bucket> = (0..7).map(|i| Bucket::empty(PeriodKey::Weekday(i))).collect();
        assert!(forecast(&weekdays, 1, Algorithm::Average).unwrap_err().is_validation());
    }

    #[test]
    fn test_entry_point_has_no_horizon_cap() {
        let history = monthly_history((2025, 1), &[100.0, 300.0]);
        let points = forecast(&history, 37, Algorithm::Average).unwrap();

        assert_eq!(points.len(), 37);
        assert!(points.iter().all(|p| p.predicted_expense == 200.0));
        assert_eq!(points[36].period_key, PeriodKey::month(2028, 3));
    }

    #[test]
    fn test_linear_fit_guards() {
        assert!(LinearFit::fit(&[5.0]).is_none());
        assert!(LinearFit::fit(&[]).is_none());
        let fit = LinearFit::fit(&[2.0, 4.0]).unwrap();
        assert_eq!(fit.slope, 2.0);
        assert_eq!(fit.intercept, 2.0);
        assert_eq!(fit.at(2.0), 6.0);
    }

    #[test]
    fn test_daily_history_continues_by_day() {
        let mut a = Bucket::empty("2025-01-30".parse().unwrap());
        a.total_expense = 10.0;
        let mut b = Bucket::empty("2025-01-31".parse().unwrap());
        b.total_expense = 20.0;

        let points = forecast(&[a, b], 2, Algorithm::LinearTrend).unwrap();
        assert_eq!(points[0].period_key.to_string(), "2025-02-01");
        assert!((points[0].predicted_expense - 30.0).abs() < 1e-9);
        assert!((points[1].predicted_expense - 40.0).abs() < 1e-9);
    }
}
