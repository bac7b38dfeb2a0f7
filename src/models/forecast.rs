//! Forecast algorithms and forecast points

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::period::PeriodKey;
use crate::error::TallyError;

/// Forecasting algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Algorithm {
    /// Mean of all historical periods
    Average,
    /// Least-squares line through the history, extrapolated (default)
    #[default]
    LinearTrend,
    /// Mean of historical periods sharing the target's calendar month
    Seasonal,
}

impl Algorithm {
    /// All algorithms
    pub fn all() -> &'static [Self] {
        &[Self::Average, Self::LinearTrend, Self::Seasonal]
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Average => write!(f, "average"),
            Self::LinearTrend => write!(f, "linearTrend"),
            Self::Seasonal => write!(f, "seasonal"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "average" | "avg" | "mean" => Ok(Self::Average),
            "lineartrend" | "linear" | "linear-trend" | "trend" | "regression" => {
                Ok(Self::LinearTrend)
            }
            "seasonal" | "season" => Ok(Self::Seasonal),
            other => Err(TallyError::Validation(format!(
                "unknown forecast algorithm '{}' (expected average, linear or seasonal)",
                other
            ))),
        }
    }
}

/// One predicted future period
///
/// Serialized field order is stable: period, expense, revenue, algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub period_key: PeriodKey,
    pub predicted_expense: f64,
    pub predicted_revenue: f64,
    pub algorithm: Algorithm,
}

impl ForecastPoint {
    /// Expected revenue minus expected expense
    pub fn predicted_balance(&self) -> f64 {
        self.predicted_revenue - self.predicted_expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_algorithm() {
        assert_eq!("average".parse::<Algorithm>().unwrap(), Algorithm::Average);
        assert_eq!("linear".parse::<Algorithm>().unwrap(), Algorithm::LinearTrend);
        assert_eq!("linearTrend".parse::<Algorithm>().unwrap(), Algorithm::LinearTrend);
        assert_eq!("Seasonal".parse::<Algorithm>().unwrap(), Algorithm::Seasonal);
        assert!("crystal-ball".parse::<Algorithm>().unwrap_err().is_validation());
    }

    #[test]
    fn test_display_round_trips() {
        for algorithm in Algorithm::all() {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), *algorithm);
        }
    }

    #[test]
    fn test_point_field_order() {
        let point = ForecastPoint {
            period_key: PeriodKey::month(2025, 4),
            predicted_expense: 120.0,
            predicted_revenue: 200.0,
            algorithm: Algorithm::Average,
        };
        assert_eq!(point.predicted_balance(), 80.0);
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["periodKey"], "2025-04");
        assert_eq!(json["predictedExpense"], 120.0);
        assert_eq!(json["predictedRevenue"], 200.0);
        assert_eq!(json["algorithm"], "average");
    }
}
