//! Output records handed to presentation layers: anomaly alerts and chart
//! series points.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::period::PeriodKey;
use crate::error::TallyError;

/// A category whose spend grew faster than the alert threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalySignal {
    pub category: String,
    pub period_key: PeriodKey,
    pub percent_increase: f64,
}

impl fmt::Display for AnomalySignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} up {:.1}% in {}",
            self.category, self.percent_increase, self.period_key
        )
    }
}

/// Which bucket total a series carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeriesField {
    #[default]
    Expense,
    Revenue,
    Balance,
}

impl FromStr for SeriesField {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" | "expenses" => Ok(Self::Expense),
            "revenue" | "revenues" | "income" => Ok(Self::Revenue),
            "balance" => Ok(Self::Balance),
            other => Err(TallyError::Validation(format!(
                "unknown series field '{}' (expected expense, revenue or balance)",
                other
            ))),
        }
    }
}

impl fmt::Display for SeriesField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "expense"),
            Self::Revenue => write!(f, "revenue"),
            Self::Balance => write!(f, "balance"),
        }
    }
}

/// One chart point: either an actual value or a predicted one, never both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub actual: Option<f64>,
    pub predicted: Option<f64>,
}

impl SeriesPoint {
    /// Check if this point comes from the forecast half
    pub fn is_forecast(&self) -> bool {
        self.predicted.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_display() {
        let signal = AnomalySignal {
            category: "Dining".into(),
            period_key: PeriodKey::month(2025, 3),
            percent_increase: 60.0,
        };
        assert_eq!(signal.to_string(), "Dining up 60.0% in 2025-03");
        let json = serde_json::to_value(&signal).unwrap();
        assert_eq!(json["percentIncrease"], 60.0);
    }

    #[test]
    fn test_series_point_nulls() {
        let point = SeriesPoint {
            label: "Jan 2025".into(),
            actual: Some(10.0),
            predicted: None,
        };
        assert!(!point.is_forecast());
        assert_eq!(
            serde_json::to_string(&point).unwrap(),
            r#"{"label":"Jan 2025","actual":10.0,"predicted":null}"#
        );
    }

    #[test]
    fn test_series_field_parse() {
        assert_eq!("income".parse::<SeriesField>().unwrap(), SeriesField::Revenue);
        assert!("profit".parse::<SeriesField>().is_err());
    }
}
