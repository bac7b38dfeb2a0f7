//! Budget status and thresholds

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TallyError, TallyResult};

/// Utilization of a category budget
///
/// Ordered `Safe < Warning < Over`; the status only ever rises as the
/// spend/limit ratio grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Safe,
    Warning,
    Over,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "Safe"),
            Self::Warning => write!(f, "Warning"),
            Self::Over => write!(f, "Over"),
        }
    }
}

/// Ratio thresholds for [`BudgetStatus`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetThresholds {
    /// Ratio strictly above which a budget is in warning
    #[serde(default = "default_warning_ratio")]
    pub warning_ratio: f64,

    /// Ratio strictly above which a budget is over
    #[serde(default = "default_over_ratio")]
    pub over_ratio: f64,
}

fn default_warning_ratio() -> f64 {
    0.8
}

fn default_over_ratio() -> f64 {
    1.0
}

impl Default for BudgetThresholds {
    fn default() -> Self {
        Self {
            warning_ratio: default_warning_ratio(),
            over_ratio: default_over_ratio(),
        }
    }
}

impl BudgetThresholds {
    /// Custom thresholds
    pub fn new(warning_ratio: f64, over_ratio: f64) -> TallyResult<Self> {
        let thresholds = Self {
            warning_ratio,
            over_ratio,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Both ratios finite, non-negative, and warning not above over
    pub fn validate(&self) -> TallyResult<()> {
        if !self.warning_ratio.is_finite() || !self.over_ratio.is_finite() {
            return Err(TallyError::Validation(
                "budget thresholds must be finite".into(),
            ));
        }
        if self.warning_ratio < 0.0 || self.warning_ratio > self.over_ratio {
            return Err(TallyError::Validation(format!(
                "budget thresholds out of order: warning {} / over {}",
                self.warning_ratio, self.over_ratio
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = BudgetThresholds::default();
        assert_eq!(t.warning_ratio, 0.8);
        assert_eq!(t.over_ratio, 1.0);
    }

    #[test]
    fn test_validation() {
        assert!(BudgetThresholds::new(0.9, 1.1).is_ok());
        assert!(BudgetThresholds::new(1.2, 1.0).is_err());
        assert!(BudgetThresholds::new(-0.1, 1.0).is_err());
        assert!(BudgetThresholds::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_status_ordering() {
        assert!(BudgetStatus::Safe < BudgetStatus::Warning);
        assert!(BudgetStatus::Warning < BudgetStatus::Over);
        assert_eq!(serde_json::to_string(&BudgetStatus::Over).unwrap(), "\"over\"");
    }
}
