//! Budget threshold analysis
//!
//! Compares what was spent in a category against its configured limit.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Bucket, BudgetStatus, BudgetThresholds, PeriodKey};

use super::category::CategoryResolver;

/// Budget utilization of one category in one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBudget {
    pub category: String,
    pub period_key: PeriodKey,
    pub spent: f64,
    pub limit: f64,
    pub ratio: f64,
    pub status: BudgetStatus,
}

impl CategoryBudget {
    /// Amount left before the limit (negative when over)
    pub fn remaining(&self) -> f64 {
        self.limit - self.spent
    }
}

/// Classifies spend against budget limits
#[derive(Debug, Clone, Copy, Default)]
pub struct BudgetAnalyzer {
    thresholds: BudgetThresholds,
}

impl BudgetAnalyzer {
    /// Create an analyzer with the given thresholds
    pub fn new(thresholds: BudgetThresholds) -> Self {
        Self { thresholds }
    }

    /// The thresholds in use
    pub fn thresholds(&self) -> &BudgetThresholds {
        &self.thresholds
    }

    /// Status of `spent` against `limit`
    ///
    /// A limit of zero or less (or not a number) means no budget, which is
    /// always safe. Over is checked before warning.
    pub fn analyze(&self, spent: f64, limit: f64) -> BudgetStatus {
        if !limit.is_finite() || limit <= 0.0 {
            return BudgetStatus::Safe;
        }

        let ratio = spent / limit;
        if ratio > self.thresholds.over_ratio {
            BudgetStatus::Over
        } else if ratio > self.thresholds.warning_ratio {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Safe
        }
    }

    /// Budget report for every category with a limit, in name order
    ///
    /// Categories with a limit but no spend in the bucket are included with
    /// zero spend.
    pub fn analyze_bucket(
        &self,
        bucket: &Bucket,
        resolver: &CategoryResolver<'_>,
    ) -> Vec<CategoryBudget> {
        let report: Vec<CategoryBudget> = resolver
            .budget_limits()
            .into_iter()
            .map(|(category, limit)| {
                let spent = bucket.category_spend(&category);
                CategoryBudget {
                    status: self.analyze(spent, limit),
                    ratio: spent / limit,
                    period_key: bucket.period_key,
                    spent,
                    limit,
                    category,
                }
            })
            .collect();

        debug!(
            period = %bucket.period_key,
            categories = report.len(),
            over = report.iter().filter(|b| b.status == BudgetStatus::Over).count(),
            "analyzed budgets"
        );

        report
    }
}

/// Status of `spent` against `limit` with the default thresholds
pub fn analyze(spent: f64, limit: f64) -> BudgetStatus {
    BudgetAnalyzer::default().analyze(spent, limit)
}
