//! Bucket model
//!
//! A bucket is the aggregate of all transactions in one period. Buckets are
//! created fresh on every aggregation call and never persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::period::PeriodKey;
use super::transaction::{Transaction, TransactionKind};

/// Aggregated totals for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    /// Period this bucket covers
    pub period_key: PeriodKey,

    /// Sum of expense amounts
    pub total_expense: f64,

    /// Sum of revenue amounts
    pub total_revenue: f64,

    /// Number of transactions folded into the bucket
    pub count: usize,

    /// Expense amounts per resolved category name
    pub by_category: BTreeMap<String, f64>,

    /// `total_expense / count`, or 0 when the bucket is empty
    pub average_expense: f64,
}

impl Bucket {
    /// Create an empty bucket
    pub fn empty(period_key: PeriodKey) -> Self {
        Self {
            period_key,
            total_expense: 0.0,
            total_revenue: 0.0,
            count: 0,
            by_category: BTreeMap::new(),
            average_expense: 0.0,
        }
    }

    /// Fold one transaction in under an already-resolved category name
    ///
    /// Keeps `total_expense == Σ by_category` and `count` in step.
    pub fn fold(&mut self, transaction: &Transaction, category: &str) {
        match transaction.kind {
            TransactionKind::Expense => {
                self.total_expense += transaction.amount;
                *self.by_category.entry(category.to_string()).or_insert(0.0) +=
                    transaction.amount;
            }
            TransactionKind::Revenue => {
                self.total_revenue += transaction.amount;
            }
        }
        self.count += 1;
        self.average_expense = if self.count == 0 {
            0.0
        } else {
            self.total_expense / self.count as f64
        };
    }

    /// Revenue minus expense
    pub fn balance(&self) -> f64 {
        self.total_revenue - self.total_expense
    }

    /// Check if nothing was folded in
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Spend in one category (0 when absent)
    pub fn category_spend(&self, category: &str) -> f64 {
        self.by_category.get(category).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_fold_keeps_invariants() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let mut bucket = Bucket::empty(PeriodKey::month(2025, 1));

        bucket.fold(&Transaction::expense("1", d, 30.0), "Food");
        bucket.fold(&Transaction::expense("2", d, 20.0), "Food");
        bucket.fold(&Transaction::expense("3", d, 50.0), "Rent");
        bucket.fold(&Transaction::revenue("4", d, 1000.0), "ignored");

        assert_eq!(bucket.count, 4);
        assert_eq!(bucket.total_expense, 100.0);
        assert_eq!(bucket.total_revenue, 1000.0);
        assert_eq!(bucket.by_category.values().sum::<f64>(), bucket.total_expense);
        assert_eq!(bucket.category_spend("Food"), 50.0);
        assert_eq!(bucket.category_spend("ignored"), 0.0);
        assert_eq!(bucket.average_expense, 25.0);
        assert_eq!(bucket.balance(), 900.0);
    }

    #[test]
    fn test_empty_bucket() {
        let bucket = Bucket::empty(PeriodKey::Year(2025));
        assert!(bucket.is_empty());
        assert_eq!(bucket.average_expense, 0.0);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(Bucket::empty(PeriodKey::month(2025, 1))).unwrap();
        assert_eq!(json["periodKey"], "2025-01");
        assert_eq!(json["totalExpense"], 0.0);
        assert!(json["byCategory"].as_object().unwrap().is_empty());
    }
}
