//! Transaction model
//!
//! A cleaned expense or revenue record. Built once from an upstream record
//! and never mutated by the engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::finite_or_zero;

/// Whether money left or entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Revenue,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Revenue => write!(f, "Revenue"),
        }
    }
}

/// Reference from a transaction to its category
///
/// Upstream data is inconsistent: some records store the category id (as a
/// number or a string), others store the category name directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Numeric(serde_json::Number),
    Text(String),
}

impl CategoryRef {
    /// String form used for id comparison
    pub fn as_key(&self) -> String {
        match self {
            Self::Numeric(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// The literal text, if the reference is a non-empty string
    pub fn literal(&self) -> Option<&str> {
        match self {
            Self::Text(s) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<&str> for CategoryRef {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for CategoryRef {
    fn from(n: i64) -> Self {
        Self::Numeric(n.into())
    }
}

impl fmt::Display for CategoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

/// A cleaned financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Identifier from the data source (stringified)
    pub id: String,

    /// Expense or revenue
    pub kind: TransactionKind,

    /// Normalized amount
    pub amount: f64,

    /// Transaction date; `None` when the source date could not be parsed
    pub date: Option<NaiveDate>,

    /// Category reference, if any
    pub category_ref: Option<CategoryRef>,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transaction {
    /// Create a new expense
    pub fn expense(id: impl Into<String>, date: NaiveDate, amount: f64) -> Self {
        Self::new(id, TransactionKind::Expense, Some(date), amount)
    }

    /// Create a new revenue
    pub fn revenue(id: impl Into<String>, date: NaiveDate, amount: f64) -> Self {
        Self::new(id, TransactionKind::Revenue, Some(date), amount)
    }

    /// Create a transaction; non-finite amounts become zero
    pub fn new(
        id: impl Into<String>,
        kind: TransactionKind,
        date: Option<NaiveDate>,
        amount: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            amount: finite_or_zero(amount),
            date,
            category_ref: None,
            description: None,
        }
    }

    /// Builder-style category assignment
    pub fn with_category(mut self, category_ref: impl Into<CategoryRef>) -> Self {
        self.category_ref = Some(category_ref.into());
        self
    }

    /// Builder-style description assignment
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check if this is an expense
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "????-??-??".to_string());
        write!(f, "{} {} {:.2}", date, self.kind, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let txn = Transaction::expense("1", d, 42.0)
            .with_category("Groceries")
            .with_description("weekly shop");

        assert!(txn.is_expense());
        assert_eq!(txn.category_ref, Some(CategoryRef::Text("Groceries".into())));
        assert_eq!(txn.description.as_deref(), Some("weekly shop"));
        assert_eq!(txn.to_string(), "2025-01-10 Expense 42.00");
    }

    #[test]
    fn test_non_finite_amount_is_zeroed() {
        let txn = Transaction::new("x", TransactionKind::Revenue, None, f64::NAN);
        assert_eq!(txn.amount, 0.0);
    }

    #[test]
    fn test_category_ref_keys() {
        assert_eq!(CategoryRef::from(7).as_key(), "7");
        assert_eq!(CategoryRef::from("7").as_key(), "7");
        assert_eq!(CategoryRef::from("  ").literal(), None);
        assert_eq!(CategoryRef::from(3).literal(), None);
        assert_eq!(CategoryRef::from("Rent").literal(), Some("Rent"));
    }

    #[test]
    fn test_category_ref_untagged() {
        let n: CategoryRef = serde_json::from_str("12").unwrap();
        assert_eq!(n, CategoryRef::from(12));
        let s: CategoryRef = serde_json::from_str("\"Food\"").unwrap();
        assert_eq!(s, CategoryRef::from("Food"));
    }
}
