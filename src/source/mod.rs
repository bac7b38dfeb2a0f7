//! Snapshot input
//!
//! The engine never fetches data itself. A snapshot is whatever the backend
//! returned (expenses, revenues and categories) saved as JSON or YAML, and
//! this module turns it into cleaned, typed collections.

pub mod records;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TallyError, TallyResult};
use crate::models::{Category, Transaction};

pub use records::{parse_date, CategoryRecord, ExpenseRecord, RevenueRecord};

/// Raw collections as fetched from the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSnapshot {
    #[serde(default, alias = "depenses")]
    pub expenses: Vec<ExpenseRecord>,

    #[serde(default, alias = "revenus")]
    pub revenues: Vec<RevenueRecord>,

    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
}

/// Cleaned collections ready for the services
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Expenses followed by revenues
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
}

impl Snapshot {
    /// Load a snapshot file; the format is chosen by extension (json, yaml, yml)
    pub fn load(path: &Path) -> TallyResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            TallyError::Io(format!("Failed to read snapshot {}: {}", path.display(), e))
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        let raw: RawSnapshot = match extension.as_str() {
            "json" | "" => serde_json::from_str(&contents)?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)?,
            other => {
                return Err(TallyError::Snapshot(format!(
                    "Unsupported snapshot format '.{}' (expected .json, .yaml or .yml)",
                    other
                )))
            }
        };

        let snapshot = Self::from_raw(raw);
        debug!(
            path = %path.display(),
            transactions = snapshot.transactions.len(),
            categories = snapshot.categories.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Parse a snapshot from a JSON string
    pub fn from_json(json: &str) -> TallyResult<Self> {
        let raw: RawSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }

    /// Clean raw records
    pub fn from_raw(raw: RawSnapshot) -> Self {
        let expenses = raw
            .expenses
            .into_iter()
            .enumerate()
            .map(|(i, r)| r.into_transaction(i));
        let revenues = raw
            .revenues
            .into_iter()
            .enumerate()
            .map(|(i, r)| r.into_transaction(i));

        Self {
            transactions: expenses.chain(revenues).collect(),
            categories: raw
                .categories
                .into_iter()
                .map(CategoryRecord::into_category)
                .collect(),
        }
    }

    /// Number of transactions whose date could not be parsed
    pub fn undated_count(&self) -> usize {
        self.transactions.iter().filter(|t| t.date.is_none()).count()
    }
}
