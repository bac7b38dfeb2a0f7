//! Raw upstream record shapes
//!
//! The HTTP backend that produces these records is loose about field names:
//! expenses use `montant` or `amount`, `dateTransaction` or `date`, and the
//! category reference may be an id or a name under several keys. Every
//! alias is accepted here and converted into the typed models.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::{Category, CategoryRef, RawAmount, Transaction, TransactionKind};

/// Record identifier as sent by the backend (number or string)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Numeric(serde_json::Number),
    Text(String),
}

impl RecordId {
    fn as_key(&self) -> String {
        match self {
            Self::Numeric(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// An expense as fetched from the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<RecordId>,

    #[serde(default, alias = "montant")]
    pub amount: RawAmount,

    #[serde(default, alias = "dateTransaction", deserialize_with = "lenient")]
    pub date: Option<String>,

    #[serde(
        default,
        alias = "category",
        alias = "categoryRef",
        alias = "categorieId",
        alias = "categoryId",
        deserialize_with = "lenient"
    )]
    pub categorie: Option<CategoryRef>,

    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
}

/// A revenue as fetched from the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<RecordId>,

    #[serde(default, alias = "montant")]
    pub amount: RawAmount,

    #[serde(default, alias = "dateTransaction", deserialize_with = "lenient")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
}

/// A category as fetched from the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: RecordId,

    #[serde(default, deserialize_with = "lenient")]
    pub categorie: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub nom: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub label: Option<String>,

    #[serde(default, rename = "budgetDebutMois", alias = "budgetLimit", alias = "budget")]
    pub budget: RawAmount,
}

impl ExpenseRecord {
    /// Convert into a cleaned transaction; `fallback_id` is used when the record has no id
    pub fn into_transaction(self, fallback_id: usize) -> Transaction {
        let id = self
            .id
            .map(|id| id.as_key())
            .unwrap_or_else(|| format!("expense-{}", fallback_id));

        let mut txn = Transaction::new(
            id,
            TransactionKind::Expense,
            self.date.as_deref().and_then(parse_date),
            self.amount.normalize(),
        );
        txn.category_ref = self.categorie;
        txn.description = self.description;
        txn
    }
}

impl RevenueRecord {
    /// Convert into a cleaned transaction; `fallback_id` is used when the record has no id
    pub fn into_transaction(self, fallback_id: usize) -> Transaction {
        let id = self
            .id
            .map(|id| id.as_key())
            .unwrap_or_else(|| format!("revenue-{}", fallback_id));

        let mut txn = Transaction::new(
            id,
            TransactionKind::Revenue,
            self.date.as_deref().and_then(parse_date),
            self.amount.normalize(),
        );
        txn.description = self.description;
        txn
    }
}

impl CategoryRecord {
    /// Convert into a category; a zero budget means no limit
    pub fn into_category(self) -> Category {
        let budget = self.budget.normalize();
        Category {
            id: self.id.as_key(),
            name: self.name,
            categorie: self.categorie,
            nom: self.nom,
            label: self.label,
            budget_limit: (budget > 0.0).then_some(budget),
        }
    }
}

/// Deserialize an optional field, turning a value of the wrong shape into `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Parse the date formats seen in upstream data
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (the date part in the
/// timestamp's own offset is used), naive `YYYY-MM-DDTHH:MM:SS[.f]` and
/// `DD/MM/YYYY`. Anything else is `None`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
}
