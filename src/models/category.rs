//! Category model
//!
//! Categories are used for two things only: turning a transaction's category
//! reference into a display name, and carrying the per-period budget limit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name used when a reference cannot be resolved
pub const UNCATEGORIZED: &str = "uncategorized";

/// A spending category
///
/// Upstream records name the category under different attributes depending
/// on which screen created them, so several name fields are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Category {
    /// Identifier (stringified)
    pub id: String,

    /// Primary name attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Legacy name attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categorie: Option<String>,

    /// Legacy name attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,

    /// Legacy name attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Spending limit per period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_limit: Option<f64>,
}

impl Category {
    /// Create a category with a primary name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Builder-style budget limit
    pub fn with_budget(mut self, limit: f64) -> Self {
        self.budget_limit = Some(limit);
        self
    }

    /// All non-blank name attributes, primary first
    pub fn names(&self) -> impl Iterator<Item = &str> {
        [&self.name, &self.categorie, &self.nom, &self.label]
            .into_iter()
            .filter_map(|n| n.as_deref())
            .filter(|n| !n.trim().is_empty())
    }

    /// The name shown to users
    pub fn display_name(&self) -> &str {
        self.names().next().unwrap_or(UNCATEGORIZED)
    }

    /// Budget limit when one is configured and positive
    pub fn limit(&self) -> Option<f64> {
        self.budget_limit.filter(|l| l.is_finite() && *l > 0.0)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
