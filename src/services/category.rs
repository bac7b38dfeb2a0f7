//! Category resolution
//!
//! Transactions point at their category inconsistently: by numeric id, by
//! string id, by the category's name, or by a free-text name that matches no
//! category at all. Resolution walks an ordered list of strategies and falls
//! back to [`UNCATEGORIZED`].

use std::collections::BTreeMap;

use crate::models::{Category, CategoryRef, UNCATEGORIZED};

/// One step of the resolution chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStrategy {
    /// The reference equals a category id (compared as strings)
    IdMatch,
    /// The reference equals any name attribute of a category
    NameMatch,
    /// The reference is a non-empty string and is used verbatim
    LiteralReference,
}

impl ResolveStrategy {
    /// The standard chain: id, then name, then the literal text
    pub fn default_chain() -> Vec<Self> {
        vec![Self::IdMatch, Self::NameMatch, Self::LiteralReference]
    }
}

/// Resolves category references against a category collection
#[derive(Debug, Clone)]
pub struct CategoryResolver<'a> {
    categories: &'a [Category],
    strategies: Vec<ResolveStrategy>,
}

impl<'a> CategoryResolver<'a> {
    /// Create a resolver with the standard strategy chain
    pub fn new(categories: &'a [Category]) -> Self {
        Self::with_strategies(categories, ResolveStrategy::default_chain())
    }

    /// Create a resolver with a custom strategy chain
    pub fn with_strategies(categories: &'a [Category], strategies: Vec<ResolveStrategy>) -> Self {
        Self {
            categories,
            strategies,
        }
    }

    /// The categories this resolver looks in
    pub fn categories(&self) -> &'a [Category] {
        self.categories
    }

    /// Resolve a reference to a display name
    pub fn resolve(&self, reference: Option<&CategoryRef>) -> String {
        let Some(reference) = reference else {
            return UNCATEGORIZED.to_string();
        };

        self.strategies
            .iter()
            .find_map(|strategy| self.apply(*strategy, reference))
            .unwrap_or_else(|| UNCATEGORIZED.to_string())
    }

    fn apply(&self, strategy: ResolveStrategy, reference: &CategoryRef) -> Option<String> {
        match strategy {
            ResolveStrategy::IdMatch => {
                let key = reference.as_key();
                self.find_by_id(&key).map(|c| c.display_name().to_string())
            }
            ResolveStrategy::NameMatch => {
                let key = reference.as_key();
                self.find_by_name(&key).map(|c| c.display_name().to_string())
            }
            ResolveStrategy::LiteralReference => reference.literal().map(str::to_string),
        }
    }

    /// Find a category by id (string comparison)
    pub fn find_by_id(&self, id: &str) -> Option<&'a Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Find a category where any name attribute matches exactly
    pub fn find_by_name(&self, name: &str) -> Option<&'a Category> {
        self.categories
            .iter()
            .find(|c| c.names().any(|n| n == name))
    }

    /// Configured budget limits keyed by display name
    pub fn budget_limits(&self) -> BTreeMap<String, f64> {
        self.categories
            .iter()
            .filter_map(|c| c.limit().map(|l| (c.display_name().to_string(), l)))
            .collect()
    }
}
