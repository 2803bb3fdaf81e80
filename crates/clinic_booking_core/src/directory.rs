//! crates/clinic_booking_core/src/directory.rs
//!
//! The immutable provider directory and its search rules.

use crate::domain::Provider;
use std::collections::HashSet;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Provider name '{0}' appears more than once in the directory")]
    DuplicateProvider(String),
    #[error("Provider '{0}' has a zero fee")]
    InvalidFee(String),
}

/// The provider list loaded at startup, plus the categories derived from it.
#[derive(Debug, Clone)]
pub struct Directory {
    providers: Vec<Provider>,
    categories: Vec<String>,
}

impl Directory {
    /// Builds the directory, rejecting ambiguous identities and non-positive fees.
    pub fn new(providers: Vec<Provider>) -> Result<Self, DirectoryError> {
        let mut seen_names = HashSet::new();
        let mut seen_categories = HashSet::new();
        let mut categories = Vec::new();

        for provider in &providers {
            if !seen_names.insert(provider.name.as_str()) {
                return Err(DirectoryError::DuplicateProvider(provider.name.clone()));
            }
            if provider.fee == 0 {
                return Err(DirectoryError::InvalidFee(provider.name.clone()));
            }
            if seen_categories.insert(provider.specialty.as_str()) {
                categories.push(provider.specialty.clone());
            }
        }

        Ok(Self {
            providers,
            categories,
        })
    }

    pub fn all(&self) -> &[Provider] {
        &self.providers
    }

    /// Distinct specialties in order of first appearance.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn find(&self, name: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.name == name)
    }

    /// Filters providers by a case-insensitive substring of name or specialty,
    /// and by exact specialty when `category` is non-empty. Directory order is kept.
    pub fn search(&self, query: &str, category: &str) -> Vec<Provider> {
        let needle = query.to_lowercase();
        self.providers
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.specialty.to_lowercase().contains(&needle)
            })
            .filter(|p| category.is_empty() || p.specialty == category)
            .cloned()
            .collect()
    }
}
