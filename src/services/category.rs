//! Category service
//!
//! Categories are free-form labels on records; this service derives the set
//! of labels in use and per-label totals.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ExpenseResult;
use crate::models::Money;
use crate::storage::Storage;

/// Usage summary of one category label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub record_count: usize,
    pub total: Money,
}

/// Service for category queries
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Distinct category labels, sorted
    pub fn names(&self) -> ExpenseResult<Vec<String>> {
        Ok(self
            .storage
            .records
            .categories()?
            .into_iter()
            .map(|(name, _)| name)
            .collect())
    }

    /// Every label in use with its record count and total, sorted by label
    pub fn summaries(&self) -> ExpenseResult<Vec<CategorySummary>> {
        let mut by_name: BTreeMap<String, CategorySummary> = BTreeMap::new();

        for record in self.storage.records.list_all()? {
            let summary = by_name
                .entry(record.category.clone())
                .or_insert_with(|| CategorySummary {
                    name: record.category.clone(),
                    record_count: 0,
                    total: Money::zero(),
                });
            summary.record_count += 1;
            summary.total += record.cost;
        }

        Ok(by_name.into_values().collect())
    }
}
