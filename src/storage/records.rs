//! Expense record repository
//!
//! Keeps records in memory keyed by ID and persists them to `records.json`.
//! Insertion order is preserved on disk and through `list_all`, so reports
//! built from storage see records in the order they were logged.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseRecord, RecordId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Default, Serialize, Deserialize)]
struct RecordData {
    records: Vec<ExpenseRecord>,
}

#[derive(Default)]
struct RecordIndex {
    records: HashMap<RecordId, ExpenseRecord>,
    /// Insertion order
    order: Vec<RecordId>,
    /// category -> record ids
    by_category: HashMap<String, Vec<RecordId>>,
}

impl RecordIndex {
    fn insert(&mut self, record: ExpenseRecord) {
        let id = record.id;
        if let Some(previous) = self.records.get(&id) {
            let previous_category = previous.category.clone();
            self.unindex_category(&previous_category, id);
        } else {
            self.order.push(id);
        }
        self.by_category
            .entry(record.category.clone())
            .or_default()
            .push(id);
        self.records.insert(id, record);
    }

    fn remove(&mut self, id: RecordId) -> Option<ExpenseRecord> {
        let record = self.records.remove(&id)?;
        self.order.retain(|other| *other != id);
        self.unindex_category(&record.category, id);
        Some(record)
    }

    fn unindex_category(&mut self, category: &str, id: RecordId) {
        if let Some(ids) = self.by_category.get_mut(category) {
            ids.retain(|other| *other != id);
            if ids.is_empty() {
                self.by_category.remove(category);
            }
        }
    }

    fn in_order(&self) -> Vec<ExpenseRecord> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id).cloned())
            .collect()
    }
}

/// Newest first; ties keep insertion order
fn sort_newest_first(records: &mut [ExpenseRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Repository for expense record persistence
pub struct RecordRepository {
    path: PathBuf,
    index: RwLock<RecordIndex>,
}

impl RecordRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            index: RwLock::new(RecordIndex::default()),
        }
    }

    fn read(&self) -> ExpenseResult<RwLockReadGuard<'_, RecordIndex>> {
        self.index
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> ExpenseResult<RwLockWriteGuard<'_, RecordIndex>> {
        self.index
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load records from disk, replacing anything held in memory
    pub fn load(&self) -> ExpenseResult<()> {
        let file_data: RecordData = read_json(&self.path)?;

        let mut index = self.write()?;
        *index = RecordIndex::default();
        for record in file_data.records {
            index.insert(record);
        }
        Ok(())
    }

    /// Save records to disk in insertion order
    pub fn save(&self) -> ExpenseResult<()> {
        let records = self.read()?.in_order();
        write_json_atomic(&self.path, &RecordData { records })
    }

    pub fn get(&self, id: RecordId) -> ExpenseResult<Option<ExpenseRecord>> {
        Ok(self.read()?.records.get(&id).cloned())
    }

    /// Find a record by full UUID or short display prefix
    ///
    /// Ambiguous prefixes are a validation error.
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<ExpenseRecord>> {
        let index = self.read()?;
        let mut matches = index
            .order
            .iter()
            .filter_map(|id| index.records.get(id))
            .filter(|record| record.id.matches(identifier));

        let first = matches.next().cloned();
        if first.is_some() && matches.next().is_some() {
            return Err(ExpenseError::Validation(format!(
                "Identifier '{}' matches more than one record",
                identifier
            )));
        }
        Ok(first)
    }

    /// All records in insertion order
    pub fn list_all(&self) -> ExpenseResult<Vec<ExpenseRecord>> {
        Ok(self.read()?.in_order())
    }

    /// All records, newest first
    pub fn get_all(&self) -> ExpenseResult<Vec<ExpenseRecord>> {
        let mut records = self.list_all()?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    /// Records with exactly this category label, newest first
    pub fn get_by_category(&self, category: &str) -> ExpenseResult<Vec<ExpenseRecord>> {
        let index = self.read()?;
        let mut records: Vec<_> = index
            .by_category
            .get(category)
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|id| index.records.get(id).cloned())
            .collect();
        // by_category ids are not kept in insertion order after updates
        let positions: HashMap<RecordId, usize> =
            index.order.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        records.sort_by_key(|r| positions.get(&r.id).copied());
        sort_newest_first(&mut records);
        Ok(records)
    }

    /// Distinct category labels with their record counts, sorted by label
    pub fn categories(&self) -> ExpenseResult<Vec<(String, usize)>> {
        let index = self.read()?;
        let mut categories: Vec<_> = index
            .by_category
            .iter()
            .map(|(name, ids)| (name.clone(), ids.len()))
            .collect();
        categories.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(categories)
    }

    /// Insert or replace a record; replacing keeps its original position
    pub fn upsert(&self, record: ExpenseRecord) -> ExpenseResult<()> {
        self.write()?.insert(record);
        Ok(())
    }

    /// Remove a record, returning it if it existed
    pub fn delete(&self, id: RecordId) -> ExpenseResult<Option<ExpenseRecord>> {
        Ok(self.write()?.remove(id))
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        Ok(self.read()?.records.len())
    }
}
