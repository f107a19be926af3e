//! Storage layer
//!
//! JSON file storage with atomic writes, plus the audit log that records
//! every mutation.

pub mod file_io;
pub mod records;

pub use file_io::{read_json, read_json_required, write_json_atomic};
pub use records::RecordRepository;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger};
use crate::config::paths::ExpensePaths;
use crate::error::ExpenseResult;
use crate::models::ExpenseRecord;

/// Anything that can hand over a full list of expense records
///
/// Report generation only needs read access to a record list, so the CLI,
/// tests and external loaders can all feed it through this trait.
pub trait RecordProvider {
    /// All records in their natural (insertion) order
    fn list_all(&self) -> ExpenseResult<Vec<ExpenseRecord>>;
}

impl RecordProvider for RecordRepository {
    fn list_all(&self) -> ExpenseResult<Vec<ExpenseRecord>> {
        RecordRepository::list_all(self)
    }
}

impl RecordProvider for [ExpenseRecord] {
    fn list_all(&self) -> ExpenseResult<Vec<ExpenseRecord>> {
        Ok(self.to_vec())
    }
}

impl RecordProvider for Vec<ExpenseRecord> {
    fn list_all(&self) -> ExpenseResult<Vec<ExpenseRecord>> {
        Ok(self.clone())
    }
}

/// Storage coordinator: record repository plus audit log
pub struct Storage {
    paths: ExpensePaths,
    pub records: RecordRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create storage rooted at `paths`, creating directories as needed
    pub fn new(paths: ExpensePaths) -> ExpenseResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            records: RecordRepository::new(paths.records_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&mut self) -> ExpenseResult<()> {
        self.records.load()
    }

    pub fn save_all(&self) -> ExpenseResult<()> {
        self.records.save()
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> ExpenseResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_id, entity_name, entity))
    }

    /// Log an update; the diff is computed from the two snapshots
    pub fn log_update<T: Serialize>(
        &self,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> ExpenseResult<()> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.audit.log(&AuditEntry::update(
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> ExpenseResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_id, entity_name, entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_storage();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_update_logs_diff() {
        let (_temp, storage) = create_storage();
        let before = ExpenseRecord::new(
            "Coffee",
            Money::from_cents(500),
            "Food",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        let mut after = before.clone();
        after.cost = Money::from_cents(550);

        storage
            .log_update(before.id.to_string(), Some("Coffee".into()), &before, &after)
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Update);
        assert_eq!(entries[0].diff_summary.as_deref(), Some("cost: 500 -> 550"));
    }

    #[test]
    fn test_slice_provider() {
        let records = vec![ExpenseRecord::new(
            "Bus",
            Money::from_cents(250),
            "Transport",
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        )];
        assert_eq!(records.as_slice().list_all().unwrap(), records);
    }
}
