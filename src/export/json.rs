//! JSON export
//!
//! Full record export with schema versioning, and machine-readable reports.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseRecord, Money};
use crate::reports::ExpenseReport;
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Every stored record plus export metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    /// Records in insertion order
    pub records: Vec<ExpenseRecord>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub record_count: usize,
    pub category_count: usize,
    pub total_cost: Money,
    pub earliest_record: Option<String>,
    pub latest_record: Option<String>,
}

impl FullExport {
    pub fn from_records(records: Vec<ExpenseRecord>) -> Self {
        let categories: HashSet<&str> = records.iter().map(|r| r.category.as_str()).collect();

        let metadata = ExportMetadata {
            record_count: records.len(),
            category_count: categories.len(),
            total_cost: records.iter().map(|r| r.cost).sum(),
            earliest_record: records.iter().map(|r| r.date).min().map(|d| d.to_string()),
            latest_record: records.iter().map(|r| r.date).max().map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            records,
            metadata,
        }
    }

    pub fn from_storage(storage: &Storage) -> ExpenseResult<Self> {
        Ok(Self::from_records(storage.records.list_all()?))
    }

    /// Check schema version and ID uniqueness
    ///
    /// Record contents are checked one by one when the export is imported.
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut seen = HashSet::new();
        for record in &self.records {
            if !seen.insert(record.id) {
                return Err(format!("Duplicate record id {}", record.id));
            }
        }

        Ok(())
    }
}

/// Write the full export as JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> ExpenseResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| ExpenseError::Export(e.to_string()))
}

/// Parse and validate a JSON export
pub fn import_from_json(json_str: &str) -> ExpenseResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| ExpenseError::Import(e.to_string()))?;
    export.validate().map_err(ExpenseError::Import)?;
    Ok(export)
}

/// Write a report as pretty JSON
pub fn export_report_json<W: Write>(report: &ExpenseReport, writer: &mut W) -> ExpenseResult<()> {
    serde_json::to_writer_pretty(&mut *writer, report)
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| ExpenseError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::ReportCriteria;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn seed(storage: &Storage) {
        for (name, cents, category, day) in [
            ("Coffee", 500, "Food", 3),
            ("Bus", 250, "Transport", 1),
            ("Lunch", 1200, "Food", 9),
        ] {
            storage
                .records
                .upsert(ExpenseRecord::new(name, Money::from_cents(cents), category, date(day)))
                .unwrap();
        }
    }

    #[test]
    fn test_full_export_metadata() {
        let (_temp, storage) = create_test_storage();
        seed(&storage);

        let export = FullExport::from_storage(&storage).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.records.len(), 3);
        assert_eq!(export.records[0].name, "Coffee");
        assert_eq!(export.metadata.category_count, 2);
        assert_eq!(export.metadata.total_cost, Money::from_cents(1950));
        assert_eq!(export.metadata.earliest_record.as_deref(), Some("2024-06-01"));
        assert_eq!(export.metadata.latest_record.as_deref(), Some("2024-06-09"));
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_json_export_reimports() {
        let (_temp, storage) = create_test_storage();
        seed(&storage);

        let mut buffer = Vec::new();
        export_full_json(&storage, &mut buffer, true).unwrap();

        let imported = import_from_json(&String::from_utf8(buffer).unwrap()).unwrap();
        assert_eq!(imported.records, storage.records.list_all().unwrap());
    }

    #[test]
    fn test_validate_rejects_duplicates_and_bad_version() {
        let record = ExpenseRecord::new("Tea", Money::from_cents(100), "Food", date(2));
        let mut export = FullExport::from_records(vec![record.clone(), record]);
        assert!(export.validate().unwrap_err().contains("Duplicate"));

        export.records.pop();
        export.schema_version = "0.1".to_string();
        assert!(export.validate().unwrap_err().contains("Schema version"));
    }

    #[test]
    fn test_report_json_fields() {
        let records = vec![
            ExpenseRecord::new("Coffee", Money::from_cents(500), "Food", date(3)),
            ExpenseRecord::new("Bus", Money::from_cents(250), "Transport", date(4)),
        ];
        let report = ExpenseReport::generate(&records, &ReportCriteria::new(date(1), date(30)));

        let mut buffer = Vec::new();
        export_report_json(&report, &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(value["total_expenses"], 750);
        assert_eq!(value["total_records"], 2);
        assert_eq!(value["most_expensive"]["name"], "Coffee");
    }
}
