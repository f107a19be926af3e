//! Record import
//!
//! Reads raw expense records from JSON, YAML or CSV and stores the valid
//! ones. Full exports written by `expense export` are recognised by their
//! schema version. Malformed entries are skipped and reported, never fatal.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{Reader, StringRecord};
use serde_json::Value;

use crate::audit::AuditEntry;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{import_from_json, import_from_yaml, FullExport};
use crate::models::{ExpenseRecord, MalformedReason, MalformedRecord, RawRecord};
use crate::storage::Storage;

/// Source format of an import file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    Yaml,
    Csv,
}

impl ImportFormat {
    /// Guess the format from a file extension; unknown extensions are JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Raw entries read from a source, plus the ones that could not be read
#[derive(Debug, Default)]
pub struct RawBatch {
    /// Entries in source order, paired with their position
    pub records: Vec<(usize, RawRecord)>,
    /// Entries rejected before field parsing
    pub unreadable: Vec<MalformedRecord>,
}

impl RawBatch {
    /// Convert every entry, splitting valid records from malformed ones
    pub fn parse(&self) -> (Vec<ExpenseRecord>, Vec<MalformedRecord>) {
        let mut valid = Vec::new();
        let mut skipped = self.unreadable.clone();

        for (position, raw) in &self.records {
            match raw.parse(*position) {
                Ok(record) => valid.push(record),
                Err(malformed) => skipped.push(malformed),
            }
        }

        skipped.sort_by_key(|m| m.position);
        (valid, skipped)
    }

    pub fn len(&self) -> usize {
        self.records.len() + self.unreadable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&FullExport> for RawBatch {
    fn from(export: &FullExport) -> Self {
        Self {
            records: export.records.iter().map(RawRecord::from).enumerate().collect(),
            unreadable: Vec::new(),
        }
    }
}

fn unreadable(position: usize, detail: impl Into<String>) -> MalformedRecord {
    MalformedRecord {
        position,
        id: None,
        name: String::new(),
        reason: MalformedReason::Unreadable(detail.into()),
    }
}

fn read_text<R: Read>(mut reader: R) -> ExpenseResult<String> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|e| ExpenseError::Import(format!("Failed to read input: {}", e)))?;
    Ok(content)
}

/// Parse a JSON document holding raw records
///
/// Accepts a top-level array or an object with a `records` array. An object
/// carrying a `schema_version` is a full export, whose costs are in cents.
pub fn parse_json<R: Read>(reader: R) -> ExpenseResult<RawBatch> {
    let content = read_text(reader)?;
    let document: Value = serde_json::from_str(&content)
        .map_err(|e| ExpenseError::Import(format!("Invalid JSON: {}", e)))?;

    if document.get("schema_version").is_some() {
        return Ok(RawBatch::from(&import_from_json(&content)?));
    }

    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("records") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(ExpenseError::Import(
                    "Expected an array of records or an object with a \"records\" array".into(),
                ))
            }
        },
        _ => {
            return Err(ExpenseError::Import(
                "Expected an array of records".into(),
            ))
        }
    };

    let mut batch = RawBatch::default();
    for (position, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            batch
                .unreadable
                .push(unreadable(position, format!("expected an object, found {}", entry)));
            continue;
        }
        match serde_json::from_value::<RawRecord>(entry) {
            Ok(raw) => batch.records.push((position, raw)),
            Err(e) => batch.unreadable.push(unreadable(position, e.to_string())),
        }
    }
    Ok(batch)
}

/// Parse a YAML full export
pub fn parse_yaml<R: Read>(reader: R) -> ExpenseResult<RawBatch> {
    let content = read_text(reader)?;
    Ok(RawBatch::from(&import_from_yaml(&content)?))
}

/// Column positions resolved from a CSV header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvColumns {
    pub id: Option<usize>,
    pub name: usize,
    pub cost: usize,
    pub category: Option<usize>,
    pub date: usize,
}

impl CsvColumns {
    /// Resolve columns by header name (case-insensitive)
    ///
    /// `name`, `cost` and `date` are required; the category column may be
    /// called `type` or `category`, the id column `id` or `_id`.
    pub fn from_headers(headers: &StringRecord) -> ExpenseResult<Self> {
        let positions: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_ascii_lowercase(), i))
            .collect();

        let find = |names: &[&str]| names.iter().find_map(|n| positions.get(*n).copied());
        let require = |name: &str| {
            positions
                .get(name)
                .copied()
                .ok_or_else(|| ExpenseError::Import(format!("CSV is missing a '{}' column", name)))
        };

        Ok(Self {
            id: find(&["id", "_id"]),
            name: require("name")?,
            cost: require("cost")?,
            category: find(&["type", "category"]),
            date: require("date")?,
        })
    }

    fn raw_record(&self, row: &StringRecord) -> RawRecord {
        let field = |i: usize| row.get(i).unwrap_or("").trim();
        RawRecord::from_text(
            self.id.map(field),
            field(self.name),
            field(self.cost),
            self.category.map(field).unwrap_or(""),
            field(self.date),
        )
    }
}

/// Parse CSV with a header row into raw records
pub fn parse_csv<R: Read>(reader: R) -> ExpenseResult<RawBatch> {
    let mut reader = Reader::from_reader(reader);
    let headers = reader
        .headers()
        .map_err(|e| ExpenseError::Import(format!("Failed to read CSV header: {}", e)))?
        .clone();
    let columns = CsvColumns::from_headers(&headers)?;

    let mut batch = RawBatch::default();
    for (position, row) in reader.records().enumerate() {
        match row {
            Ok(row) => batch.records.push((position, columns.raw_record(&row))),
            Err(e) => batch.unreadable.push(unreadable(position, e.to_string())),
        }
    }
    Ok(batch)
}

/// Read raw records from a file, choosing the parser by extension
pub fn read_raw_file(path: &Path) -> ExpenseResult<RawBatch> {
    let file = File::open(path)
        .map_err(|e| ExpenseError::Import(format!("Failed to open {}: {}", path.display(), e)))?;
    let reader = BufReader::new(file);

    match ImportFormat::from_path(path) {
        ImportFormat::Csv => parse_csv(reader),
        ImportFormat::Json => parse_json(reader),
        ImportFormat::Yaml => parse_yaml(reader),
    }
}

/// Result of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Records added to the store
    pub imported: Vec<ExpenseRecord>,
    /// Records whose ID was already present
    pub duplicates_skipped: usize,
    /// Entries rejected as malformed
    pub skipped: Vec<MalformedRecord>,
}

/// Service for importing records into storage
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import a file of raw records
    pub fn import_file(&self, path: &Path) -> ExpenseResult<ImportResult> {
        let batch = read_raw_file(path)?;
        self.import_batch(&batch)
    }

    /// Store every valid record of a batch that is not already present
    ///
    /// Records without an identifier get a deterministic one, so importing
    /// the same file twice does not duplicate them.
    pub fn import_batch(&self, batch: &RawBatch) -> ExpenseResult<ImportResult> {
        let (valid, skipped) = batch.parse();
        let mut result = ImportResult {
            skipped,
            ..Default::default()
        };

        let mut entries = Vec::new();
        for record in valid {
            if self.storage.records.get(record.id)?.is_some() {
                result.duplicates_skipped += 1;
                continue;
            }
            self.storage.records.upsert(record.clone())?;
            entries.push(AuditEntry::create(
                record.id.to_string(),
                Some(format!("{} {} (imported)", record.date, record.name)),
                &record,
            ));
            result.imported.push(record);
        }

        if !result.imported.is_empty() {
            self.storage.records.save()?;
            self.storage.audit().log_batch(&entries)?;
        }

        Ok(result)
    }
}
