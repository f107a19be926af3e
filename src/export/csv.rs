//! CSV export of expense records
//!
//! Columns match what `expense import` reads, so an export can be imported
//! into another data directory.

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::ExpenseRecord;
use crate::storage::Storage;

pub const RECORD_CSV_HEADER: [&str; 5] = ["id", "name", "cost", "type", "date"];

/// Write records as CSV in the given order
pub fn write_records_csv<W: Write>(records: &[ExpenseRecord], writer: W) -> ExpenseResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    let err = |e: csv::Error| ExpenseError::Export(e.to_string());

    out.write_record(RECORD_CSV_HEADER).map_err(err)?;
    for record in records {
        out.write_record([
            record.id.as_uuid().to_string(),
            record.name.clone(),
            record.cost.format_with_symbol(""),
            record.category.clone(),
            record.date.format("%Y-%m-%d").to_string(),
        ])
        .map_err(err)?;
    }

    out.flush().map_err(|e| ExpenseError::Export(e.to_string()))
}

/// Export every stored record, in insertion order
pub fn export_records_csv<W: Write>(storage: &Storage, writer: W) -> ExpenseResult<()> {
    write_records_csv(&storage.records.list_all()?, writer)
}
