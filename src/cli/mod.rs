//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer.

pub mod audit;
pub mod category;
pub mod export;
pub mod import;
pub mod record;
pub mod report;

pub use audit::{handle_audit_command, AuditArgs};
pub use category::{handle_category_command, CategoryCommands};
pub use export::{handle_export_command, ExportArgs};
pub use import::{handle_import_command, ImportArgs};
pub use record::{handle_record_command, RecordCommands};
pub use report::{handle_report_command, ReportArgs};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{parse_date, Money};

/// Parse a date argument, naming the argument in the error
pub(crate) fn parse_date_arg(label: &str, value: &str) -> ExpenseResult<NaiveDate> {
    parse_date(value.trim()).ok_or_else(|| {
        ExpenseError::Validation(format!(
            "Invalid {} date: {}. Use YYYY-MM-DD",
            label, value
        ))
    })
}

/// Parse an optional date argument
pub(crate) fn parse_optional_date(
    label: &str,
    value: Option<&str>,
) -> ExpenseResult<Option<NaiveDate>> {
    value.map(|v| parse_date_arg(label, v)).transpose()
}

/// Parse an amount argument such as `12.50` or `$1,200`
pub(crate) fn parse_money_arg(label: &str, value: &str) -> ExpenseResult<Money> {
    Money::parse(value)
        .map_err(|e| ExpenseError::Validation(format!("Invalid {}: {}", label, e)))
}

/// Create a buffered writer for an output file
pub(crate) fn create_output(path: &Path) -> ExpenseResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

pub(crate) fn flush_output<W: Write>(writer: &mut W) -> ExpenseResult<()> {
    writer
        .flush()
        .map_err(|e| ExpenseError::Export(format!("Failed to write output: {}", e)))
}
