//! YAML export
//!
//! Human-readable variants of the full export and of reports.

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::json::FullExport;
use crate::reports::ExpenseReport;
use crate::storage::Storage;

fn export_err(e: impl std::fmt::Display) -> ExpenseError {
    ExpenseError::Export(e.to_string())
}

/// Write the full export as YAML with a comment header
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> ExpenseResult<()> {
    let export = FullExport::from_storage(storage)?;

    writeln!(writer, "# Expense tracker export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(export_err)
}

/// Parse and validate a YAML export
pub fn import_from_yaml(yaml_str: &str) -> ExpenseResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| ExpenseError::Import(e.to_string()))?;
    export.validate().map_err(ExpenseError::Import)?;
    Ok(export)
}

/// Write a report as YAML
pub fn export_report_yaml<W: Write>(report: &ExpenseReport, writer: &mut W) -> ExpenseResult<()> {
    serde_yaml::to_writer(writer, report).map_err(export_err)
}
