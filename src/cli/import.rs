//! CLI command for importing records

use std::path::PathBuf;

use clap::Args;

use crate::error::ExpenseResult;
use crate::services::ImportService;
use crate::storage::Storage;

/// Arguments of `expense import`
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON, YAML or CSV file of records (format chosen by extension)
    pub file: PathBuf,
}

/// Handle the import command
pub fn handle_import_command(storage: &Storage, args: ImportArgs) -> ExpenseResult<()> {
    let result = ImportService::new(storage).import_file(&args.file)?;

    println!(
        "Imported {} record(s) from {}",
        result.imported.len(),
        args.file.display()
    );
    if result.duplicates_skipped > 0 {
        println!("Skipped {} record(s) already present", result.duplicates_skipped);
    }
    if !result.skipped.is_empty() {
        println!("Skipped {} malformed record(s):", result.skipped.len());
        for malformed in &result.skipped {
            println!("  {}", malformed);
        }
    }

    Ok(())
}
