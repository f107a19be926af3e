//! CLI command for exporting stored records

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::error::ExpenseResult;
use crate::export::{export_full_json, export_full_yaml, export_records_csv, FullExport};
use crate::storage::Storage;

use super::{create_output, flush_output};

/// Export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Records only, importable with `expense import`
    Csv,
    /// Full export with metadata
    Json,
    /// Full export with metadata, human-readable
    Yaml,
}

/// Arguments of `expense export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path
    pub output: Option<PathBuf>,

    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Show what would be exported without writing anything
    #[arg(long)]
    pub info: bool,
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> ExpenseResult<()> {
    let path = match args.output {
        Some(path) if !args.info => path,
        output => {
            print_export_info(&FullExport::from_storage(storage)?);
            if output.is_none() {
                println!();
                println!("Pass an output file to write the export.");
            }
            return Ok(());
        }
    };

    let mut writer = create_output(&path)?;
    match args.format {
        ExportFormat::Csv => export_records_csv(storage, &mut writer)?,
        ExportFormat::Json => export_full_json(storage, &mut writer, !args.compact)?,
        ExportFormat::Yaml => export_full_yaml(storage, &mut writer)?,
    }
    flush_output(&mut writer)?;

    println!(
        "Exported {} record(s) to {}",
        storage.records.count()?,
        path.display()
    );
    Ok(())
}

fn print_export_info(export: &FullExport) {
    let meta = &export.metadata;
    println!("Export Information");
    println!("==================");
    println!("Schema version: {}", export.schema_version);
    println!("Records:        {}", meta.record_count);
    println!("Categories:     {}", meta.category_count);
    println!("Total cost:     {}", meta.total_cost);
    if let (Some(earliest), Some(latest)) = (&meta.earliest_record, &meta.latest_record) {
        println!("Date range:     {} to {}", earliest, latest);
    }
}
