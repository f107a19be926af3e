//! CLI command for the expense report

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::config::settings::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_report_json, export_report_yaml};
use crate::models::{ExpenseRecord, ReportCriteria};
use crate::reports::ExpenseReport;
use crate::services::read_raw_file;
use crate::storage::{RecordProvider, Storage};

use super::{create_output, flush_output, parse_optional_date};

/// Report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable text with bar charts
    Terminal,
    Csv,
    Json,
    Yaml,
}

/// Arguments of `expense report`
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Start date (YYYY-MM-DD, default earliest record)
    #[arg(short, long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD, default latest record)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Only this category
    #[arg(short = 't', long = "type")]
    pub category: Option<String>,

    /// Aggregate a JSON, YAML or CSV file of raw records instead of stored records
    #[arg(long, value_name = "FILE")]
    pub from: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: ReportFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show only the N largest categories (terminal format)
    #[arg(long)]
    pub top: Option<usize>,
}

/// Build criteria from optional bounds, defaulting to the span of `records`
pub fn resolve_criteria(
    start: Option<chrono::NaiveDate>,
    end: Option<chrono::NaiveDate>,
    category: Option<String>,
    records: &[ExpenseRecord],
) -> ReportCriteria {
    let span = ReportCriteria::spanning(records);
    let today = chrono::Local::now().date_naive();

    let start = start
        .or_else(|| span.as_ref().map(|s| s.start_date))
        .unwrap_or(today);
    let end = end
        .or_else(|| span.as_ref().map(|s| s.end_date))
        .unwrap_or(today);

    ReportCriteria::new(start, end).with_category(category.unwrap_or_default())
}

fn build_report<P: RecordProvider + ?Sized>(
    provider: &P,
    start: Option<chrono::NaiveDate>,
    end: Option<chrono::NaiveDate>,
    category: Option<String>,
) -> ExpenseResult<ExpenseReport> {
    let records = provider.list_all()?;
    let criteria = resolve_criteria(start, end, category, &records);
    Ok(ExpenseReport::generate(&records, &criteria))
}

/// Handle the report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    args: ReportArgs,
) -> ExpenseResult<()> {
    let start = parse_optional_date("start", args.start.as_deref())?;
    let end = parse_optional_date("end", args.end.as_deref())?;

    let report = match &args.from {
        Some(path) => {
            let (records, skipped) = read_raw_file(path)?.parse();
            build_report(&records, start, end, args.category.clone())?.with_skipped(skipped)
        }
        None => build_report(&storage.records, start, end, args.category.clone())?,
    };

    match &args.output {
        Some(path) => {
            let mut writer = create_output(path)?;
            write_report(&report, &args, settings, &mut writer)?;
            flush_output(&mut writer)?;
            println!("Expense report written to: {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_report(&report, &args, settings, &mut writer)?;
            flush_output(&mut writer)?;
        }
    }

    Ok(())
}

fn write_report<W: Write>(
    report: &ExpenseReport,
    args: &ReportArgs,
    settings: &Settings,
    writer: &mut W,
) -> ExpenseResult<()> {
    let write_err = |e: std::io::Error| ExpenseError::Export(e.to_string());
    let currency = settings.currency_symbol.as_str();

    match args.format {
        ReportFormat::Terminal => match args.top {
            Some(n) => {
                writeln!(writer, "Top {} categories: {}\n", n, report.criteria).map_err(write_err)?;
                for category in report.top_categories(n) {
                    writeln!(
                        writer,
                        "{:<30} {:>12} {:>7.1}%",
                        category.category,
                        category.total.format_with_symbol(currency),
                        category.percentage
                    )
                    .map_err(write_err)?;
                }
                writeln!(
                    writer,
                    "\nTotal Expenses: {}",
                    report.total_expenses.format_with_symbol(currency)
                )
                .map_err(write_err)
            }
            None => write!(writer, "{}", report.format_terminal(currency)).map_err(write_err),
        },
        ReportFormat::Csv => report.export_csv(writer),
        ReportFormat::Json => export_report_json(report, writer),
        ReportFormat::Yaml => export_report_yaml(report, writer),
    }
}
