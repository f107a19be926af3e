use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_tracker::cli::{
    handle_audit_command, handle_category_command, handle_export_command, handle_import_command,
    handle_record_command, handle_report_command, AuditArgs, CategoryCommands, ExportArgs,
    ImportArgs, RecordCommands, ReportArgs,
};
use expense_tracker::config::{paths::ExpensePaths, settings::Settings};
use expense_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Log personal expenses and report on where the money went",
    long_about = "Log purchases with a name, cost, category and date, then generate \
                  expense reports with totals, averages and per-category and \
                  per-month breakdowns."
)]
struct Cli {
    /// Directory holding config.json, the records and the audit log
    #[arg(long, global = true, env = "EXPENSE_TRACKER_DATA_DIR", value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add, list, edit and delete expenses
    #[command(subcommand, alias = "rec")]
    Record(RecordCommands),

    /// Generate an expense report
    Report(ReportArgs),

    /// Category queries
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Import records from a JSON or CSV file
    Import(ImportArgs),

    /// Export stored records
    Export(ExportArgs),

    /// Show recent changes from the audit log
    Audit(AuditArgs),

    /// Create the configuration file and data directory
    Init,

    /// Show or change configuration
    Config {
        /// Currency symbol used in output
        #[arg(long)]
        currency: Option<String>,
        /// Date format for record listings (strftime, e.g. %d/%m/%Y)
        #[arg(long)]
        date_format: Option<String>,
        /// Category for expenses added without one
        #[arg(long = "default-type")]
        default_category: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => ExpensePaths::with_base_dir(dir),
        None => ExpensePaths::new()?,
    };
    let mut settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Record(cmd)) => handle_record_command(&storage, &settings, cmd)?,
        Some(Commands::Report(args)) => handle_report_command(&storage, &settings, args)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, &settings, cmd)?,
        Some(Commands::Import(args)) => handle_import_command(&storage, args)?,
        Some(Commands::Export(args)) => handle_export_command(&storage, args)?,
        Some(Commands::Audit(args)) => handle_audit_command(&storage, args)?,
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("Already initialized at: {}", paths.base_dir().display());
            } else {
                settings.save(&paths)?;
                storage.save_all()?;
                println!("Initialized expense tracker at: {}", paths.base_dir().display());
                println!();
                println!("Add your first expense with:");
                println!("  expense record add Coffee 4.50 --type Food");
            }
        }
        Some(Commands::Config {
            currency,
            date_format,
            default_category,
        }) => {
            let changed =
                currency.is_some() || date_format.is_some() || default_category.is_some();
            if let Some(currency) = currency {
                settings.currency_symbol = currency;
            }
            if let Some(date_format) = date_format {
                settings.date_format = date_format;
            }
            if let Some(category) = default_category {
                settings.default_category = category;
            }
            if changed {
                settings.save(&paths)?;
                println!("Configuration saved.");
                println!();
            }

            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Records file:     {}", paths.records_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Date format:      {}", settings.date_format);
            println!("  Default category: {}", settings.default_category);
        }
        None => {
            println!("Expense tracker - log expenses and report on them");
            println!();
            println!("Run 'expense --help' for usage information.");
        }
    }

    Ok(())
}
