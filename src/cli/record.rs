//! CLI commands for expense records

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_date, format_record_details, format_record_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::services::{CreateRecordInput, RecordFilter, RecordService, UpdateRecordInput};
use crate::storage::Storage;

use super::{parse_date_arg, parse_money_arg, parse_optional_date};

/// Record subcommands
#[derive(Subcommand, Debug)]
pub enum RecordCommands {
    /// Log a new expense
    Add {
        /// Item name
        name: String,
        /// Cost, e.g. 12.50
        cost: String,
        /// Category label (defaults to the configured default category)
        #[arg(short = 't', long = "type")]
        category: Option<String>,
        /// Date of the purchase (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List expenses, newest first
    #[command(alias = "ls")]
    List {
        /// Only this category
        #[arg(short = 't', long = "type")]
        category: Option<String>,
        /// Minimum cost
        #[arg(long)]
        min: Option<String>,
        /// Maximum cost
        #[arg(long)]
        max: Option<String>,
        /// Earliest date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,
        /// Latest date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,
        /// Number of records to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show one expense
    Show {
        /// Record ID (full UUID or exp-xxxxxxxx)
        id: String,
    },

    /// Change fields of an expense
    Edit {
        /// Record ID (full UUID or exp-xxxxxxxx)
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        cost: Option<String>,
        #[arg(short = 't', long = "type")]
        category: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Record ID (full UUID or exp-xxxxxxxx)
        id: String,
    },
}

/// Handle record commands
pub fn handle_record_command(
    storage: &Storage,
    settings: &Settings,
    cmd: RecordCommands,
) -> ExpenseResult<()> {
    let service = RecordService::new(storage).with_default_category(&settings.default_category);
    let currency = settings.currency_symbol.as_str();
    let date_format = settings.date_format.as_str();

    match cmd {
        RecordCommands::Add {
            name,
            cost,
            category,
            date,
        } => {
            let date = match date {
                Some(d) => parse_date_arg("record", &d)?,
                None => chrono::Local::now().date_naive(),
            };
            let record = service.create(CreateRecordInput {
                name,
                cost: parse_money_arg("cost", &cost)?,
                category,
                date,
            })?;

            println!("Added expense: {}", record.name);
            println!("  ID:       {}", record.id);
            println!("  Cost:     {}", record.cost.format_with_symbol(currency));
            println!("  Category: {}", record.category);
            println!("  Date:     {}", format_date(record.date, date_format));
        }

        RecordCommands::List {
            category,
            min,
            max,
            start,
            end,
            limit,
        } => {
            let filter = RecordFilter {
                category,
                min_cost: min.as_deref().map(|m| parse_money_arg("minimum cost", m)).transpose()?,
                max_cost: max.as_deref().map(|m| parse_money_arg("maximum cost", m)).transpose()?,
                start_date: parse_optional_date("start", start.as_deref())?,
                end_date: parse_optional_date("end", end.as_deref())?,
                limit: Some(limit),
            };
            let records = service.list(&filter)?;
            println!("{}", format_record_list(&records, currency, date_format));
        }

        RecordCommands::Show { id } => {
            let record = service.require(&id)?;
            print!("{}", format_record_details(&record, currency, date_format));
        }

        RecordCommands::Edit {
            id,
            name,
            cost,
            category,
            date,
        } => {
            let record = service.require(&id)?;
            let input = UpdateRecordInput {
                name,
                cost: cost.as_deref().map(|c| parse_money_arg("cost", c)).transpose()?,
                category,
                date: parse_optional_date("record", date.as_deref())?,
            };
            if input.is_empty() {
                return Err(ExpenseError::Validation(
                    "Nothing to change. Pass --name, --cost, --type or --date".into(),
                ));
            }

            let updated = service.update(record.id, input)?;
            println!("Updated expense: {}", updated.id);
            print!("{}", format_record_details(&updated, currency, date_format));
        }

        RecordCommands::Delete { id } => {
            let record = service.require(&id)?;
            let deleted = service.delete(record.id)?;
            println!("Deleted expense: {} ({})", deleted.name, deleted.id);
        }
    }

    Ok(())
}
