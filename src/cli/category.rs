//! CLI commands for categories

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_category_summaries;
use crate::error::ExpenseResult;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List categories in use with record counts and totals
    #[command(alias = "ls")]
    List {
        /// Print only the labels, one per line
        #[arg(long)]
        names: bool,
    },
}

/// Handle category commands
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> ExpenseResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List { names: true } => {
            for name in service.names()? {
                println!("{}", name);
            }
        }
        CategoryCommands::List { names: false } => {
            let summaries = service.summaries()?;
            println!(
                "{}",
                format_category_summaries(&summaries, &settings.currency_symbol)
            );
        }
    }

    Ok(())
}
