//! CLI command for viewing the audit log

use clap::Args;

use crate::error::ExpenseResult;
use crate::storage::Storage;

/// Arguments of `expense audit`
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Number of most recent entries to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Handle the audit command
pub fn handle_audit_command(storage: &Storage, args: AuditArgs) -> ExpenseResult<()> {
    let entries = storage.audit().read_recent(args.limit)?;

    if entries.is_empty() {
        println!("Audit log is empty.");
        return Ok(());
    }

    for entry in entries.iter().rev() {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
