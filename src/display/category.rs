//! Category display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::services::CategorySummary;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Records")]
    records: usize,
    #[tabled(rename = "Total")]
    total: String,
}

/// Format category summaries as a table
pub fn format_category_summaries(summaries: &[CategorySummary], currency: &str) -> String {
    if summaries.is_empty() {
        return "No categories yet. Add an expense with 'expense record add'.".to_string();
    }

    let rows = summaries.iter().map(|s| CategoryRow {
        name: if s.name.is_empty() {
            "(none)".to_string()
        } else {
            s.name.clone()
        },
        records: s.record_count,
        total: s.total.format_with_symbol(currency),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()));
    table.to_string()
}
