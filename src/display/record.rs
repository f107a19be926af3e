//! Expense record display formatting
//!
//! Formats records for terminal output in table and detail views.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{ExpenseRecord, Money};

use super::format_date;

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Cost")]
    cost: String,
}

/// Format a list of records as a table with a total line
pub fn format_record_list(records: &[ExpenseRecord], currency: &str, date_format: &str) -> String {
    if records.is_empty() {
        return "No expense records found.".to_string();
    }

    let rows = records.iter().map(|r| RecordRow {
        id: r.id.to_string(),
        date: format_date(r.date, date_format),
        name: r.name.clone(),
        category: r.category.clone(),
        cost: r.cost.format_with_symbol(currency),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::last()).with(Alignment::right()));

    let total: Money = records.iter().map(|r| r.cost).sum();
    format!(
        "{}\n\n{} record(s), total {}",
        table,
        records.len(),
        total.format_with_symbol(currency)
    )
}

/// Format a single record's details
pub fn format_record_details(record: &ExpenseRecord, currency: &str, date_format: &str) -> String {
    let category = if record.category.is_empty() {
        "(none)"
    } else {
        record.category.as_str()
    };
    format!(
        "ID:       {}\nName:     {}\nCost:     {}\nCategory: {}\nDate:     {}\n",
        record.id.as_uuid(),
        record.name,
        record.cost.format_with_symbol(currency),
        category,
        format_date(record.date, date_format)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> ExpenseRecord {
        ExpenseRecord::new(
            "Coffee",
            Money::from_cents(525),
            "Food",
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        )
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_record_list(&[], "$", "%Y-%m-%d"), "No expense records found.");
    }

    #[test]
    fn test_record_list() {
        let record = sample();
        let output = format_record_list(&[record.clone()], "$", "%d.%m.%Y");

        assert!(output.contains("Coffee"));
        assert!(output.contains("Food"));
        assert!(output.contains("05.01.2024"));
        assert!(output.contains(&record.id.to_string()));
        assert!(output.contains("1 record(s), total $5.25"));
    }

    #[test]
    fn test_record_details() {
        let record = sample();
        let output = format_record_details(&record, "€", "%Y-%m-%d");

        assert!(output.contains("Cost:     €5.25"));
        assert!(output.contains("Category: Food"));
        assert!(output.contains(&record.id.as_uuid().to_string()));
    }
}
