//! Display formatting for terminal output
//!
//! Tables and detail views for records and categories, plus the text
//! helpers the report renderer uses.

pub mod category;
pub mod record;
pub mod report;

pub use category::format_category_summaries;
pub use record::{format_record_details, format_record_list};

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

/// Format a date with a user-supplied strftime pattern
///
/// Falls back to `YYYY-MM-DD` when the pattern is invalid.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.is_empty() || items.contains(&Item::Error) {
        return date.format("%Y-%m-%d").to_string();
    }
    date.format_with_items(items.into_iter()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_date(date, "%Y-%m-%d"), "2024-03-07");
        assert_eq!(format_date(date, "%d/%m/%Y"), "07/03/2024");
        assert_eq!(format_date(date, "%Q"), "2024-03-07");
        assert_eq!(format_date(date, ""), "2024-03-07");
    }
}
