//! Report criteria
//!
//! An immutable description of which records a report covers: an inclusive
//! calendar date range and an optional category.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::ExpenseRecord;

/// Filter applied to records before aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportCriteria {
    /// First date included
    pub start_date: NaiveDate,
    /// Last date included
    pub end_date: NaiveDate,
    /// Only records with exactly this category; `None` means all categories
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ReportCriteria {
    /// Criteria covering all categories in the given range
    ///
    /// A start after the end is allowed and simply matches nothing.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            category: None,
        }
    }

    /// Criteria for a single day
    pub fn single_day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// Criteria spanning the earliest to the latest record date
    ///
    /// Returns `None` when there are no records.
    pub fn spanning(records: &[ExpenseRecord]) -> Option<Self> {
        let earliest = records.iter().map(|r| r.date).min()?;
        let latest = records.iter().map(|r| r.date).max()?;
        Some(Self::new(earliest, latest))
    }

    /// Restrict to one category; an empty label clears the filter
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = if category.is_empty() {
            None
        } else {
            Some(category)
        };
        self
    }

    /// The active category filter, if any
    pub fn category_filter(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    /// Check whether a record falls inside these criteria
    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        let in_range = record.date >= self.start_date && record.date <= self.end_date;
        let category_ok = match self.category_filter() {
            Some(category) => record.category == category,
            None => true,
        };
        in_range && category_ok
    }
}

impl fmt::Display for ReportCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start_date, self.end_date)?;
        if let Some(category) = self.category_filter() {
            write!(f, " ({})", category)?;
        }
        Ok(())
    }
}
