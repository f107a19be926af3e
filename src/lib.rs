//! Expense tracker - personal expense logging and reporting
//!
//! Records purchases (name, cost, category, date) in a local JSON store and
//! aggregates them into expense reports: totals, averages, per-category and
//! per-month breakdowns and the most and least expensive records.
//!
//! # Architecture
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Records, money, IDs and report criteria
//! - `storage`: JSON file storage layer
//! - `audit`: Append-only audit log of record changes
//! - `services`: Record CRUD, category queries and imports
//! - `reports`: The expense report aggregator
//! - `export`: CSV, JSON and YAML export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use expense_tracker::models::{ExpenseRecord, Money, ReportCriteria};
//! use expense_tracker::reports::ExpenseReport;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! let records = vec![
//!     ExpenseRecord::new("Coffee", Money::from_cents(500), "Food", day),
//!     ExpenseRecord::new("Bus", Money::from_cents(250), "Transport", day),
//! ];
//!
//! let report = ExpenseReport::generate(&records, &ReportCriteria::single_day(day));
//! assert_eq!(report.total_expenses, Money::from_cents(750));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
