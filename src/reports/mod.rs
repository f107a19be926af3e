//! Reports
//!
//! The expense report aggregates records matching a date range and optional
//! category into totals, averages and breakdowns.

pub mod expense;

pub use expense::{CategoryBreakdown, ExpenseReport, MonthlyTotal};
