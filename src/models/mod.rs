//! Core data models for the expense tracker
//!
//! This module contains the data structures of the expense domain: records,
//! their identifiers and amounts, and the criteria reports are built from.

pub mod criteria;
pub mod ids;
pub mod money;
pub mod record;

pub use criteria::ReportCriteria;
pub use ids::RecordId;
pub use money::{Money, MoneyParseError};
pub use record::{
    parse_date, ExpenseRecord, MalformedReason, MalformedRecord, RawRecord, RecordValidationError,
    MAX_COST,
};
