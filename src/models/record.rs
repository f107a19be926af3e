//! Expense record model
//!
//! An `ExpenseRecord` is one logged purchase: a name, a cost, a category
//! label and the calendar date it happened on. `RawRecord` is the loosely
//! typed shape records take in external stores and import files, where cost
//! and date are free-form; converting it either yields a valid record or a
//! `MalformedRecord` describing why it was rejected.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use super::ids::RecordId;
use super::money::Money;

/// Largest cost a single record may carry ($1,000,000,000.00)
pub const MAX_COST: Money = Money::from_cents(100_000_000_000);

/// A single logged expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Unique identifier
    pub id: RecordId,

    /// Item name (compared case-sensitively when counting unique items)
    pub name: String,

    /// Amount spent (never negative)
    pub cost: Money,

    /// Category label, an open set such as "Food" or "Transport"
    #[serde(rename = "type", default)]
    pub category: String,

    /// Calendar date of the purchase
    pub date: NaiveDate,
}

impl ExpenseRecord {
    /// Create a new record with a fresh ID
    pub fn new(
        name: impl Into<String>,
        cost: Money,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: RecordId::new(),
            name: name.into(),
            cost,
            category: category.into(),
            date,
        }
    }

    /// Year-month bucket of the record date (`YYYY-MM`)
    pub fn year_month(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// Validate the record
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.name.trim().is_empty() {
            return Err(RecordValidationError::MissingName);
        }
        if self.cost.is_negative() {
            return Err(RecordValidationError::NegativeCost(self.cost));
        }
        if self.cost > MAX_COST {
            return Err(RecordValidationError::CostTooLarge(self.cost));
        }
        Ok(())
    }
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.name,
            self.cost
        )
    }
}

/// Validation errors for expense records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    MissingName,
    NegativeCost(Money),
    CostTooLarge(Money),
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "Name field is required"),
            Self::NegativeCost(cost) => write!(f, "Cost cannot be negative: {}", cost),
            Self::CostTooLarge(cost) => {
                write!(f, "Cost {} exceeds the maximum of {}", cost, MAX_COST)
            }
        }
    }
}

impl std::error::Error for RecordValidationError {}

/// An expense record as found in an external store or import file
///
/// `cost` may be a JSON number or a string, `date` a `YYYY-MM-DD` string, an
/// RFC 3339 timestamp, or an extended-JSON `{"$date": ...}` wrapper. `id`
/// may be a UUID, any other string, or `{"$oid": ...}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default, alias = "_id", skip_serializing_if = "Value::is_null")]
    pub id: Value,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub cost: Value,

    #[serde(rename = "type", default)]
    pub category: String,

    #[serde(default)]
    pub date: Value,
}

impl RawRecord {
    /// Build a raw record from plain text fields (e.g. a CSV row)
    pub fn from_text(
        id: Option<&str>,
        name: &str,
        cost: &str,
        category: &str,
        date: &str,
    ) -> Self {
        Self {
            id: id
                .filter(|s| !s.trim().is_empty())
                .map(|s| Value::String(s.trim().to_string()))
                .unwrap_or(Value::Null),
            name: name.to_string(),
            cost: Value::String(cost.to_string()),
            category: category.to_string(),
            date: Value::String(date.to_string()),
        }
    }

    /// The foreign identifier, if the record carries one
    pub fn foreign_id(&self) -> Option<String> {
        match &self.id {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Object(map) => match map.get("$oid") {
                Some(Value::String(s)) => Some(s.clone()),
                _ => None,
            },
            _ => None,
        }
    }

    /// Convert into a validated `ExpenseRecord`
    ///
    /// `position` is the record's index in its source and is used for error
    /// reporting and, when the record has no identifier, for deriving one.
    pub fn parse(&self, position: usize) -> Result<ExpenseRecord, MalformedRecord> {
        let malformed = |reason: MalformedReason| MalformedRecord {
            position,
            id: self.foreign_id(),
            name: self.name.clone(),
            reason,
        };

        let cost = parse_cost(&self.cost).map_err(malformed)?;
        let date = parse_date_value(&self.date).map_err(malformed)?;

        let id = match self.foreign_id() {
            Some(foreign) => RecordId::from_foreign(&foreign),
            None => RecordId::from_foreign(&format!(
                "{}:{}:{}:{}:{}",
                position,
                self.name,
                cost.cents(),
                self.category,
                date
            )),
        };

        let record = ExpenseRecord {
            id,
            name: self.name.clone(),
            cost,
            category: self.category.clone(),
            date,
        };
        record.validate().map_err(|e| malformed(e.into()))?;
        Ok(record)
    }
}

impl From<&ExpenseRecord> for RawRecord {
    fn from(record: &ExpenseRecord) -> Self {
        Self {
            id: Value::String(record.id.as_uuid().to_string()),
            name: record.name.clone(),
            cost: Value::String(record.cost.format_with_symbol("")),
            category: record.category.clone(),
            date: Value::String(record.date.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Why a raw record could not be converted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MalformedReason {
    /// Cost is missing or not a number
    #[error("cost is not a valid amount: {0}")]
    InvalidCost(String),
    /// Cost parsed but is below zero
    #[error("cost is negative: {0}")]
    NegativeCost(String),
    /// Cost parsed but is above [`MAX_COST`]
    #[error("cost exceeds the maximum of {max}: {0}", max = MAX_COST)]
    CostTooLarge(String),
    /// Name is missing or blank
    #[error("name is missing")]
    MissingName,
    /// Date is missing or not a calendar date
    #[error("date is not a valid calendar date: {0}")]
    InvalidDate(String),
    /// The entry is not a record at all (wrong JSON shape, broken CSV row)
    #[error("entry could not be read: {0}")]
    Unreadable(String),
}

impl From<RecordValidationError> for MalformedReason {
    fn from(error: RecordValidationError) -> Self {
        match error {
            RecordValidationError::MissingName => Self::MissingName,
            RecordValidationError::NegativeCost(cost) => Self::NegativeCost(cost.to_string()),
            RecordValidationError::CostTooLarge(cost) => Self::CostTooLarge(cost.to_string()),
        }
    }
}

/// A raw record that was rejected during conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MalformedRecord {
    /// Index of the record in its source
    pub position: usize,
    /// Foreign identifier, if any
    pub id: Option<String>,
    /// Record name as found
    pub name: String,
    /// Reason for rejection
    pub reason: MalformedReason,
}

impl fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record #{}", self.position + 1)?;
        if let Some(id) = &self.id {
            write!(f, " ({})", id)?;
        }
        if !self.name.is_empty() {
            write!(f, " '{}'", self.name)?;
        }
        write!(f, ": {}", self.reason)
    }
}

impl std::error::Error for MalformedRecord {}

/// Parse a record date
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (the calendar date as written is
/// kept) and naive `YYYY-MM-DDTHH:MM:SS` timestamps.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "(missing)".to_string(),
        Value::String(s) if s.trim().is_empty() => "(empty)".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_cost(value: &Value) -> Result<Money, MalformedReason> {
    let cost = match value {
        Value::Number(n) => n.as_f64().and_then(Money::from_f64),
        Value::String(s) => Money::parse(s).ok(),
        _ => None,
    }
    .ok_or_else(|| MalformedReason::InvalidCost(describe(value)))?;

    if cost.is_negative() {
        return Err(MalformedReason::NegativeCost(describe(value)));
    }
    Ok(cost)
}

fn parse_date_value(value: &Value) -> Result<NaiveDate, MalformedReason> {
    let parsed = match value {
        Value::String(s) => parse_date(s),
        Value::Object(map) => match map.get("$date") {
            Some(Value::String(s)) => parse_date(s),
            _ => None,
        },
        _ => None,
    };
    parsed.ok_or_else(|| MalformedReason::InvalidDate(describe(value)))
}
