//! Expense record service
//!
//! Validation, persistence and audit logging for record CRUD.

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseRecord, Money, RecordId};
use crate::storage::Storage;

/// Category assigned when a record is created without one
pub const DEFAULT_CATEGORY: &str = "Other";

/// Service for expense record management
pub struct RecordService<'a> {
    storage: &'a Storage,
    default_category: String,
}

/// Options for filtering the record list
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Exact category label
    pub category: Option<String>,
    /// Inclusive lower bound on cost
    pub min_cost: Option<Money>,
    /// Inclusive upper bound on cost
    pub max_cost: Option<Money>,
    /// Inclusive start date
    pub start_date: Option<NaiveDate>,
    /// Inclusive end date
    pub end_date: Option<NaiveDate>,
    /// Maximum number of records to return
    pub limit: Option<usize>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn cost_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_cost = min;
        self.max_cost = max;
        self
    }

    pub fn date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check a record against every set condition
    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        self.category
            .as_deref()
            .map_or(true, |c| record.category == c)
            && self.min_cost.map_or(true, |min| record.cost >= min)
            && self.max_cost.map_or(true, |max| record.cost <= max)
            && self.start_date.map_or(true, |start| record.date >= start)
            && self.end_date.map_or(true, |end| record.date <= end)
    }
}

/// Input for creating a new record
#[derive(Debug, Clone)]
pub struct CreateRecordInput {
    pub name: String,
    pub cost: Money,
    pub category: Option<String>,
    pub date: NaiveDate,
}

/// Fields to change on an existing record; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct UpdateRecordInput {
    pub name: Option<String>,
    pub cost: Option<Money>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
}

impl UpdateRecordInput {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.cost.is_none() && self.category.is_none() && self.date.is_none()
    }
}

fn audit_label(record: &ExpenseRecord) -> Option<String> {
    Some(format!("{} {}", record.date, record.name))
}

/// Purchases cannot be logged ahead of the local date
fn ensure_not_future(date: NaiveDate) -> ExpenseResult<()> {
    let today = chrono::Local::now().date_naive();
    if date > today {
        return Err(ExpenseError::Validation(format!(
            "Date {} is in the future (today is {})",
            date, today
        )));
    }
    Ok(())
}

impl<'a> RecordService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            default_category: DEFAULT_CATEGORY.to_string(),
        }
    }

    /// Use a different category for records created without one
    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = category.into();
        self
    }

    /// Create, save and audit a new record
    pub fn create(&self, input: CreateRecordInput) -> ExpenseResult<ExpenseRecord> {
        let category = input
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| self.default_category.clone());

        let record = ExpenseRecord::new(input.name.trim(), input.cost, category, input.date);
        ensure_not_future(record.date)?;
        record
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.records.upsert(record.clone())?;
        self.storage.records.save()?;

        self.storage
            .log_create(record.id.to_string(), audit_label(&record), &record)?;

        Ok(record)
    }

    pub fn get(&self, id: RecordId) -> ExpenseResult<Option<ExpenseRecord>> {
        self.storage.records.get(id)
    }

    /// Find a record by full UUID or short `exp-` prefix
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<ExpenseRecord>> {
        if let Ok(id) = RecordId::parse(identifier.trim()) {
            return self.storage.records.get(id);
        }
        self.storage.records.find(identifier)
    }

    /// Like `find`, but a missing record is an error
    pub fn require(&self, identifier: &str) -> ExpenseResult<ExpenseRecord> {
        self.find(identifier)?
            .ok_or_else(|| ExpenseError::record_not_found(identifier))
    }

    /// List records matching `filter`, newest first
    pub fn list(&self, filter: &RecordFilter) -> ExpenseResult<Vec<ExpenseRecord>> {
        let mut records = match filter.category.as_deref() {
            Some(category) => self.storage.records.get_by_category(category)?,
            None => self.storage.records.get_all()?,
        };

        records.retain(|r| filter.matches(r));

        if let Some(limit) = filter.limit {
            records.truncate(limit);
        }

        Ok(records)
    }

    /// Apply changes to a record, then save and audit it
    pub fn update(&self, id: RecordId, input: UpdateRecordInput) -> ExpenseResult<ExpenseRecord> {
        let mut record = self
            .storage
            .records
            .get(id)?
            .ok_or_else(|| ExpenseError::record_not_found(id.to_string()))?;

        let before = record.clone();

        if let Some(name) = input.name {
            record.name = name.trim().to_string();
        }
        if let Some(cost) = input.cost {
            record.cost = cost;
        }
        if let Some(category) = input.category {
            record.category = category.trim().to_string();
        }
        if let Some(date) = input.date {
            ensure_not_future(date)?;
            record.date = date;
        }

        record
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        if record == before {
            return Ok(record);
        }

        self.storage.records.upsert(record.clone())?;
        self.storage.records.save()?;

        self.storage
            .log_update(record.id.to_string(), audit_label(&record), &before, &record)?;

        Ok(record)
    }

    /// Delete a record, returning what was removed
    pub fn delete(&self, id: RecordId) -> ExpenseResult<ExpenseRecord> {
        let record = self
            .storage
            .records
            .delete(id)?
            .ok_or_else(|| ExpenseError::record_not_found(id.to_string()))?;
        self.storage.records.save()?;

        self.storage
            .log_delete(record.id.to_string(), audit_label(&record), &record)?;

        Ok(record)
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        self.storage.records.count()
    }
}
