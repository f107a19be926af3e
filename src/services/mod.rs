//! Service layer
//!
//! Business logic on top of the storage layer: validation, persistence and
//! audit logging of record changes, category queries and imports.

pub mod category;
pub mod import;
pub mod record;

pub use category::{CategoryService, CategorySummary};
pub use import::{read_raw_file, ImportFormat, ImportResult, ImportService, RawBatch};
pub use record::{CreateRecordInput, RecordFilter, RecordService, UpdateRecordInput};
