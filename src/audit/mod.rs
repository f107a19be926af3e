//! Audit logging
//!
//! Every create, update and delete of an expense record is appended to a
//! JSONL audit log together with before/after snapshots.
//!
//! ```rust,ignore
//! use expense_tracker::audit::{generate_diff, AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(record.id.to_string(), Some(record.name.clone()), &record))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
