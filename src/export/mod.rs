//! Export module
//!
//! - CSV: stored records, in the same column layout `expense import` reads
//! - JSON: full record export with schema version, and reports
//! - YAML: human-readable full export, and reports

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_records_csv, write_records_csv};
pub use json::{
    export_full_json, export_report_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION,
};
pub use yaml::{export_full_yaml, export_report_yaml, import_from_yaml};
