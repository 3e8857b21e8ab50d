//! Export module for budget-tracker
//!
//! - JSON and YAML: a user's profile and every expense, with metadata
//! - CSV: a user's expenses, spreadsheet-compatible

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_expenses_csv;
pub use json::{export_full_json, ExportMetadata, UserExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
