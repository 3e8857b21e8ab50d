//! Audit log of expense changes
//!
//! Expense creates and deletes are appended to `audit.log`, one JSON line
//! per change, carrying the expense as it was logged or removed. Profiles
//! are not audited: saving one overwrites it and nothing of the earlier
//! version is kept.

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
