//! Storage layer for budget-tracker
//!
//! JSON file storage with atomic writes, plus the audit log expense changes
//! are recorded in.

pub mod expenses;
pub mod file_io;
pub mod profiles;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use profiles::ProfileRepository;

use crate::audit::{AuditEntry, AuditLogger, Operation};
use crate::config::paths::BudgetPaths;
use crate::error::BudgetError;
use crate::models::Expense;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BudgetPaths,
    audit: AuditLogger,
    pub profiles: ProfileRepository,
    pub expenses: ExpenseRepository,
}

impl Storage {
    /// Create a storage handle, creating the data directories if needed
    pub fn new(paths: BudgetPaths) -> Result<Self, BudgetError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            profiles: ProfileRepository::new(paths.profiles_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), BudgetError> {
        self.profiles.load()?;
        self.expenses.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), BudgetError> {
        self.profiles.save()?;
        self.expenses.save()?;
        Ok(())
    }

    /// Whether `budget init` has written a settings file
    pub fn is_initialized(&self) -> bool {
        self.paths.settings_file().exists()
    }

    /// Append an expense change to the audit log
    pub fn log_expense(&self, operation: Operation, expense: &Expense) -> Result<(), BudgetError> {
        self.audit.log(&AuditEntry::new(operation, expense))
    }
}
