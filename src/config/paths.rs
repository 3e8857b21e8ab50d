//! Path management for budget-tracker
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGET_TRACKER_DATA_DIR` environment variable (if set)
//! 2. The platform config directory for `budget-tracker`
//!    (`~/.config/budget-tracker` on Linux, `%APPDATA%\budget-tracker\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::BudgetError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "BUDGET_TRACKER_DATA_DIR";

/// Manages all paths used by budget-tracker
#[derive(Debug, Clone)]
pub struct BudgetPaths {
    base_dir: PathBuf,
}

impl BudgetPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, BudgetError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create BudgetPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to profiles.json
    pub fn profiles_file(&self) -> PathBuf {
        self.data_dir().join("profiles.json")
    }

    /// Get the path to expenses.json
    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), BudgetError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BudgetError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BudgetError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if budget-tracker has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, BudgetError> {
    ProjectDirs::from("", "", "budget-tracker")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| BudgetError::Config("Could not determine a home directory".into()))
}
