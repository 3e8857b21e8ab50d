//! User settings for budget-tracker
//!
//! Manages display preferences and the defaults used by the CLI when
//! a flag is omitted.

use std::fmt::Write;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::BudgetPaths;
use crate::aggregate::DEFAULT_TREND_WINDOW;
use crate::error::BudgetError;

/// User settings for budget-tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// User id used when `--user` is not given
    #[serde(default = "default_user")]
    pub default_user: String,

    /// Number of months shown in the spending trend
    #[serde(default = "default_trend_window")]
    pub trend_window_months: u32,

    /// Number of rows in the dashboard's recent transactions list
    #[serde(default = "default_recent_limit")]
    pub recent_transactions_limit: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_user() -> String {
    "local".to_string()
}

fn default_trend_window() -> u32 {
    DEFAULT_TREND_WINDOW
}

fn default_recent_limit() -> usize {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_user: default_user(),
            trend_window_months: default_trend_window(),
            recent_transactions_limit: default_recent_limit(),
        }
    }
}

/// Check that `format` can render a calendar date
///
/// Unknown specifiers and time-of-day fields (`%H`) both fail here instead of
/// when an expense is printed.
pub fn validate_date_format(format: &str) -> Result<(), BudgetError> {
    let sample = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap_or_default();
    let mut rendered = String::new();

    write!(rendered, "{}", sample.format(format)).map_err(|_| {
        BudgetError::Config(format!(
            "Invalid date_format '{}' in settings file; use strftime date fields such as %Y-%m-%d",
            format
        ))
    })
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| BudgetError::Config(format!("Failed to parse settings file: {}", e)))?;

        validate_date_format(&settings.date_format)?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "₹");
        assert_eq!(settings.default_user, "local");
        assert_eq!(settings.trend_window_months, 6);
        assert_eq!(settings.recent_transactions_limit, 10);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            currency_symbol: "$".into(),
            trend_window_months: 12,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.trend_window_months, 12);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"default_user": "asha"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_user, "asha");
        assert_eq!(loaded.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_date_format_validation() {
        assert!(validate_date_format("%Y-%m-%d").is_ok());
        assert!(validate_date_format("%d %b %Y").is_ok());
        assert!(validate_date_format("%Q").is_err());
        assert!(validate_date_format("%Y-%m-%d %H:%M").is_err());
    }

    #[test]
    fn test_bad_date_format_is_rejected_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"date_format": "%Q"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, BudgetError::Config(_)));
        assert!(err.to_string().contains("%Q"));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, BudgetError::Config(_)));
    }
}
