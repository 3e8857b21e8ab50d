//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod export;
pub mod history;
pub mod profile;
pub mod report;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportArgs};
pub use history::handle_history_command;
pub use profile::{handle_profile_command, ProfileCommands};
pub use report::{handle_report_command, ReportCommands};

use chrono::NaiveDate;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{CalendarMonth, Money};

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` argument
pub fn parse_date(value: &str) -> BudgetResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        BudgetError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", value))
    })
}

/// Parse a `YYYY-MM` argument
pub fn parse_month(value: &str) -> BudgetResult<CalendarMonth> {
    CalendarMonth::parse(value).map_err(|e| {
        BudgetError::Validation(format!("Invalid month '{}': {}. Use YYYY-MM", value, e))
    })
}

/// Parse an amount argument such as `500`, `12.50` or `₹1,200`
pub fn parse_amount(value: &str) -> BudgetResult<Money> {
    Money::parse(value).map_err(|e| {
        BudgetError::Validation(format!(
            "Invalid amount format: '{}'. Use a number like '500' or '12.50'. Error: {}",
            value, e
        ))
    })
}

/// Reference date for reports: the last day of `month`, capped at `today`
pub fn reference_date(month: Option<&str>, today: NaiveDate) -> BudgetResult<NaiveDate> {
    match month {
        Some(m) => Ok(parse_month(m)?.end_date().min(today)),
        None => Ok(today),
    }
}
