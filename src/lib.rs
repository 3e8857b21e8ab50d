//! budget-tracker - personal budget tracking for the terminal
//!
//! Each user keeps one budget profile (monthly income, mandatory savings and
//! a fixed set of recurring expenses) and a log of extra expenses. The crate
//! turns the two into dashboard figures: totals, an income allocation, a
//! per-category breakdown and a monthly spending trend.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: tracing subscriber setup
//! - `models`: Core data models (profiles, expenses, money, months)
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging system
//! - `services`: Business logic layer
//! - `aggregate`: Pure budget computations
//! - `reports`: Dashboard and trend reports
//! - `display`: Terminal formatting
//! - `export`: JSON, YAML and CSV export
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_tracker::config::{BudgetPaths, Settings};
//! use budget_tracker::reports::DashboardReport;
//!
//! let paths = BudgetPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! let report = DashboardReport::generate(&storage, &user, today, &settings)?;
//! ```

pub mod aggregate;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
