//! Reports module for budget-tracker
//!
//! The dashboard (cards, breakdown charts, recent expenses) and the
//! spending trend.

pub mod dashboard;
pub mod trend;

pub use dashboard::{ChartRow, DashboardReport, NO_EXPENSE_DATA};
pub use trend::TrendReport;
