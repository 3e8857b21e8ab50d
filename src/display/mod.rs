//! Display formatting for terminal output

pub mod expense;
pub mod profile;
pub mod report;

pub use expense::{format_expense_details, format_expense_table, format_recent_list, NO_TRANSACTIONS};
pub use profile::{format_profile_details, NO_PROFILE};
