//! Service layer for budget-tracker
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, per-user scoping and audit logging.

pub mod expense;
pub mod profile;

pub use expense::{CreateExpenseInput, ExpenseFilter, ExpenseService};
pub use profile::{ProfileInput, ProfileService};
