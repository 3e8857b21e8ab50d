//! Core data models for budget-tracker
//!
//! Budget profiles, logged expenses, and the value types they are built
//! from (ids, money, calendar months).

pub mod expense;
pub mod ids;
pub mod money;
pub mod month;
pub mod profile;

pub use expense::{Expense, ExpenseCategory, ExpenseValidationError};
pub use ids::{ExpenseId, ProfileId, UserId};
pub use money::{Money, MAX_AMOUNT};
pub use month::CalendarMonth;
pub use profile::{BudgetProfile, FixedExpenseItem, FixedExpenses, ProfileValidationError};
