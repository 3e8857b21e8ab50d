//! Expense model
//!
//! An expense is a discrete, user-logged spending event ("extra" expense)
//! with a category and a calendar date. Expenses are immutable once created;
//! the only lifecycle operation after creation is deletion.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{ExpenseId, UserId};
use super::money::{Money, MAX_AMOUNT};

/// Closed set of expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Entertainment,
    Shopping,
    Health,
    Education,
    Gift,
    Other,
}

impl ExpenseCategory {
    /// All categories, in form display order
    pub const ALL: [ExpenseCategory; 6] = [
        Self::Entertainment,
        Self::Shopping,
        Self::Health,
        Self::Education,
        Self::Gift,
        Self::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Gift => "Gift",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExpenseCategory {
    type Err = ExpenseValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ExpenseValidationError::UnknownCategory(s.to_string()))
    }
}

/// Earliest date accepted for an expense
pub fn earliest_expense_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// A logged expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    /// Owner of the expense
    pub user_id: UserId,

    /// Amount spent (positive = spend)
    pub amount: Money,

    pub category: ExpenseCategory,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Calendar date of the expense
    pub date: NaiveDate,

    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense with a fresh id
    pub fn new(user_id: UserId, date: NaiveDate, amount: Money, category: ExpenseCategory) -> Self {
        Self {
            id: ExpenseId::new(),
            user_id,
            amount,
            category,
            description: None,
            date,
            created_at: Utc::now(),
        }
    }

    /// Set the description; blank text clears it
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self
    }

    /// Validate the expense against the input-boundary rules
    ///
    /// `today` is supplied by the caller so validation stays clock-free.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_within_limit() {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }
        if self.date > today {
            return Err(ExpenseValidationError::FutureDate(self.date));
        }
        if self.date < earliest_expense_date() {
            return Err(ExpenseValidationError::DateTooEarly(self.date));
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.amount
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    FutureDate(NaiveDate),
    DateTooEarly(NaiveDate),
    UnknownCategory(String),
    AmountTooLarge(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FutureDate(d) => write!(f, "Expense date {} is in the future", d),
            Self::DateTooEarly(d) => write!(f, "Expense date {} is before 1900-01-01", d),
            Self::AmountTooLarge(a) => write!(
                f,
                "Amount {} exceeds the limit of {}",
                a, MAX_AMOUNT
            ),
            Self::UnknownCategory(c) => write!(
                f,
                "Unknown category '{}'. Expected one of: Entertainment, Shopping, Health, Education, Gift, Other",
                c
            ),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
