//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Expense, UserId};

/// What happened to the expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Create => "CREATE",
            Operation::Delete => "DELETE",
        })
    }
}

/// One recorded change to an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub user_id: UserId,
    pub expense: Expense,
}

impl AuditEntry {
    pub fn new(operation: Operation, expense: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            user_id: expense.user_id.clone(),
            expense: expense.clone(),
        }
    }

    /// `[2025-01-05 10:00:00 UTC] CREATE exp-… 2025-01-05 Shopping 500.00`
    pub fn format_human_readable(&self) -> String {
        format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.expense.id,
            self.expense
        )
    }
}
