//! Totals and remaining balance
//!
//! An absent profile counts as all-zero everywhere. Nothing here clamps:
//! negative inputs are summed as given and a negative balance is reported
//! as negative.

use crate::models::{BudgetProfile, Expense, Money};

/// Sum of every fixed-expense line item of the profile
pub fn total_fixed_expenses(profile: Option<&BudgetProfile>) -> Money {
    profile
        .map(|p| p.fixed_expenses.items().map(|(_, amount)| amount).sum())
        .unwrap_or_default()
}

/// Sum of `amount` over all given expenses
pub fn total_variable_expenses(expenses: &[Expense]) -> Money {
    expenses.iter().map(|e| e.amount).sum()
}

/// Monthly income after savings, fixed expenses and variable expenses
pub fn remaining_balance(profile: Option<&BudgetProfile>, expenses: &[Expense]) -> Money {
    let (income, savings) = profile
        .map(|p| (p.monthly_income, p.mandatory_savings))
        .unwrap_or_default();

    income - savings - total_fixed_expenses(profile) - total_variable_expenses(expenses)
}
