//! Category, fixed-expense and income-allocation breakdowns

use std::collections::BTreeMap;

use serde::Serialize;

use super::totals::{remaining_balance, total_fixed_expenses, total_variable_expenses};
use crate::models::{BudgetProfile, Expense, ExpenseCategory, FixedExpenseItem, Money};

/// Summed spending per category
///
/// Categories without expenses, or whose expenses cancel out to exactly
/// zero, have no entry. Map order carries no meaning; callers that display
/// the breakdown sort it themselves.
pub fn category_breakdown(expenses: &[Expense]) -> BTreeMap<ExpenseCategory, Money> {
    let mut totals: BTreeMap<ExpenseCategory, Money> = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category).or_default() += expense.amount;
    }
    totals.retain(|_, total| !total.is_zero());
    totals
}

/// Amount of each fixed-expense line item, zeros included
pub fn fixed_expense_breakdown(profile: Option<&BudgetProfile>) -> BTreeMap<FixedExpenseItem, Money> {
    FixedExpenseItem::ALL
        .into_iter()
        .map(|item| {
            let amount = profile
                .map(|p| p.fixed_expenses.get(item))
                .unwrap_or_default();
            (item, amount)
        })
        .collect()
}

/// Slices of the income-allocation chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum AllocationSlice {
    MandatorySavings,
    FixedExpenses,
    ExtraExpenses,
    RemainingBalance,
}

impl AllocationSlice {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MandatorySavings => "Mandatory Savings",
            Self::FixedExpenses => "Fixed Expenses",
            Self::ExtraExpenses => "Extra Expenses",
            Self::RemainingBalance => "Remaining Balance",
        }
    }
}

/// Four-way split of monthly income
///
/// The components are reported independently: when spending exceeds income
/// the remaining balance is negative and still reported, so the four always
/// add back up to the monthly income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct IncomeAllocation {
    pub mandatory_savings: Money,
    pub total_fixed_expenses: Money,
    pub total_variable_expenses: Money,
    pub remaining_balance: Money,
}

impl IncomeAllocation {
    /// All four slices, unfiltered
    pub fn entries(&self) -> [(AllocationSlice, Money); 4] {
        [
            (AllocationSlice::MandatorySavings, self.mandatory_savings),
            (AllocationSlice::FixedExpenses, self.total_fixed_expenses),
            (AllocationSlice::ExtraExpenses, self.total_variable_expenses),
            (AllocationSlice::RemainingBalance, self.remaining_balance),
        ]
    }

    /// Sum of the four slices
    pub fn total(&self) -> Money {
        self.entries().iter().map(|(_, amount)| *amount).sum()
    }
}

/// Split monthly income into savings, fixed, variable and remaining
pub fn income_allocation(profile: Option<&BudgetProfile>, expenses: &[Expense]) -> IncomeAllocation {
    IncomeAllocation {
        mandatory_savings: profile.map(|p| p.mandatory_savings).unwrap_or_default(),
        total_fixed_expenses: total_fixed_expenses(profile),
        total_variable_expenses: total_variable_expenses(expenses),
        remaining_balance: remaining_balance(profile, expenses),
    }
}

/// `value` as a percentage of `income`; None when income is zero
pub fn share_of_income(value: Money, income: Money) -> Option<f64> {
    if income.is_zero() {
        return None;
    }
    Some(value.cents() as f64 / income.cents() as f64 * 100.0)
}
