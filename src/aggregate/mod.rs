//! Budget aggregation
//!
//! Pure functions that turn a user's profile and expenses into the figures
//! the dashboard shows. Nothing in this module touches storage or the clock;
//! the reference date for the trend is always passed in.

mod breakdown;
mod totals;
mod trend;

pub use breakdown::{
    category_breakdown, fixed_expense_breakdown, income_allocation, share_of_income,
    AllocationSlice, IncomeAllocation,
};
pub use totals::{remaining_balance, total_fixed_expenses, total_variable_expenses};
pub use trend::{monthly_trend, TrendBucket, DEFAULT_TREND_WINDOW};

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{BudgetProfile, Expense, ExpenseCategory, FixedExpenseItem, Money};

/// Every aggregate figure for one user, computed in one pass over the inputs
#[derive(Debug, Clone, Serialize)]
pub struct BudgetSummary {
    pub monthly_income: Money,
    pub allocation: IncomeAllocation,
    pub categories: BTreeMap<ExpenseCategory, Money>,
    pub fixed: BTreeMap<FixedExpenseItem, Money>,
    pub trend: Vec<TrendBucket>,
}

impl BudgetSummary {
    pub fn compute(
        profile: Option<&BudgetProfile>,
        expenses: &[Expense],
        reference_date: NaiveDate,
        window_months: u32,
    ) -> Self {
        Self {
            monthly_income: profile.map(|p| p.monthly_income).unwrap_or_default(),
            allocation: income_allocation(profile, expenses),
            categories: category_breakdown(expenses),
            fixed: fixed_expense_breakdown(profile),
            trend: monthly_trend(expenses, reference_date, window_months),
        }
    }

    pub fn remaining_balance(&self) -> Money {
        self.allocation.remaining_balance
    }

    /// True when there is nothing to chart: no profile figures and no spending
    pub fn is_empty(&self) -> bool {
        self.monthly_income.is_zero()
            && self.allocation.entries().iter().all(|(_, v)| v.is_zero())
            && self.categories.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use chrono::NaiveDate;

    use crate::models::{BudgetProfile, Expense, ExpenseCategory, Money, UserId};

    pub fn user() -> UserId {
        UserId::new("user_1").unwrap()
    }

    pub fn expense(units: i64, category: ExpenseCategory, (y, m, d): (i32, u32, u32)) -> Expense {
        Expense::new(
            user(),
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            Money::from_units(units),
            category,
        )
    }

    /// income 50000, savings 10000, fixed 15000/2000/1000/3000/3500
    pub fn scenario_profile() -> BudgetProfile {
        let mut profile = BudgetProfile::new(user(), "Asha");
        profile.monthly_income = Money::from_units(50000);
        profile.mandatory_savings = Money::from_units(10000);
        profile.fixed_expenses.rent = Money::from_units(15000);
        profile.fixed_expenses.electricity_bill = Money::from_units(2000);
        profile.fixed_expenses.furniture_rent = Money::from_units(1000);
        profile.fixed_expenses.grocery = Money::from_units(3000);
        profile.fixed_expenses.travel = Money::from_units(3500);
        profile
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{expense, scenario_profile};
    use super::*;

    #[test]
    fn test_summary_matches_individual_operations() {
        let profile = scenario_profile();
        let expenses = vec![
            expense(500, ExpenseCategory::Shopping, (2025, 1, 10)),
            expense(1200, ExpenseCategory::Entertainment, (2025, 1, 12)),
        ];
        let today = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();

        let summary = BudgetSummary::compute(Some(&profile), &expenses, today, 6);

        assert_eq!(summary.monthly_income, Money::from_units(50000));
        assert_eq!(summary.remaining_balance(), Money::from_units(13800));
        assert_eq!(summary.categories, category_breakdown(&expenses));
        assert_eq!(summary.fixed, fixed_expense_breakdown(Some(&profile)));
        assert_eq!(summary.trend.len(), 6);
        assert_eq!(summary.trend[5].total, Money::from_units(1700));
        assert!(!summary.is_empty());
    }

    #[test]
    fn test_summary_without_data_is_empty() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        let summary = BudgetSummary::compute(None, &[], today, DEFAULT_TREND_WINDOW);

        assert!(summary.is_empty());
        assert_eq!(summary.trend.len(), 6);
        assert_eq!(summary.fixed.len(), 5);
    }
}
