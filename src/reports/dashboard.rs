//! Dashboard report
//!
//! Summary cards, the three breakdown charts, the spending trend and the
//! most recent expenses of one user. The aggregate figures come straight
//! from [`BudgetSummary`]; this module only decides what is shown:
//! non-positive allocation and fixed-expense slices are left out of their
//! charts and categories are ordered by amount, largest first.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregate::{share_of_income, BudgetSummary};
use crate::config::Settings;
use crate::display::format_recent_list;
use crate::display::report::{double_separator, format_bar, format_percentage, section_title};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{CalendarMonth, Expense, Money, UserId};
use crate::services::{ExpenseService, ProfileService};
use crate::storage::Storage;

use super::trend::format_trend_chart;

/// Message shown when the category chart has nothing to show
pub const NO_EXPENSE_DATA: &str = "No expense data available";

const BAR_WIDTH: usize = 24;

/// One slice of a chart, ready to render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub label: String,
    pub amount: Money,
    /// Percent of the chart's total; None when the total is not positive
    pub share: Option<f64>,
    /// Percent of monthly income (allocation chart only)
    pub share_of_income: Option<f64>,
}

fn percent_of(value: Money, total: Money) -> Option<f64> {
    if total.is_positive() {
        Some(value.cents() as f64 / total.cents() as f64 * 100.0)
    } else {
        None
    }
}

fn with_shares(rows: Vec<(String, Money)>, income: Option<Money>) -> Vec<ChartRow> {
    let total: Money = rows.iter().map(|(_, amount)| *amount).sum();
    rows.into_iter()
        .map(|(label, amount)| ChartRow {
            share: percent_of(amount, total),
            share_of_income: income.and_then(|i| share_of_income(amount, i)),
            label,
            amount,
        })
        .collect()
}

/// Dashboard of one user for one reference month
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub user_id: UserId,
    pub username: Option<String>,
    pub reference_month: CalendarMonth,
    pub summary: BudgetSummary,
    pub recent: Vec<Expense>,
}

impl DashboardReport {
    /// Load the user's profile and expenses and compute the dashboard
    ///
    /// All of the user's expenses feed the totals; `reference_date` only
    /// anchors the trend window.
    pub fn generate(
        storage: &Storage,
        user_id: &UserId,
        reference_date: NaiveDate,
        settings: &Settings,
    ) -> BudgetResult<Self> {
        let profile = ProfileService::new(storage).get_profile(user_id)?;
        let expenses = ExpenseService::new(storage).all_expenses(user_id)?;

        Ok(Self::from_parts(
            user_id.clone(),
            profile.as_ref().map(|p| p.username.clone()),
            BudgetSummary::compute(
                profile.as_ref(),
                &expenses,
                reference_date,
                settings.trend_window_months,
            ),
            expenses,
            reference_date,
            settings.recent_transactions_limit,
        ))
    }

    /// Build a report from already-loaded data; `expenses` must be newest first
    pub fn from_parts(
        user_id: UserId,
        username: Option<String>,
        summary: BudgetSummary,
        mut expenses: Vec<Expense>,
        reference_date: NaiveDate,
        recent_limit: usize,
    ) -> Self {
        expenses.truncate(recent_limit);
        Self {
            user_id,
            username,
            reference_month: CalendarMonth::of(reference_date),
            summary,
            recent: expenses,
        }
    }

    /// The five summary cards
    pub fn cards(&self) -> [(&'static str, Money); 5] {
        let allocation = &self.summary.allocation;
        [
            ("Monthly Income", self.summary.monthly_income),
            ("Mandatory Savings", allocation.mandatory_savings),
            ("Total Fixed Expenses", allocation.total_fixed_expenses),
            ("Extra Expenses", allocation.total_variable_expenses),
            ("Remaining Balance", allocation.remaining_balance),
        ]
    }

    /// Income allocation slices with a positive value
    pub fn allocation_rows(&self) -> Vec<ChartRow> {
        let rows = self
            .summary
            .allocation
            .entries()
            .into_iter()
            .filter(|(_, amount)| amount.is_positive())
            .map(|(slice, amount)| (slice.label().to_string(), amount))
            .collect();
        with_shares(rows, Some(self.summary.monthly_income))
    }

    /// Fixed-expense items with a positive value
    pub fn fixed_rows(&self) -> Vec<ChartRow> {
        let rows = self
            .summary
            .fixed
            .iter()
            .filter(|(_, amount)| amount.is_positive())
            .map(|(item, amount)| (item.label().to_string(), *amount))
            .collect();
        with_shares(rows, None)
    }

    /// Spending per category, largest first
    pub fn category_rows(&self) -> Vec<ChartRow> {
        let mut rows: Vec<(String, Money)> = self
            .summary
            .categories
            .iter()
            .map(|(category, amount)| (category.label().to_string(), *amount))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        with_shares(rows, None)
    }

    pub fn format_cards(&self, currency: &str) -> String {
        let mut output = String::new();
        for (label, amount) in self.cards() {
            output.push_str(&format!(
                "  {:<22} {:>16}\n",
                label,
                amount.format_with_symbol(currency)
            ));
        }
        output
    }

    pub fn format_allocation(&self, currency: &str) -> String {
        let mut output = section_title("Income Allocation");
        output.push_str(&format_chart(&self.allocation_rows(), currency, "No income allocated"));
        output
    }

    pub fn format_fixed(&self, currency: &str) -> String {
        let mut output = section_title("Fixed Expenses");
        output.push_str(&format_chart(&self.fixed_rows(), currency, "No fixed expenses set"));
        output
    }

    pub fn format_categories(&self, currency: &str) -> String {
        let mut output = section_title("Spending by Category");
        output.push_str(&format_chart(&self.category_rows(), currency, NO_EXPENSE_DATA));
        output
    }

    pub fn format_terminal(&self, settings: &Settings) -> String {
        let currency = settings.currency_symbol.as_str();
        let mut output = String::new();

        let title = match &self.username {
            Some(name) => format!("Budget Dashboard: {}", name),
            None => format!("Budget Dashboard: {}", self.user_id),
        };
        output.push_str(&format!("{}\n", title));
        output.push_str(&format!("{}\n", double_separator(60)));
        output.push_str(&self.format_cards(currency));
        output.push('\n');

        output.push_str(&self.format_allocation(currency));
        output.push('\n');
        output.push_str(&self.format_fixed(currency));
        output.push('\n');
        output.push_str(&self.format_categories(currency));
        output.push('\n');

        output.push_str(&section_title(&format!(
            "Spending Trend (through {})",
            self.reference_month.long_label()
        )));
        output.push_str(&format_trend_chart(&self.summary.trend, currency));
        output.push('\n');

        output.push_str(&section_title("Recent Transactions"));
        output.push_str(&format_recent_list(
            &self.recent,
            currency,
            &settings.date_format,
        ));

        output
    }

    /// Write every dashboard figure as CSV rows of `section,label,amount,percent`
    pub fn export_csv<W: Write>(&self, writer: W) -> BudgetResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| BudgetError::Export(e.to_string());

        csv.write_record(["section", "label", "amount", "percent"])
            .map_err(export_err)?;

        for (label, amount) in self.cards() {
            let amount = amount.to_string();
            csv.write_record(["card", label, amount.as_str(), ""])
                .map_err(export_err)?;
        }

        let sections = [
            ("allocation", self.allocation_rows()),
            ("fixed", self.fixed_rows()),
            ("category", self.category_rows()),
        ];
        for (section, rows) in &sections {
            for row in rows {
                let amount = row.amount.to_string();
                let percent = row.share.map(|p| format!("{:.2}", p)).unwrap_or_default();
                csv.write_record([*section, row.label.as_str(), amount.as_str(), percent.as_str()])
                    .map_err(export_err)?;
            }
        }

        for bucket in &self.summary.trend {
            let month = bucket.month.to_string();
            let total = bucket.total.to_string();
            csv.write_record(["trend", month.as_str(), total.as_str(), ""])
                .map_err(export_err)?;
        }

        csv.flush()
            .map_err(|e| BudgetError::Export(e.to_string()))?;
        Ok(())
    }
}

/// Bar chart of rows, or `empty` when there are none
fn format_chart(rows: &[ChartRow], currency: &str, empty: &str) -> String {
    if rows.is_empty() {
        return format!("  {}\n", empty);
    }

    let max = rows
        .iter()
        .map(|r| r.amount.as_f64())
        .fold(0.0_f64, f64::max);

    let mut output = String::new();
    for row in rows {
        let share = row.share.map(format_percentage).unwrap_or_default();
        output.push_str(&format!(
            "  {:<18} {} {:>14} {:>6}",
            row.label,
            format_bar(row.amount.as_f64(), max, BAR_WIDTH),
            row.amount.format_with_symbol(currency),
            share
        ));
        if let Some(pct) = row.share_of_income {
            output.push_str(&format!("  ({} of income)", format_percentage(pct)));
        }
        output.push('\n');
    }
    output
}
