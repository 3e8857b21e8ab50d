//! Expense display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Expense;

use super::report::truncate;

/// Message shown when a user has no expenses to list
pub const NO_TRANSACTIONS: &str = "No transactions found";

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Table of expenses, in the order given
pub fn format_expense_table(expenses: &[Expense], currency: &str, date_format: &str) -> String {
    if expenses.is_empty() {
        return format!("{}\n", NO_TRANSACTIONS);
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        date: e.date.format(date_format).to_string(),
        category: e.category.to_string(),
        amount: e.amount.format_with_symbol(currency),
        description: e
            .description
            .as_deref()
            .map(|d| truncate(d, 40))
            .unwrap_or_default(),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Compact list used by the dashboard's recent transactions section
pub fn format_recent_list(expenses: &[Expense], currency: &str, date_format: &str) -> String {
    if expenses.is_empty() {
        return format!("  {}\n", NO_TRANSACTIONS);
    }

    let mut output = String::new();
    for expense in expenses {
        let label = match &expense.description {
            Some(d) => format!("{} ({})", expense.category, truncate(d, 24)),
            None => expense.category.to_string(),
        };
        output.push_str(&format!(
            "  {:<10}  {:<38} {:>14}\n",
            expense.date.format(date_format),
            label,
            expense.amount.format_with_symbol(currency)
        ));
    }
    output
}

/// Field-per-line details of one expense
pub fn format_expense_details(expense: &Expense, currency: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", expense.date.format(date_format)));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!("Category:    {}\n", expense.category));
    if let Some(description) = &expense.description {
        output.push_str(&format!("Description: {}\n", description));
    }
    output.push_str(&format!(
        "Logged:      {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}
