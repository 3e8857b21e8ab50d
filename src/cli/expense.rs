//! Expense CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_table};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{ExpenseCategory, UserId};
use crate::services::{CreateExpenseInput, ExpenseFilter, ExpenseService};
use crate::storage::Storage;

use super::{parse_amount, parse_date, today};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Log a new expense
    Add {
        /// Amount spent (e.g. "500" or "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category: Entertainment, Shopping, Health, Education, Gift or Other
        #[arg(short, long)]
        category: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text description
        #[arg(short = 'D', long)]
        description: Option<String>,
    },
    /// List expenses, newest first
    List {
        /// Maximum number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show expense details
    Show {
        /// Expense ID
        id: String,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },
}

fn parse_category(value: &str) -> BudgetResult<ExpenseCategory> {
    value
        .parse()
        .map_err(|e: crate::models::ExpenseValidationError| BudgetError::Validation(e.to_string()))
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    user_id: &UserId,
    cmd: ExpenseCommands,
) -> BudgetResult<()> {
    let service = ExpenseService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            description,
        } => {
            let today = today();
            let input = CreateExpenseInput {
                amount: parse_amount(&amount)?,
                category: parse_category(&category)?,
                date: match date {
                    Some(d) => parse_date(&d)?,
                    None => today,
                },
                description,
            };

            let expense = service.create_expense(user_id, input, today)?;
            println!(
                "Added expense: {} {} on {}",
                expense.amount.format_with_symbol(currency),
                expense.category,
                expense.date.format(&settings.date_format)
            );
            println!("  ID: {}", expense.id);
        }
        ExpenseCommands::List {
            limit,
            from,
            to,
            category,
        } => {
            let filter = ExpenseFilter {
                category: category.as_deref().map(parse_category).transpose()?,
                start_date: from.as_deref().map(parse_date).transpose()?,
                end_date: to.as_deref().map(parse_date).transpose()?,
                limit,
            };

            let expenses = service.list_expenses(user_id, filter)?;
            print!(
                "{}",
                format_expense_table(&expenses, currency, &settings.date_format)
            );
        }
        ExpenseCommands::Show { id } => {
            let expense = service
                .find(user_id, &id)?
                .ok_or_else(|| BudgetError::expense_not_found(&id))?;
            print!(
                "{}",
                format_expense_details(&expense, currency, &settings.date_format)
            );
        }
        ExpenseCommands::Delete { id } => {
            let expense_id = id
                .parse()
                .map_err(|_| BudgetError::expense_not_found(&id))?;
            let removed = service.delete_expense(user_id, expense_id)?;
            println!(
                "Deleted expense: {} {} on {}",
                removed.amount.format_with_symbol(currency),
                removed.category,
                removed.date.format(&settings.date_format)
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("gift").unwrap(), ExpenseCategory::Gift);
        assert!(parse_category("rent").unwrap_err().is_validation());
    }
}
