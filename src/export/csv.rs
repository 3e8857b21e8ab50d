//! CSV export of a user's expenses

use std::io::Write;

use serde::Serialize;

use crate::error::{BudgetError, BudgetResult};
use crate::models::UserId;
use crate::services::ExpenseService;
use crate::storage::Storage;

#[derive(Serialize)]
struct ExpenseRecord<'a> {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Category")]
    category: &'static str,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
}

/// Write every expense of `user_id`, newest first
pub fn export_expenses_csv<W: Write>(storage: &Storage, user_id: &UserId, writer: W) -> BudgetResult<()> {
    let expenses = ExpenseService::new(storage).all_expenses(user_id)?;
    let mut csv = csv::Writer::from_writer(writer);

    for expense in &expenses {
        csv.serialize(ExpenseRecord {
            id: expense.id.to_string(),
            date: expense.date.to_string(),
            category: expense.category.label(),
            description: expense.description.as_deref().unwrap_or(""),
            amount: expense.amount.to_string(),
        })
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    }

    if expenses.is_empty() {
        csv.write_record(["ID", "Date", "Category", "Description", "Amount"])
            .map_err(|e| BudgetError::Export(e.to_string()))?;
    }

    csv.flush().map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BudgetPaths;
    use crate::export::json::tests::create_test_storage;
    use crate::models::{Expense, ExpenseCategory, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_export_expenses_csv() {
        let (_temp_dir, storage, user) = create_test_storage();

        let mut buf = Vec::new();
        export_expenses_csv(&storage, &user, &mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines[0], "ID,Date,Category,Description,Amount");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("2025-01-09,Shopping,,1200.00"));
    }

    #[test]
    fn test_descriptions_are_quoted() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(BudgetPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let user = UserId::new("user_1").unwrap();
        storage
            .expenses
            .upsert(
                Expense::new(
                    user.clone(),
                    NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
                    Money::from_units(75),
                    ExpenseCategory::Gift,
                )
                .with_description(Some("flowers, card".into())),
            )
            .unwrap();

        let mut buf = Vec::new();
        export_expenses_csv(&storage, &user, &mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        assert!(csv.contains("\"flowers, card\",75.00"));
    }

    #[test]
    fn test_empty_export_has_header() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(BudgetPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();

        let mut buf = Vec::new();
        export_expenses_csv(&storage, &UserId::new("nobody").unwrap(), &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap().trim_end(),
            "ID,Date,Category,Description,Amount"
        );
    }
}
