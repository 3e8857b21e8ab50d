//! JSON export of one user's data

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::aggregate::total_variable_expenses;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetProfile, Expense, Money, UserId};
use crate::services::{ExpenseService, ProfileService};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Everything stored for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserExport {
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Version of budget-tracker that wrote the export
    pub app_version: String,

    pub user_id: UserId,

    pub profile: Option<BudgetProfile>,

    /// Newest first
    pub expenses: Vec<Expense>,

    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,

    pub total_expenses: Money,

    pub earliest_expense: Option<String>,

    pub latest_expense: Option<String>,
}

impl UserExport {
    pub fn from_storage(storage: &Storage, user_id: &UserId) -> BudgetResult<Self> {
        let profile = ProfileService::new(storage).get_profile(user_id)?;
        let expenses = ExpenseService::new(storage).all_expenses(user_id)?;

        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            total_expenses: total_variable_expenses(&expenses),
            earliest_expense: expenses.iter().map(|e| e.date).min().map(|d| d.to_string()),
            latest_expense: expenses.iter().map(|e| e.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            user_id: user_id.clone(),
            profile,
            expenses,
            metadata,
        })
    }
}

/// Write the user's data as pretty-printed JSON
pub fn export_full_json<W: Write>(storage: &Storage, user_id: &UserId, writer: &mut W) -> BudgetResult<()> {
    let export = UserExport::from_storage(storage, user_id)?;

    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BudgetError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::paths::BudgetPaths;
    use crate::models::ExpenseCategory;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    pub(crate) fn create_test_storage() -> (TempDir, Storage, UserId) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let user = UserId::new("user_1").unwrap();
        storage
            .profiles
            .upsert(BudgetProfile::new(user.clone(), "Asha"))
            .unwrap();
        for (day, units) in [(3, 500), (9, 1200)] {
            storage
                .expenses
                .upsert(Expense::new(
                    user.clone(),
                    NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
                    Money::from_units(units),
                    ExpenseCategory::Shopping,
                ))
                .unwrap();
        }
        storage
            .expenses
            .upsert(Expense::new(
                UserId::new("user_2").unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 4).unwrap(),
                Money::from_units(10),
                ExpenseCategory::Other,
            ))
            .unwrap();

        (temp_dir, storage, user)
    }

    #[test]
    fn test_export_metadata() {
        let (_temp_dir, storage, user) = create_test_storage();
        let export = UserExport::from_storage(&storage, &user).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.expense_count, 2);
        assert_eq!(export.metadata.total_expenses, Money::from_units(1700));
        assert_eq!(export.metadata.earliest_expense.as_deref(), Some("2025-01-03"));
        assert_eq!(export.metadata.latest_expense.as_deref(), Some("2025-01-09"));
        assert!(export.expenses.iter().all(|e| e.user_id == user));
    }

    #[test]
    fn test_json_export_parses_back() {
        let (_temp_dir, storage, user) = create_test_storage();

        let mut buf = Vec::new();
        export_full_json(&storage, &user, &mut buf).unwrap();

        let parsed: UserExport = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed.user_id, user);
        assert_eq!(parsed.profile.unwrap().username, "Asha");
        assert_eq!(parsed.expenses.len(), 2);
    }
}
