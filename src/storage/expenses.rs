//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::BudgetError;
use crate::models::{Expense, ExpenseId, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    #[serde(default)]
    expenses: Vec<Expense>,
}

/// Newest date first, then newest creation time first
fn newest_first(a: &Expense, b: &Expense) -> std::cmp::Ordering {
    b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at))
}

/// Repository for expense persistence with a per-user index
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    /// Index: user_id -> expense_ids
    by_user: RwLock<HashMap<UserId, Vec<ExpenseId>>>,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_user: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk and rebuild the index
    pub fn load(&self) -> Result<(), BudgetError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_user = self
            .by_user
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_user.clear();

        for expense in file_data.expenses {
            by_user
                .entry(expense.user_id.clone())
                .or_default()
                .push(expense.id);
            data.insert(expense.id, expense);
        }

        debug!(count = data.len(), path = %self.path.display(), "loaded expenses");
        Ok(())
    }

    /// Save expenses to disk, newest first
    pub fn save(&self) -> Result<(), BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by(newest_first);

        debug!(count = expenses.len(), path = %self.path.display(), "saving expenses");
        write_json_atomic(&self.path, &ExpenseData { expenses })
    }

    /// Get an expense by id, regardless of owner
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// All expenses of every user, newest first
    pub fn get_all(&self) -> Result<Vec<Expense>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by(newest_first);
        Ok(expenses)
    }

    /// Expenses owned by `user_id`, newest first
    pub fn get_by_user(&self, user_id: &UserId) -> Result<Vec<Expense>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_user = self
            .by_user
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_user.get(user_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut expenses: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        expenses.sort_by(newest_first);
        Ok(expenses)
    }

    /// Insert or replace an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), BudgetError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_user = self
            .by_user
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(old) = data.get(&expense.id) {
            if let Some(ids) = by_user.get_mut(&old.user_id) {
                ids.retain(|&id| id != expense.id);
            }
        }

        by_user
            .entry(expense.user_id.clone())
            .or_default()
            .push(expense.id);
        data.insert(expense.id, expense);
        Ok(())
    }

    /// Remove an expense, returning it if it existed
    pub fn delete(&self, id: ExpenseId) -> Result<Option<Expense>, BudgetError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_user = self
            .by_user
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let removed = data.remove(&id);
        if let Some(expense) = &removed {
            if let Some(ids) = by_user.get_mut(&expense.user_id) {
                ids.retain(|&existing| existing != id);
            }
        }
        Ok(removed)
    }

    /// Number of stored expenses across all users
    pub fn count(&self) -> Result<usize, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        let repo = ExpenseRepository::new(path);
        (temp_dir, repo)
    }

    fn expense(user: &str, day: u32, units: i64) -> Expense {
        Expense::new(
            UserId::new(user).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            Money::from_units(units),
            ExpenseCategory::Shopping,
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let exp = expense("user_1", 5, 500);
        let id = exp.id;
        repo.upsert(exp).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.amount, Money::from_units(500));
    }

    #[test]
    fn test_get_by_user_isolates_owners() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(expense("user_1", 5, 500)).unwrap();
        repo.upsert(expense("user_1", 9, 700)).unwrap();
        repo.upsert(expense("user_2", 7, 100)).unwrap();

        let mine = repo.get_by_user(&UserId::new("user_1").unwrap()).unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].date.format("%d").to_string(), "09");

        let nobody = repo.get_by_user(&UserId::new("user_3").unwrap()).unwrap();
        assert!(nobody.is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let exp = expense("user_1", 5, 500).with_description(Some("shoes".into()));
        let id = exp.id;
        repo.upsert(exp).unwrap();
        repo.save().unwrap();

        let repo2 = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo2.load().unwrap();

        let loaded = repo2.get(id).unwrap().unwrap();
        assert_eq!(loaded.description.as_deref(), Some("shoes"));
        assert_eq!(
            repo2.get_by_user(&UserId::new("user_1").unwrap()).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let exp = expense("user_1", 5, 500);
        let id = exp.id;
        repo.upsert(exp).unwrap();

        assert!(repo.delete(id).unwrap().is_some());
        assert!(repo.get(id).unwrap().is_none());
        assert!(repo
            .get_by_user(&UserId::new("user_1").unwrap())
            .unwrap()
            .is_empty());
        assert!(repo.delete(id).unwrap().is_none());
    }
}
