//! Expense service
//!
//! Creating, listing and deleting a user's expenses. Every operation is
//! scoped to one user: another user's expense behaves as if it did not
//! exist.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::audit::Operation;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Expense, ExpenseCategory, ExpenseId, Money, UserId};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub category: Option<ExpenseCategory>,
    /// Inclusive lower date bound
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub end_date: Option<NaiveDate>,
    /// Maximum number of expenses to return
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, expense: &Expense) -> bool {
        self.category.map_or(true, |c| expense.category == c)
            && self.start_date.map_or(true, |start| expense.date >= start)
            && self.end_date.map_or(true, |end| expense.date <= end)
    }
}

/// Input for logging a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub amount: Money,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Log a new expense for `user_id`
    ///
    /// `today` bounds the expense date from above.
    pub fn create_expense(
        &self,
        user_id: &UserId,
        input: CreateExpenseInput,
        today: NaiveDate,
    ) -> BudgetResult<Expense> {
        let expense = Expense::new(user_id.clone(), input.date, input.amount, input.category)
            .with_description(input.description);

        expense
            .validate(today)
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        if let Err(e) = self.storage.expenses.save() {
            self.storage.expenses.delete(expense.id)?;
            return Err(e);
        }

        self.storage.log_expense(Operation::Create, &expense)?;

        info!(user = %user_id, id = %expense.id, amount = %expense.amount, "expense created");
        Ok(expense)
    }

    /// Expenses of `user_id` matching `filter`, newest first
    pub fn list_expenses(&self, user_id: &UserId, filter: ExpenseFilter) -> BudgetResult<Vec<Expense>> {
        let mut expenses = self.storage.expenses.get_by_user(user_id)?;
        expenses.retain(|e| filter.matches(e));

        if let Some(limit) = filter.limit {
            expenses.truncate(limit);
        }

        Ok(expenses)
    }

    /// Every expense of `user_id`, newest first
    pub fn all_expenses(&self, user_id: &UserId) -> BudgetResult<Vec<Expense>> {
        self.list_expenses(user_id, ExpenseFilter::new())
    }

    /// Expense `id` if it exists and belongs to `user_id`
    pub fn get(&self, user_id: &UserId, id: ExpenseId) -> BudgetResult<Option<Expense>> {
        Ok(self
            .storage
            .expenses
            .get(id)?
            .filter(|e| &e.user_id == user_id))
    }

    /// Resolve an expense from a user-supplied id string
    pub fn find(&self, user_id: &UserId, identifier: &str) -> BudgetResult<Option<Expense>> {
        match identifier.parse::<ExpenseId>() {
            Ok(id) => self.get(user_id, id),
            Err(_) => Ok(None),
        }
    }

    /// Delete expense `id` of `user_id`, returning the removed expense
    pub fn delete_expense(&self, user_id: &UserId, id: ExpenseId) -> BudgetResult<Expense> {
        if self.get(user_id, id)?.is_none() {
            warn!(user = %user_id, id = %id, "delete of unknown expense");
            return Err(BudgetError::expense_not_found(id.to_string()));
        }

        let expense = self
            .storage
            .expenses
            .delete(id)?
            .ok_or_else(|| BudgetError::expense_not_found(id.to_string()))?;
        if let Err(e) = self.storage.expenses.save() {
            self.storage.expenses.upsert(expense)?;
            return Err(e);
        }

        self.storage.log_expense(Operation::Delete, &expense)?;

        info!(user = %user_id, id = %expense.id, "expense deleted");
        Ok(expense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BudgetPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(3, 31)
    }

    fn input(units: i64, category: ExpenseCategory, on: NaiveDate) -> CreateExpenseInput {
        CreateExpenseInput {
            amount: Money::from_units(units),
            category,
            date: on,
            description: None,
        }
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn test_create_then_list() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let me = user("user_1");

        let created = service
            .create_expense(
                &me,
                CreateExpenseInput {
                    description: Some("  headphones ".into()),
                    ..input(500, ExpenseCategory::Shopping, date(1, 5))
                },
                today(),
            )
            .unwrap();

        assert_eq!(created.description.as_deref(), Some("headphones"));

        let listed = service.all_expenses(&me).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);

        let audit = storage.audit().read_all().unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].operation, Operation::Create);
    }

    #[test]
    fn test_create_rejects_future_and_ancient_dates() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let me = user("user_1");

        let future = service.create_expense(&me, input(5, ExpenseCategory::Gift, date(4, 1)), today());
        assert!(future.unwrap_err().is_validation());

        let ancient = NaiveDate::from_ymd_opt(1899, 12, 31).unwrap();
        let old = service.create_expense(&me, input(5, ExpenseCategory::Gift, ancient), today());
        assert!(old.unwrap_err().is_validation());

        assert!(service.all_expenses(&me).unwrap().is_empty());
    }

    #[test]
    fn test_create_rejects_amount_over_limit() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let me = user("user_1");
        let huge = Money::parse("90000000000000000").unwrap();

        for _ in 0..2 {
            let err = service
                .create_expense(
                    &me,
                    CreateExpenseInput {
                        amount: huge,
                        ..input(0, ExpenseCategory::Other, date(1, 5))
                    },
                    today(),
                )
                .unwrap_err();
            assert!(err.is_validation());
        }

        assert!(service.all_expenses(&me).unwrap().is_empty());
    }

    #[test]
    fn test_list_filters_and_orders_newest_first() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let me = user("user_1");

        service.create_expense(&me, input(100, ExpenseCategory::Health, date(1, 10)), today()).unwrap();
        service.create_expense(&me, input(200, ExpenseCategory::Shopping, date(2, 10)), today()).unwrap();
        service.create_expense(&me, input(300, ExpenseCategory::Health, date(3, 10)), today()).unwrap();

        let all = service.all_expenses(&me).unwrap();
        let dates: Vec<_> = all.iter().map(|e| e.date).collect();
        assert_eq!(dates, [date(3, 10), date(2, 10), date(1, 10)]);

        let health = service
            .list_expenses(&me, ExpenseFilter::new().category(ExpenseCategory::Health))
            .unwrap();
        assert_eq!(health.len(), 2);

        let february = service
            .list_expenses(&me, ExpenseFilter::new().date_range(date(2, 1), date(2, 28)))
            .unwrap();
        assert_eq!(february.len(), 1);
        assert_eq!(february[0].amount, Money::from_units(200));

        let latest = service.list_expenses(&me, ExpenseFilter::new().limit(1)).unwrap();
        assert_eq!(latest[0].date, date(3, 10));
    }

    #[test]
    fn test_other_users_expenses_are_invisible() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let me = user("user_1");
        let other = user("user_2");

        let theirs = service
            .create_expense(&other, input(900, ExpenseCategory::Education, date(1, 2)), today())
            .unwrap();

        assert!(service.all_expenses(&me).unwrap().is_empty());
        assert!(service.get(&me, theirs.id).unwrap().is_none());

        let err = service.delete_expense(&me, theirs.id).unwrap_err();
        assert!(err.is_not_found());
        assert!(service.get(&other, theirs.id).unwrap().is_some());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let me = user("user_1");

        let created = service
            .create_expense(&me, input(500, ExpenseCategory::Other, date(1, 5)), today())
            .unwrap();

        let removed = service.delete_expense(&me, created.id).unwrap();
        assert_eq!(removed.id, created.id);
        assert!(service.all_expenses(&me).unwrap().is_empty());

        let again = service.delete_expense(&me, created.id).unwrap_err();
        assert!(again.is_not_found());

        let audit = storage.audit().read_all().unwrap();
        assert_eq!(audit.last().unwrap().operation, Operation::Delete);
    }

    #[test]
    fn test_failed_save_leaves_memory_unchanged() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let me = user("user_1");

        let kept = service
            .create_expense(&me, input(50, ExpenseCategory::Other, date(1, 5)), today())
            .unwrap();

        // A directory in place of expenses.json makes every save fail
        let file = storage.paths().expenses_file();
        std::fs::remove_file(&file).unwrap();
        std::fs::create_dir(&file).unwrap();

        let err = service.create_expense(&me, input(70, ExpenseCategory::Gift, date(1, 6)), today());
        assert!(err.is_err());
        assert!(service.delete_expense(&me, kept.id).is_err());

        let remaining = service.all_expenses(&me).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept.id);
        assert_eq!(storage.audit().read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_find_by_display_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let me = user("user_1");

        let created = service
            .create_expense(&me, input(50, ExpenseCategory::Other, date(1, 5)), today())
            .unwrap();

        let found = service.find(&me, &created.id.to_string()).unwrap();
        assert_eq!(found.unwrap().id, created.id);
        assert!(service.find(&me, "not-an-id").unwrap().is_none());
    }
}
