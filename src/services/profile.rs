//! Budget profile service
//!
//! A user has at most one profile. Saving replaces every field; only the id
//! and creation time of an existing profile are kept. Earlier versions are
//! not recorded anywhere, including the audit log.

use chrono::Utc;
use tracing::info;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetProfile, FixedExpenses, Money, UserId};
use crate::storage::Storage;

/// Full set of editable profile fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileInput {
    pub username: String,
    pub monthly_income: Money,
    pub mandatory_savings: Money,
    pub fixed_expenses: FixedExpenses,
}

impl ProfileInput {
    /// Input pre-filled with the values of an existing profile
    pub fn from_profile(profile: &BudgetProfile) -> Self {
        Self {
            username: profile.username.clone(),
            monthly_income: profile.monthly_income,
            mandatory_savings: profile.mandatory_savings,
            fixed_expenses: profile.fixed_expenses,
        }
    }
}

/// Service for budget profile management
pub struct ProfileService<'a> {
    storage: &'a Storage,
}

impl<'a> ProfileService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Profile of `user_id`; None until one has been saved
    pub fn get_profile(&self, user_id: &UserId) -> BudgetResult<Option<BudgetProfile>> {
        self.storage.profiles.get(user_id)
    }

    /// Profile of `user_id`, or NotFound
    pub fn require_profile(&self, user_id: &UserId) -> BudgetResult<BudgetProfile> {
        self.get_profile(user_id)?
            .ok_or_else(|| BudgetError::profile_not_found(user_id.as_str()))
    }

    /// Create or replace the profile of `user_id`
    pub fn upsert_profile(&self, user_id: &UserId, input: ProfileInput) -> BudgetResult<BudgetProfile> {
        let existing = self.storage.profiles.get(user_id)?;

        let mut profile = match &existing {
            Some(current) => current.clone(),
            None => BudgetProfile::new(user_id.clone(), ""),
        };
        profile.username = input.username.trim().to_string();
        profile.monthly_income = input.monthly_income;
        profile.mandatory_savings = input.mandatory_savings;
        profile.fixed_expenses = input.fixed_expenses;
        profile.updated_at = Utc::now();

        profile
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let previous = self.storage.profiles.upsert(profile.clone())?;
        if let Err(e) = self.storage.profiles.save() {
            match previous {
                Some(previous) => {
                    self.storage.profiles.upsert(previous)?;
                }
                None => {
                    self.storage.profiles.remove(user_id)?;
                }
            }
            return Err(e);
        }

        info!(user = %user_id, "profile saved");
        Ok(profile)
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

    fn input(username: &str, income: i64) -> ProfileInput {
        ProfileInput {
            username: username.into(),
            monthly_income: Money::from_units(income),
            ..ProfileInput::default()
        }
    }

    #[test]
    fn test_absent_profile() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProfileService::new(&storage);
        let me = UserId::new("user_1").unwrap();

        assert!(service.get_profile(&me).unwrap().is_none());
        assert!(service.require_profile(&me).unwrap_err().is_not_found());
    }

    #[test]
    fn test_upsert_twice_keeps_one_profile() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProfileService::new(&storage);
        let me = UserId::new("user_1").unwrap();

        let mut first = input("Asha", 50000);
        first.fixed_expenses.rent = Money::from_units(15000);
        let created = service.upsert_profile(&me, first).unwrap();

        let updated = service.upsert_profile(&me, input("Asha K", 60000)).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.username, "Asha K");
        assert_eq!(updated.monthly_income, Money::from_units(60000));
        assert!(updated.fixed_expenses.rent.is_zero(), "fields are replaced, not merged");
        assert_eq!(storage.profiles.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_no_earlier_profile_state_survives() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProfileService::new(&storage);
        let me = UserId::new("user_1").unwrap();

        let mut first = input("Asha", 50000);
        first.fixed_expenses.rent = Money::from_units(15000);
        service.upsert_profile(&me, first).unwrap();
        service.upsert_profile(&me, input("Asha", 60000)).unwrap();

        assert!(!storage.paths().audit_log().exists());

        // Serialized cents of the first version's income and rent
        let on_disk = std::fs::read_to_string(storage.paths().profiles_file()).unwrap();
        assert!(on_disk.contains("6000000"));
        assert!(!on_disk.contains("5000000"));
        assert!(!on_disk.contains("1500000"));
    }

    #[test]
    fn test_failed_save_restores_previous_profile() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProfileService::new(&storage);
        let me = UserId::new("user_1").unwrap();
        service.upsert_profile(&me, input("Asha", 50000)).unwrap();

        let file = storage.paths().profiles_file();
        std::fs::remove_file(&file).unwrap();
        std::fs::create_dir(&file).unwrap();

        assert!(service.upsert_profile(&me, input("Asha", 60000)).is_err());
        assert!(service
            .upsert_profile(&UserId::new("user_2").unwrap(), input("Ravi", 1))
            .is_err());

        let kept = service.require_profile(&me).unwrap();
        assert_eq!(kept.monthly_income, Money::from_units(50000));
        assert!(service
            .get_profile(&UserId::new("user_2").unwrap())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_upsert_validates() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProfileService::new(&storage);
        let me = UserId::new("user_1").unwrap();

        let err = service.upsert_profile(&me, input("A", 100)).unwrap_err();
        assert!(err.is_validation());

        let err = service.upsert_profile(&me, input("Asha", -1)).unwrap_err();
        assert!(err.is_validation());

        assert!(service.get_profile(&me).unwrap().is_none());
        assert!(storage.audit().read_all().unwrap().is_empty());
    }

    #[test]
    fn test_profiles_are_per_user() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProfileService::new(&storage);

        service
            .upsert_profile(&UserId::new("user_1").unwrap(), input("Asha", 100))
            .unwrap();

        assert!(service
            .get_profile(&UserId::new("user_2").unwrap())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_from_profile_prefills() {
        let mut profile = BudgetProfile::new(UserId::new("user_1").unwrap(), "Asha");
        profile.mandatory_savings = Money::from_units(10000);

        let prefilled = ProfileInput::from_profile(&profile);
        assert_eq!(prefilled.username, "Asha");
        assert_eq!(prefilled.mandatory_savings, Money::from_units(10000));
    }
}
