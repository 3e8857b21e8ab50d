//! Budget profile repository
//!
//! One profile per user, persisted to profiles.json.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::BudgetError;
use crate::models::{BudgetProfile, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ProfileData {
    #[serde(default)]
    profiles: Vec<BudgetProfile>,
}

/// Repository for budget profiles, keyed by owning user
pub struct ProfileRepository {
    path: PathBuf,
    profiles: RwLock<HashMap<UserId, BudgetProfile>>,
}

impl ProfileRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            profiles: RwLock::new(HashMap::new()),
        }
    }

    /// Load profiles from disk
    pub fn load(&self) -> Result<(), BudgetError> {
        let file_data: ProfileData = read_json(&self.path)?;

        let mut profiles = self
            .profiles
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        profiles.clear();
        for profile in file_data.profiles {
            profiles.insert(profile.user_id.clone(), profile);
        }

        debug!(count = profiles.len(), path = %self.path.display(), "loaded profiles");
        Ok(())
    }

    /// Save profiles to disk
    pub fn save(&self) -> Result<(), BudgetError> {
        let profiles = self
            .profiles
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = profiles.values().cloned().collect();
        list.sort_by(|a, b| a.user_id.cmp(&b.user_id));

        write_json_atomic(&self.path, &ProfileData { profiles: list })
    }

    /// Profile of `user_id`, if one has been saved
    pub fn get(&self, user_id: &UserId) -> Result<Option<BudgetProfile>, BudgetError> {
        let profiles = self
            .profiles
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(profiles.get(user_id).cloned())
    }

    /// Store a profile, replacing any previous profile of the same user
    ///
    /// Returns the replaced profile.
    pub fn upsert(&self, profile: BudgetProfile) -> Result<Option<BudgetProfile>, BudgetError> {
        let mut profiles = self
            .profiles
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(profiles.insert(profile.user_id.clone(), profile))
    }

    /// Drop the profile of `user_id` from memory
    pub fn remove(&self, user_id: &UserId) -> Result<Option<BudgetProfile>, BudgetError> {
        let mut profiles = self
            .profiles
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(profiles.remove(user_id))
    }

    pub fn get_all(&self) -> Result<Vec<BudgetProfile>, BudgetError> {
        let profiles = self
            .profiles
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = profiles.values().cloned().collect();
        list.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(list)
    }
}
