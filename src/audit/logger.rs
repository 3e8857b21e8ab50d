//! Append-only JSONL audit log

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{BudgetError, BudgetResult};
use crate::models::UserId;

use super::entry::AuditEntry;

pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Append one entry as a single line
    pub fn log(&self, entry: &AuditEntry) -> BudgetResult<()> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .and_then(|mut file| file.write_all(&line))
            .map_err(|e| BudgetError::Io(format!("Failed to append to audit log: {}", e)))
    }

    /// Every entry, oldest first
    pub fn read_all(&self) -> BudgetResult<Vec<AuditEntry>> {
        let contents = match fs::read_to_string(&self.log_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(BudgetError::Io(format!("Failed to read audit log: {}", e))),
        };

        serde_json::Deserializer::from_str(&contents)
            .into_iter::<AuditEntry>()
            .map(|entry| {
                entry.map_err(|e| BudgetError::Json(format!("Corrupt audit log entry: {}", e)))
            })
            .collect()
    }

    /// The last `limit` entries of `user_id`, oldest first
    pub fn read_for_user(&self, user_id: &UserId, limit: usize) -> BudgetResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        entries.retain(|entry| &entry.user_id == user_id);
        let skip = entries.len().saturating_sub(limit);
        Ok(entries.split_off(skip))
    }
}
