//! JSON file helpers
//!
//! A write lands in `<name>.json.tmp` beside the target and is renamed over
//! it, so readers see either the old document or the new one.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::BudgetError;

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> BudgetError {
    BudgetError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Read JSON from `path`, or `T::default()` when the file does not exist yet
pub fn read_json<T, P>(path: P) -> Result<T, BudgetError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    match fs::read(path) {
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| storage_error("parse", path, e)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(storage_error("read", path, e)),
    }
}

/// Write `data` as pretty JSON to `path`, replacing it in one rename
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), BudgetError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = serde_json::to_vec_pretty(data).map_err(|e| storage_error("serialize", path, e))?;

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| storage_error("create directory", dir, e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let written = File::create(&temp_path)
        .and_then(|mut file| {
            file.write_all(&bytes)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&temp_path, path));

    written.map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        storage_error("write", path, e)
    })
}
