//! YAML export of one user's data

use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::export::json::UserExport;
use crate::models::UserId;
use crate::storage::Storage;

/// Write the user's data as YAML with a short comment header
pub fn export_full_yaml<W: Write>(storage: &Storage, user_id: &UserId, writer: &mut W) -> BudgetResult<()> {
    let export = UserExport::from_storage(storage, user_id)?;
    let io_err = |e: std::io::Error| BudgetError::Export(e.to_string());

    writeln!(writer, "# budget-tracker export for {}", export.user_id).map_err(io_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(io_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(io_err)?;
    writeln!(writer).map_err(io_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| BudgetError::Export(e.to_string()))?;

    Ok(())
}
