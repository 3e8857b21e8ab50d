//! Expense history CLI command

use crate::error::BudgetResult;
use crate::models::UserId;
use crate::storage::Storage;

/// Print the most recent expense changes of `user_id`, oldest first
pub fn handle_history_command(storage: &Storage, user_id: &UserId, limit: usize) -> BudgetResult<()> {
    let entries = storage.audit().read_for_user(user_id, limit)?;

    if entries.is_empty() {
        println!("No history recorded.");
    }
    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
