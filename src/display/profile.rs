//! Budget profile display formatting

use crate::aggregate::total_fixed_expenses;
use crate::models::BudgetProfile;

/// Message shown when a user has not saved a profile yet
pub const NO_PROFILE: &str = "No profile saved yet. Run `budget profile set` to create one.";

/// Settings-style view of a profile
pub fn format_profile_details(profile: &BudgetProfile, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Profile:           {}\n", profile.username));
    output.push_str(&format!("User:              {}\n", profile.user_id));
    output.push_str(&format!(
        "Monthly income:    {}\n",
        profile.monthly_income.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Mandatory savings: {}\n",
        profile.mandatory_savings.format_with_symbol(currency)
    ));
    output.push_str("\nFixed expenses:\n");
    for (item, amount) in profile.fixed_expenses.items() {
        output.push_str(&format!(
            "  {:<16} {:>14}\n",
            item.label(),
            amount.format_with_symbol(currency)
        ));
    }
    output.push_str(&format!(
        "  {:<16} {:>14}\n",
        "Total",
        total_fixed_expenses(Some(profile)).format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "\nLast updated:      {}\n",
        profile.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}
