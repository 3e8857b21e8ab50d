//! Budget profile CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_profile_details, NO_PROFILE};
use crate::error::BudgetResult;
use crate::models::{FixedExpenseItem, UserId};
use crate::services::{ProfileInput, ProfileService};
use crate::storage::Storage;

use super::parse_amount;

/// Profile subcommands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the current profile
    Show,
    /// Create or update the profile
    ///
    /// Fields not given keep their saved value (zero for a new profile).
    Set {
        /// Display name (required when no profile exists yet)
        #[arg(short, long)]
        username: Option<String>,
        /// Monthly income
        #[arg(short, long)]
        income: Option<String>,
        /// Mandatory monthly savings
        #[arg(short, long)]
        savings: Option<String>,
        /// Monthly rent
        #[arg(long)]
        rent: Option<String>,
        /// Monthly electricity bill
        #[arg(long)]
        electricity: Option<String>,
        /// Monthly furniture rent
        #[arg(long)]
        furniture: Option<String>,
        /// Monthly grocery budget
        #[arg(long)]
        grocery: Option<String>,
        /// Monthly travel budget
        #[arg(long)]
        travel: Option<String>,
    },
}

/// Handle a profile command
pub fn handle_profile_command(
    storage: &Storage,
    settings: &Settings,
    user_id: &UserId,
    cmd: ProfileCommands,
) -> BudgetResult<()> {
    let service = ProfileService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ProfileCommands::Show => match service.get_profile(user_id)? {
            Some(profile) => print!("{}", format_profile_details(&profile, currency)),
            None => println!("{}", NO_PROFILE),
        },
        ProfileCommands::Set {
            username,
            income,
            savings,
            rent,
            electricity,
            furniture,
            grocery,
            travel,
        } => {
            let mut input = service
                .get_profile(user_id)?
                .map(|p| ProfileInput::from_profile(&p))
                .unwrap_or_default();

            if let Some(name) = username {
                input.username = name;
            }
            if let Some(value) = income {
                input.monthly_income = parse_amount(&value)?;
            }
            if let Some(value) = savings {
                input.mandatory_savings = parse_amount(&value)?;
            }

            let fixed = [
                (FixedExpenseItem::Rent, rent),
                (FixedExpenseItem::ElectricityBill, electricity),
                (FixedExpenseItem::FurnitureRent, furniture),
                (FixedExpenseItem::Grocery, grocery),
                (FixedExpenseItem::Travel, travel),
            ];
            for (item, value) in fixed {
                if let Some(value) = value {
                    input.fixed_expenses.set(item, parse_amount(&value)?);
                }
            }

            let profile = service.upsert_profile(user_id, input)?;
            println!("Saved profile for {}", profile.username);
            print!("{}", format_profile_details(&profile, currency));
        }
    }

    Ok(())
}
