//! Budget profile model
//!
//! One profile per user: monthly income, mandatory savings and the fixed
//! recurring expenses. A profile is replaced wholesale on every save.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ProfileId, UserId};
use super::money::{Money, MAX_AMOUNT};

/// The fixed-expense line items every profile carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedExpenseItem {
    Rent,
    ElectricityBill,
    FurnitureRent,
    Grocery,
    Travel,
}

impl FixedExpenseItem {
    pub const ALL: [FixedExpenseItem; 5] = [
        Self::Rent,
        Self::ElectricityBill,
        Self::FurnitureRent,
        Self::Grocery,
        Self::Travel,
    ];

    /// Chart label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rent => "Rent",
            Self::ElectricityBill => "Electricity",
            Self::FurnitureRent => "Furniture",
            Self::Grocery => "Grocery",
            Self::Travel => "Travel",
        }
    }
}

impl fmt::Display for FixedExpenseItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed recurring expenses of a profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedExpenses {
    #[serde(default)]
    pub rent: Money,
    #[serde(default)]
    pub electricity_bill: Money,
    #[serde(default)]
    pub furniture_rent: Money,
    #[serde(default)]
    pub grocery: Money,
    #[serde(default)]
    pub travel: Money,
}

impl FixedExpenses {
    pub fn get(&self, item: FixedExpenseItem) -> Money {
        match item {
            FixedExpenseItem::Rent => self.rent,
            FixedExpenseItem::ElectricityBill => self.electricity_bill,
            FixedExpenseItem::FurnitureRent => self.furniture_rent,
            FixedExpenseItem::Grocery => self.grocery,
            FixedExpenseItem::Travel => self.travel,
        }
    }

    pub fn set(&mut self, item: FixedExpenseItem, amount: Money) {
        let slot = match item {
            FixedExpenseItem::Rent => &mut self.rent,
            FixedExpenseItem::ElectricityBill => &mut self.electricity_bill,
            FixedExpenseItem::FurnitureRent => &mut self.furniture_rent,
            FixedExpenseItem::Grocery => &mut self.grocery,
            FixedExpenseItem::Travel => &mut self.travel,
        };
        *slot = amount;
    }

    /// Iterate over every line item with its amount, in schema order
    pub fn items(&self) -> impl Iterator<Item = (FixedExpenseItem, Money)> + '_ {
        FixedExpenseItem::ALL.into_iter().map(|item| (item, self.get(item)))
    }
}

/// A user's budget profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetProfile {
    pub id: ProfileId,
    pub user_id: UserId,
    pub username: String,
    #[serde(default)]
    pub monthly_income: Money,
    #[serde(default)]
    pub mandatory_savings: Money,
    #[serde(default)]
    pub fixed_expenses: FixedExpenses,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BudgetProfile {
    /// Create a profile with zero income, savings and fixed expenses
    pub fn new(user_id: UserId, username: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ProfileId::new(),
            user_id,
            username: username.into(),
            monthly_income: Money::zero(),
            mandatory_savings: Money::zero(),
            fixed_expenses: FixedExpenses::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate against the settings-form rules
    ///
    /// Savings above income is accepted.
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        if self.username.trim().chars().count() < 2 {
            return Err(ProfileValidationError::UsernameTooShort);
        }
        let amounts = [
            ("monthly income", self.monthly_income),
            ("mandatory savings", self.mandatory_savings),
        ]
        .into_iter()
        .chain(self.fixed_expenses.items().map(|(item, amount)| (item.label(), amount)));

        for (field, amount) in amounts {
            if amount.is_negative() {
                return Err(ProfileValidationError::NegativeAmount(field));
            }
            if !amount.is_within_limit() {
                return Err(ProfileValidationError::AmountTooLarge(field));
            }
        }
        Ok(())
    }
}

/// Validation errors for profiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    UsernameTooShort,
    NegativeAmount(&'static str),
    AmountTooLarge(&'static str),
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UsernameTooShort => write!(f, "Username must be at least 2 characters"),
            Self::NegativeAmount(field) => write!(f, "{} cannot be negative", field),
            Self::AmountTooLarge(field) => {
                write!(f, "{} exceeds the limit of {}", field, MAX_AMOUNT)
            }
        }
    }
}

impl std::error::Error for ProfileValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> BudgetProfile {
        BudgetProfile::new(UserId::new("user_1").unwrap(), "Asha")
    }

    #[test]
    fn test_new_profile_is_zeroed() {
        let p = profile();
        assert!(p.monthly_income.is_zero());
        assert!(p.mandatory_savings.is_zero());
        assert!(p.fixed_expenses.items().all(|(_, v)| v.is_zero()));
    }

    #[test]
    fn test_fixed_expense_get_set() {
        let mut fixed = FixedExpenses::default();
        fixed.set(FixedExpenseItem::Travel, Money::from_units(3500));
        assert_eq!(fixed.travel, Money::from_units(3500));
        assert_eq!(fixed.get(FixedExpenseItem::Travel), Money::from_units(3500));
        assert_eq!(fixed.items().count(), 5);
    }

    #[test]
    fn test_validate() {
        let mut p = profile();
        assert!(p.validate().is_ok());

        p.mandatory_savings = Money::from_units(100);
        assert!(p.validate().is_ok(), "savings above income is allowed");

        p.username = " A ".into();
        assert_eq!(p.validate(), Err(ProfileValidationError::UsernameTooShort));

        p.username = "Asha".into();
        p.fixed_expenses.rent = Money::from_units(-1);
        assert_eq!(
            p.validate(),
            Err(ProfileValidationError::NegativeAmount("Rent"))
        );
    }

    #[test]
    fn test_validate_rejects_oversized_amounts() {
        let mut p = profile();
        p.monthly_income = MAX_AMOUNT;
        assert!(p.validate().is_ok());

        p.fixed_expenses.travel = Money::from_units(900_000_000_000_000);
        assert_eq!(
            p.validate(),
            Err(ProfileValidationError::AmountTooLarge("Travel"))
        );
    }

    #[test]
    fn test_missing_fixed_fields_default_to_zero() {
        let json = r#"{"rent": 1500000}"#;
        let fixed: FixedExpenses = serde_json::from_str(json).unwrap();
        assert_eq!(fixed.rent, Money::from_units(15000));
        assert!(fixed.travel.is_zero());
    }
}
