//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (i64 cents/paise) to avoid
//! floating-point precision issues. Sums and differences are exact
//! for amounts within `MAX_AMOUNT`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Largest magnitude accepted for a user-entered amount (ten billion units)
///
/// Sums of bounded amounts stay far inside `i64`; arithmetic saturates
/// beyond that.
pub const MAX_AMOUNT: Money = Money::from_units(10_000_000_000);

/// A monetary amount stored as hundredths of the currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use budget_tracker::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    ///
    /// # Examples
    /// ```
    /// use budget_tracker::models::Money;
    /// assert_eq!(Money::from_units(500).cents(), 50000);
    /// ```
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// The fractional part (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Lossy conversion for percentages and chart scaling
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Whether the amount lies within `±MAX_AMOUNT`
    pub const fn is_within_limit(&self) -> bool {
        self.0 >= -MAX_AMOUNT.0 && self.0 <= MAX_AMOUNT.0
    }

    /// Parse a money amount from a string
    ///
    /// Accepts "10.50", "-10.50", "₹1,200", "₹-500", "-$10.5", "10", ".75".
    /// At most one leading currency symbol is stripped, and the minus sign
    /// may come before or after it. Digits past the second decimal place are
    /// truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        let s = s.trim();
        let (sign_before, s) = strip_minus(s);

        let s = match s.chars().next() {
            Some(c) if !c.is_alphanumeric() && c != '.' && c != '-' => s[c.len_utf8()..].trim_start(),
            _ => s,
        };

        let (sign_after, s) = strip_minus(s);
        if sign_before && sign_after {
            return Err(invalid());
        }
        let negative = sign_before || sign_after;

        let s: String = s.chars().filter(|c| *c != ',').collect();

        if s.is_empty() {
            return Err(invalid());
        }

        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s.as_str(), ""),
        };

        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac[..2].parse().map_err(|_| invalid())?,
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol, sign first ("-₹12.00")
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol(""))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

fn strip_minus(s: &str) -> (bool, &str) {
    match s.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, s),
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
