//! Spending trend report

use chrono::NaiveDate;

use crate::aggregate::{monthly_trend, TrendBucket};
use crate::display::report::{format_bar, section_title};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{CalendarMonth, Money, UserId};
use crate::services::ExpenseService;
use crate::storage::Storage;

const BAR_WIDTH: usize = 30;

/// Monthly spending of one user over a window of months
#[derive(Debug, Clone)]
pub struct TrendReport {
    pub reference_month: CalendarMonth,
    pub buckets: Vec<TrendBucket>,
}

impl TrendReport {
    pub fn generate(
        storage: &Storage,
        user_id: &UserId,
        reference_date: NaiveDate,
        window_months: u32,
    ) -> BudgetResult<Self> {
        if window_months == 0 {
            return Err(BudgetError::Validation(
                "Trend window must be at least one month".into(),
            ));
        }

        let expenses = ExpenseService::new(storage).all_expenses(user_id)?;
        Ok(Self {
            reference_month: CalendarMonth::of(reference_date),
            buckets: monthly_trend(&expenses, reference_date, window_months),
        })
    }

    /// Sum over every bucket
    pub fn total(&self) -> Money {
        self.buckets.iter().map(|b| b.total).sum()
    }

    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = section_title(&format!(
            "Spending Trend: {} months through {}",
            self.buckets.len(),
            self.reference_month.long_label()
        ));
        output.push_str(&format_trend_chart(&self.buckets, currency));
        output.push_str(&format!(
            "  {:<8} {:>width$} {:>14}\n",
            "Total",
            "",
            self.total().format_with_symbol(currency),
            width = BAR_WIDTH
        ));
        output
    }
}

/// One bar per month, oldest at the top
pub fn format_trend_chart(buckets: &[TrendBucket], currency: &str) -> String {
    let max = buckets
        .iter()
        .map(|b| b.total.as_f64())
        .fold(0.0_f64, f64::max);

    let mut output = String::new();
    for bucket in buckets {
        output.push_str(&format!(
            "  {:<3} {:>4} {} {:>14}\n",
            bucket.label,
            bucket.month.year(),
            format_bar(bucket.total.as_f64(), max, BAR_WIDTH),
            bucket.total.format_with_symbol(currency)
        ));
    }
    output
}
