//! Monthly spending trend
//!
//! Unlike the breakdowns, the trend is a time series: every month in the
//! window gets a bucket, empty months included.

use serde::Serialize;

use chrono::NaiveDate;

use crate::models::{CalendarMonth, Expense, Money};

/// Number of months shown by the spending trend chart
pub const DEFAULT_TREND_WINDOW: u32 = 6;

/// One month of the spending trend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendBucket {
    pub month: CalendarMonth,
    /// Axis label ("Oct")
    pub label: String,
    pub total: Money,
}

/// Spending per calendar month for the `window_months` months ending with
/// the month of `reference_date`, oldest first
///
/// Each bucket sums the expenses dated between the first and last day of
/// its month inclusive. Expenses outside the window are ignored. A window
/// of zero months yields no buckets.
pub fn monthly_trend(
    expenses: &[Expense],
    reference_date: NaiveDate,
    window_months: u32,
) -> Vec<TrendBucket> {
    if window_months == 0 {
        return Vec::new();
    }

    let last = CalendarMonth::of(reference_date);
    let first = last.minus_months(window_months - 1);

    let mut buckets: Vec<TrendBucket> = Vec::with_capacity(window_months as usize);
    let mut month = first;
    for _ in 0..window_months {
        buckets.push(TrendBucket {
            month,
            label: month.short_label(),
            total: Money::zero(),
        });
        month = month.next();
    }

    let window_start = first.start_date();
    let window_end = last.end_date();

    for expense in expenses {
        if expense.date < window_start || expense.date > window_end {
            continue;
        }
        let bucket_month = CalendarMonth::of(expense.date);
        if let Some(bucket) = buckets.iter_mut().find(|b| b.month == bucket_month) {
            bucket.total += expense.amount;
        }
    }

    buckets
}
