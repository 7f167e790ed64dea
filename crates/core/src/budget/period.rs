//! Budget period boundaries.

use chrono::{Datelike, Months, NaiveDate};

/// Returns the first and last calendar day of the month containing `today`.
#[must_use]
pub fn month_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today.with_day(1).unwrap_or(today);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    (start, end)
}
