//! Calendar offsets relative to a reference date.
//!
//! Month and year shifts clamp to the last valid day of the target month,
//! so 31 March minus one month is the last day of February.

use chrono::{Days, Months, NaiveDate};

/// Returns `date` shifted forward by `years`, or `None` if out of range.
pub fn years_after(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(years.checked_mul(12)?))
}

/// Returns `date` shifted back by `months`, or `None` if out of range.
pub fn months_before(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_sub_months(Months::new(months))
}

/// Returns `date` shifted back by `days`, or `None` if out of range.
pub fn days_before(date: NaiveDate, days: u32) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(days)))
}
