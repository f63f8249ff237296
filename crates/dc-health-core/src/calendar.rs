use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::DcHealthError;
use crate::types::Months;
use crate::DcHealthResult;

/// Day count of each calendar month, January first. February is fixed at 28:
/// revenue profiles are spread over a non-leap year.
pub const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Average month length used to express day counts as months.
pub const AVERAGE_MONTH_DAYS: Decimal = dec!(30.44);

const MONTHS_DISPLAY_DP: u32 = 4;

/// Length of a 1-based calendar month from the fixed table.
pub fn month_length(month: u32) -> DcHealthResult<u32> {
    if !(1..=12).contains(&month) {
        return Err(DcHealthError::invalid_input(
            "month",
            format!("Month must be between 1 and 12, got {month}"),
        ));
    }
    Ok(MONTH_LENGTHS[(month - 1) as usize])
}

/// Check a month/day pair against the fixed month-length table.
///
/// February 29 is rejected even in leap years, matching the table.
pub fn validate_month_day(month: u32, day: u32) -> DcHealthResult<()> {
    let length = month_length(month)?;
    if day == 0 || day > length {
        return Err(DcHealthError::invalid_input(
            "day",
            format!("Day must be between 1 and {length} for month {month}, got {day}"),
        ));
    }
    Ok(())
}

/// Build a date from a year and a validated month/day selection.
pub fn date_from_parts(year: i32, month: u32, day: u32) -> DcHealthResult<NaiveDate> {
    validate_month_day(month, day)?;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DcHealthError::DateError(format!("{year}-{month:02}-{day:02} is out of range")))
}

/// Step a date forward by whole days.
pub fn add_days(date: NaiveDate, days: u32) -> DcHealthResult<NaiveDate> {
    date.checked_add_days(Days::new(u64::from(days)))
        .ok_or_else(|| DcHealthError::DateError(format!("{date} + {days} days is out of range")))
}

/// Zero-based month index of a date, for looking up 12-entry tables.
pub fn month_index(date: NaiveDate) -> usize {
    date.month0() as usize
}

/// Exact day-to-month conversion.
pub fn days_to_months(days: u32) -> Months {
    Decimal::from(days) / AVERAGE_MONTH_DAYS
}

/// Day-to-month conversion rounded for display.
pub fn display_months(days: u32) -> Months {
    days_to_months(days).round_dp(MONTHS_DISPLAY_DP)
}
