use std::ops::RangeInclusive;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::error::DcHealthError;
use crate::payback::dispatch::DispatchSearchInput;
use crate::payback::fixed_start::FixedStartInput;
use crate::sites::{RevenueProfile, SiteCatalog};
use crate::types::Months;
use crate::DcHealthResult;

/// Strings-down values offered to the user.
pub const STRINGS_DOWN_RANGE: RangeInclusive<u32> = 1..=100;

/// Dispatch delays offered to the user, in days.
pub const DISPATCH_DELAY_RANGE: RangeInclusive<u32> = 0..=30;

pub const MIN_TARGET_PAYBACK_MONTHS: Decimal = dec!(0.5);
pub const MAX_TARGET_PAYBACK_MONTHS: Decimal = dec!(12.0);

fn default_strings_down() -> u32 {
    20
}

/// An interactive payback question: which site and year, which day of the
/// year the outage is looked at, how many strings are down and how long the
/// crew takes to get there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaybackQuery {
    pub site: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(default = "default_strings_down")]
    pub strings_down: u32,
    #[serde(default)]
    pub dispatch_delay_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_payback_months: Option<Months>,
}

impl PaybackQuery {
    /// Check every control against its allowed range.
    pub fn validate(&self) -> DcHealthResult<()> {
        calendar::validate_month_day(self.month, self.day)?;
        if !STRINGS_DOWN_RANGE.contains(&self.strings_down) {
            return Err(DcHealthError::invalid_input(
                "strings_down",
                format!(
                    "Strings down must be between {} and {}, got {}",
                    STRINGS_DOWN_RANGE.start(),
                    STRINGS_DOWN_RANGE.end(),
                    self.strings_down
                ),
            ));
        }
        if !DISPATCH_DELAY_RANGE.contains(&self.dispatch_delay_days) {
            return Err(DcHealthError::invalid_input(
                "dispatch_delay_days",
                format!(
                    "Dispatch delay must be between {} and {} days, got {}",
                    DISPATCH_DELAY_RANGE.start(),
                    DISPATCH_DELAY_RANGE.end(),
                    self.dispatch_delay_days
                ),
            ));
        }
        if let Some(target) = self.target_payback_months {
            if target < MIN_TARGET_PAYBACK_MONTHS || target > MAX_TARGET_PAYBACK_MONTHS {
                return Err(DcHealthError::invalid_input(
                    "target_payback_months",
                    format!(
                        "Target payback must be between {MIN_TARGET_PAYBACK_MONTHS} and \
                         {MAX_TARGET_PAYBACK_MONTHS} months, got {target}"
                    ),
                ));
            }
        }
        Ok(())
    }

    /// The calendar date picked in the query, before any dispatch delay.
    pub fn selected_date(&self) -> DcHealthResult<NaiveDate> {
        calendar::date_from_parts(self.year, self.month, self.day)
    }

    /// Date the crew arrives: the selected date plus the dispatch delay.
    pub fn dispatch_date(&self) -> DcHealthResult<NaiveDate> {
        calendar::add_days(self.selected_date()?, self.dispatch_delay_days)
    }

    pub fn profile<'a>(&self, catalog: &'a SiteCatalog) -> DcHealthResult<&'a RevenueProfile> {
        catalog.get(&self.site, self.year)
    }

    /// Fixed-start input dispatched on [`Self::dispatch_date`].
    pub fn fixed_start_input(&self) -> DcHealthResult<FixedStartInput> {
        self.validate()?;
        Ok(FixedStartInput {
            start_date: self.dispatch_date()?,
            strings_down: self.strings_down,
        })
    }

    /// Dispatch search from the selected date, scanning delays from the
    /// query's dispatch delay upward.
    pub fn dispatch_search_input(&self) -> DcHealthResult<DispatchSearchInput> {
        self.validate()?;
        let target_payback_months = self.target_payback_months.ok_or_else(|| {
            DcHealthError::invalid_input(
                "target_payback_months",
                "A target payback is required for the dispatch search",
            )
        })?;
        Ok(DispatchSearchInput {
            earliest_start: self.selected_date()?,
            strings_down: self.strings_down,
            target_payback_months,
            min_delay_days: self.dispatch_delay_days,
            max_delay_days: None,
        })
    }
}
