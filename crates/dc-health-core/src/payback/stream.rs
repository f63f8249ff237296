use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::config::PlantParameters;
use crate::error::DcHealthError;
use crate::repair::RepairJob;
use crate::sites::RevenueProfile;
use crate::types::{Money, Payback};
use crate::DcHealthResult;

/// Revenue recovered on one simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: Money,
}

/// Finite, restartable sequence of the daily revenue the failed strings would
/// have produced, starting at the dispatch date.
///
/// Days step through the real calendar; each day takes the per-day rate of
/// its calendar month scaled to the failed strings' share of plant capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRevenueStream {
    start: NaiveDate,
    horizon_days: u32,
    revenue_by_month: [Money; 12],
}

impl DailyRevenueStream {
    pub fn new(
        profile: &RevenueProfile,
        start: NaiveDate,
        strings_down: u32,
        horizon_days: u32,
        plant: &PlantParameters,
    ) -> DcHealthResult<Self> {
        let job = RepairJob::new(strings_down)?;
        let fraction = plant.string_fraction()?;
        // Reject horizons that run off the end of the calendar up front so
        // iteration always yields exactly `horizon_days` values.
        calendar::add_days(start, horizon_days)?;

        let strings = Decimal::from(job.strings_down());
        let out_of_range = || {
            DcHealthError::InvalidProfile(format!(
                "recovered revenue for {strings} strings over {horizon_days} days is out of range"
            ))
        };
        let mut revenue_by_month = [Decimal::ZERO; 12];
        for (slot, rate) in revenue_by_month.iter_mut().zip(profile.per_day_rate()) {
            *slot = rate
                .checked_mul(fraction)
                .and_then(|r| r.checked_mul(strings))
                .ok_or_else(out_of_range)?;
        }
        // Every running total is bounded by the best day times the horizon.
        let best_day = revenue_by_month.iter().copied().max().unwrap_or_default();
        best_day
            .checked_mul(Decimal::from(horizon_days))
            .ok_or_else(out_of_range)?;

        Ok(Self {
            start,
            horizon_days,
            revenue_by_month,
        })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// Recovered revenue for any date, inside the horizon or not.
    pub fn revenue_on(&self, date: NaiveDate) -> Money {
        self.revenue_by_month[calendar::month_index(date)]
    }

    pub fn iter(&self) -> DailyRevenueIter<'_> {
        DailyRevenueIter {
            stream: self,
            date: self.start,
            remaining: self.horizon_days,
        }
    }

    /// Running totals, one per day of the horizon.
    pub fn cumulative(&self) -> Vec<Money> {
        running_total(self.iter()).collect()
    }

    /// First day on which cumulative revenue covers `cost`.
    pub fn payback(&self, cost: Money) -> Payback {
        first_crossing(running_total(self.iter()), cost)
    }
}

fn running_total<I>(days: I) -> impl Iterator<Item = Money>
where
    I: Iterator<Item = DailyRevenue>,
{
    days.scan(Decimal::ZERO, |total, day| {
        *total += day.revenue;
        Some(*total)
    })
}

/// Smallest 1-based day count whose cumulative value meets `cost`.
pub fn first_crossing<I>(cumulative: I, cost: Money) -> Payback
where
    I: IntoIterator<Item = Money>,
{
    cumulative
        .into_iter()
        .position(|total| total >= cost)
        .map_or(Payback::Unreached, |index| Payback::Reached {
            days: index as u32 + 1,
        })
}

impl<'a> IntoIterator for &'a DailyRevenueStream {
    type Item = DailyRevenue;
    type IntoIter = DailyRevenueIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct DailyRevenueIter<'a> {
    stream: &'a DailyRevenueStream,
    date: NaiveDate,
    remaining: u32,
}

impl Iterator for DailyRevenueIter<'_> {
    type Item = DailyRevenue;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let day = DailyRevenue {
            date: self.date,
            revenue: self.stream.revenue_on(self.date),
        };
        self.remaining -= 1;
        if let Some(next) = self.date.succ_opt() {
            self.date = next;
        }
        Some(day)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DailyRevenueIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::SiteCatalog;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mckenzie() -> RevenueProfile {
        SiteCatalog::builtin().get("McKenzie", 2025).unwrap().clone()
    }

    #[test]
    fn test_stream_yields_exactly_horizon_days() {
        let profile = mckenzie();
        let plant = PlantParameters::default();
        for horizon in [0, 1, 31, 365, 730] {
            let stream =
                DailyRevenueStream::new(&profile, date(2025, 5, 15), 20, horizon, &plant).unwrap();
            assert_eq!(stream.iter().len(), horizon as usize);
            assert_eq!(stream.iter().count(), horizon as usize);
            assert!(stream.iter().all(|d| d.revenue >= Decimal::ZERO));
        }
    }

    #[test]
    fn test_stream_is_restartable() {
        let stream = DailyRevenueStream::new(
            &mckenzie(),
            date(2025, 1, 30),
            3,
            10,
            &PlantParameters::default(),
        )
        .unwrap();
        let first: Vec<_> = stream.iter().collect();
        let second: Vec<_> = (&stream).into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_daily_value_scales_with_string_share() {
        let profile = mckenzie();
        let stream = DailyRevenueStream::new(
            &profile,
            date(2025, 5, 15),
            20,
            1,
            &PlantParameters::default(),
        )
        .unwrap();
        let day = stream.iter().next().unwrap();
        let expected = profile.per_day_rate()[4] * (dec!(5.6) / dec!(37970)) * dec!(20);
        assert_eq!(day.date, date(2025, 5, 15));
        assert_eq!(day.revenue, expected);
    }

    #[test]
    fn test_month_changes_at_calendar_boundary() {
        let profile = mckenzie();
        let stream = DailyRevenueStream::new(
            &profile,
            date(2025, 1, 31),
            1,
            2,
            &PlantParameters::default(),
        )
        .unwrap();
        let days: Vec<_> = stream.iter().collect();
        assert_eq!(days[1].date, date(2025, 2, 1));
        assert_ne!(days[0].revenue, days[1].revenue);
        assert_eq!(days[1].revenue, stream.revenue_on(date(2025, 2, 14)));
    }

    #[test]
    fn test_leap_day_uses_february_rate() {
        let stream = DailyRevenueStream::new(
            &mckenzie(),
            date(2028, 2, 28),
            5,
            3,
            &PlantParameters::default(),
        )
        .unwrap();
        let days: Vec<_> = stream.iter().collect();
        assert_eq!(days[1].date, date(2028, 2, 29));
        assert_eq!(days[1].revenue, days[0].revenue);
        assert_eq!(days[2].date, date(2028, 3, 1));
    }

    #[test]
    fn test_cumulative_is_running_sum() {
        // 3000 over June's 30 days at a 1/10 string share and 10 strings: 100 per day
        let mut revenue = vec![Decimal::ZERO; 12];
        revenue[5] = dec!(3000);
        let profile = RevenueProfile::new(revenue, vec![Decimal::ZERO; 12]).unwrap();
        let plant = PlantParameters {
            string_rated_kw: dec!(1),
            plant_rated_kw: dec!(10),
        };
        let stream = DailyRevenueStream::new(&profile, date(2025, 6, 1), 10, 5, &plant).unwrap();
        assert_eq!(
            stream.cumulative(),
            vec![dec!(100), dec!(200), dec!(300), dec!(400), dec!(500)]
        );
        assert_eq!(stream.payback(dec!(250)), Payback::Reached { days: 3 });
    }

    #[test]
    fn test_first_crossing_is_one_based() {
        let totals = [dec!(1), dec!(2), dec!(3)];
        assert_eq!(first_crossing(totals, dec!(1)), Payback::Reached { days: 1 });
        assert_eq!(first_crossing(totals, dec!(2.5)), Payback::Reached { days: 3 });
        assert_eq!(first_crossing(totals, dec!(3.01)), Payback::Unreached);
    }

    #[test]
    fn test_revenue_too_large_for_horizon_is_invalid_profile() {
        let profile =
            RevenueProfile::new(vec![Decimal::MAX / dec!(100); 12], vec![Decimal::ZERO; 12])
                .unwrap();
        let plant = PlantParameters {
            string_rated_kw: dec!(1),
            plant_rated_kw: dec!(1),
        };
        // Best day is February's rate, MAX / 2800
        let result = DailyRevenueStream::new(&profile, date(2025, 5, 15), 1, 3000, &plant);
        assert!(matches!(result, Err(DcHealthError::InvalidProfile(_))));

        let result = DailyRevenueStream::new(&profile, date(2025, 5, 15), 3000, 1, &plant);
        assert!(matches!(result, Err(DcHealthError::InvalidProfile(_))));

        // A single day at one string's share still fits.
        let stream = DailyRevenueStream::new(&profile, date(2025, 5, 15), 1, 1, &plant).unwrap();
        assert_eq!(stream.cumulative().len(), 1);
    }

    #[test]
    fn test_zero_strings_rejected() {
        let result = DailyRevenueStream::new(
            &mckenzie(),
            date(2025, 5, 15),
            0,
            730,
            &PlantParameters::default(),
        );
        assert!(matches!(result, Err(DcHealthError::InvalidInput { .. })));
    }

    #[test]
    fn test_horizon_past_calendar_end_is_date_error() {
        let result = DailyRevenueStream::new(
            &mckenzie(),
            NaiveDate::MAX,
            1,
            2,
            &PlantParameters::default(),
        );
        assert!(matches!(result, Err(DcHealthError::DateError(_))));
    }
}
