use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::ModelConfig;
use crate::payback::fixed_start::FixedStartInput;
use crate::payback::stream::{first_crossing, DailyRevenueStream};
use crate::repair::{estimate_repair_cost, RepairEstimate};
use crate::sites::RevenueProfile;
use crate::types::{Money, Months, Payback};
use crate::DcHealthResult;

/// Cumulative recovered revenue against the repair cost threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossoverSeries {
    pub start_date: NaiveDate,
    pub strings_down: u32,
    pub repair_cost_usd: Money,
    pub crew_days: u32,
    pub payback: Payback,
    pub payback_months: Option<Months>,
    /// Running total of recovered revenue, one entry per day from `start_date`
    pub cumulative_revenue: Vec<Money>,
}

/// A dated point on the cumulative series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRow {
    /// 1-based day count from the start date
    pub day: u32,
    pub date: NaiveDate,
    pub cumulative_revenue: Money,
    /// Cumulative revenue has covered the repair cost
    pub paid_back: bool,
}

impl CrossoverSeries {
    /// Cumulative series paired with calendar dates.
    pub fn rows(&self) -> Vec<SeriesRow> {
        self.start_date
            .iter_days()
            .zip(&self.cumulative_revenue)
            .enumerate()
            .map(|(i, (date, total))| SeriesRow {
                day: i as u32 + 1,
                date,
                cumulative_revenue: *total,
                paid_back: *total >= self.repair_cost_usd,
            })
            .collect()
    }

    /// Calendar date on which payback is reached.
    pub fn payback_date(&self) -> Option<NaiveDate> {
        let days = self.payback.days()?;
        self.start_date.iter_days().nth(days as usize - 1)
    }
}

/// Full cumulative revenue curve for a fixed dispatch date, with its payback.
#[instrument(skip_all, fields(start = %input.start_date, strings = input.strings_down))]
pub fn crossover_series(
    profile: &RevenueProfile,
    input: &FixedStartInput,
    config: &ModelConfig,
) -> DcHealthResult<CrossoverSeries> {
    let estimate = estimate_repair_cost(input.strings_down, &config.crew)?;
    crossover_with_estimate(profile, input.start_date, &estimate, config)
}

pub(crate) fn crossover_with_estimate(
    profile: &RevenueProfile,
    start_date: NaiveDate,
    estimate: &RepairEstimate,
    config: &ModelConfig,
) -> DcHealthResult<CrossoverSeries> {
    let stream = DailyRevenueStream::new(
        profile,
        start_date,
        estimate.strings_down,
        config.horizon.curve_horizon_days,
        &config.plant,
    )?;
    let cumulative_revenue = stream.cumulative();
    let payback = first_crossing(cumulative_revenue.iter().copied(), estimate.total_cost_usd);

    Ok(CrossoverSeries {
        start_date,
        strings_down: estimate.strings_down,
        repair_cost_usd: estimate.total_cost_usd,
        crew_days: estimate.crew_days,
        payback,
        payback_months: payback.months(),
        cumulative_revenue,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payback::fixed_start::payback_for_fixed_start;
    use crate::sites::SiteCatalog;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_series_spans_full_horizon() {
        let catalog = SiteCatalog::builtin();
        let profile = catalog.get("McKenzie", 2025).unwrap();
        let input = FixedStartInput {
            start_date: date(2025, 5, 15),
            strings_down: 20,
        };
        let series = crossover_series(profile, &input, &ModelConfig::default()).unwrap();
        assert_eq!(series.cumulative_revenue.len(), 730);
        assert!(series
            .cumulative_revenue
            .windows(2)
            .all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_crossover_agrees_with_fixed_start() {
        let catalog = SiteCatalog::builtin();
        let profile = catalog.get("AnotherSite", 2025).unwrap();
        let config = ModelConfig::default();
        for strings_down in [1, 7, 40] {
            let input = FixedStartInput {
                start_date: date(2025, 9, 1),
                strings_down,
            };
            let series = crossover_series(profile, &input, &config).unwrap();
            let summary = payback_for_fixed_start(profile, &input, &config).unwrap();
            assert_eq!(series.payback, summary.payback);
            assert_eq!(series.repair_cost_usd, summary.repair_cost_usd);
        }
    }

    #[test]
    fn test_rows_mark_payback_and_dates() {
        let catalog = SiteCatalog::builtin();
        let profile = catalog.get("McKenzie", 2025).unwrap();
        let input = FixedStartInput {
            start_date: date(2025, 5, 15),
            strings_down: 20,
        };
        let series = crossover_series(profile, &input, &ModelConfig::default()).unwrap();
        let rows = series.rows();
        let days = series.payback.days().unwrap() as usize;

        assert_eq!(rows.len(), 730);
        assert_eq!(rows[0].date, date(2025, 5, 15));
        assert!(!rows[days - 2].paid_back);
        assert!(rows[days - 1].paid_back);
        assert_eq!(series.payback_date(), Some(rows[days - 1].date));
    }

    #[test]
    fn test_unreached_series_has_no_payback_date() {
        let profile = RevenueProfile::new(vec![Decimal::ZERO; 12], vec![Decimal::ZERO; 12]).unwrap();
        let input = FixedStartInput {
            start_date: date(2025, 1, 1),
            strings_down: 3,
        };
        let series = crossover_series(&profile, &input, &ModelConfig::default()).unwrap();
        assert_eq!(series.payback, Payback::Unreached);
        assert_eq!(series.payback_date(), None);
        assert_eq!(series.cumulative_revenue.last(), Some(&dec!(0)));
    }
}
