use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::ModelConfig;
use crate::payback::stream::DailyRevenueStream;
use crate::repair::{estimate_repair_cost, RepairCostCurve, RepairEstimate};
use crate::sites::RevenueProfile;
use crate::types::{Money, Months, Payback};
use crate::DcHealthResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Repair dispatched on a known date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedStartInput {
    /// First day the repaired strings produce again
    pub start_date: NaiveDate,
    pub strings_down: u32,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Payback of a single repair dispatched on a fixed date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaybackSummary {
    pub start_date: NaiveDate,
    pub strings_down: u32,
    pub repair_cost_usd: Money,
    pub crew_days: u32,
    pub payback: Payback,
    /// Payback in average-length months, for display
    pub payback_months: Option<Months>,
    pub horizon_days: u32,
}

/// One string count on the payback-vs-strings curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaybackCurvePoint {
    pub strings_down: u32,
    pub repair_cost_usd: Money,
    pub payback: Payback,
    pub payback_months: Option<Months>,
}

/// Payback for every string count from 1 to the curve maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaybackCurve {
    pub start_date: NaiveDate,
    pub horizon_days: u32,
    pub points: Vec<PaybackCurvePoint>,
    /// Whether payback happened to never shorten as strings increased.
    /// Cost and recovered revenue both grow with strings, so this is observed,
    /// not guaranteed.
    pub monotonic_non_decreasing: bool,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Days of recovered revenue needed to cover the repair cost when the crew
/// restores the strings on `start_date`.
#[instrument(skip_all, fields(start = %input.start_date, strings = input.strings_down))]
pub fn payback_for_fixed_start(
    profile: &RevenueProfile,
    input: &FixedStartInput,
    config: &ModelConfig,
) -> DcHealthResult<PaybackSummary> {
    let estimate = estimate_repair_cost(input.strings_down, &config.crew)?;
    payback_with_estimate(profile, input.start_date, &estimate, config)
}

pub(crate) fn payback_with_estimate(
    profile: &RevenueProfile,
    start_date: NaiveDate,
    estimate: &RepairEstimate,
    config: &ModelConfig,
) -> DcHealthResult<PaybackSummary> {
    let horizon_days = config.horizon.curve_horizon_days;
    let stream = DailyRevenueStream::new(
        profile,
        start_date,
        estimate.strings_down,
        horizon_days,
        &config.plant,
    )?;
    let payback = stream.payback(estimate.total_cost_usd);

    tracing::debug!(?payback, cost = %estimate.total_cost_usd, "fixed-start payback");

    Ok(PaybackSummary {
        start_date,
        strings_down: estimate.strings_down,
        repair_cost_usd: estimate.total_cost_usd,
        crew_days: estimate.crew_days,
        payback,
        payback_months: payback.months(),
        horizon_days,
    })
}

/// Sweep fixed-start payback over strings 1..=`curve_max_strings`.
pub fn payback_curve(
    profile: &RevenueProfile,
    start_date: NaiveDate,
    config: &ModelConfig,
) -> DcHealthResult<PaybackCurve> {
    let costs = RepairCostCurve::build(config.horizon.curve_max_strings, &config.crew)?;
    payback_curve_with_costs(profile, start_date, &costs, config)
}

/// Payback sweep reusing an already built repair cost curve.
#[instrument(skip_all, fields(start = %start_date, max_strings = costs.max_strings()))]
pub fn payback_curve_with_costs(
    profile: &RevenueProfile,
    start_date: NaiveDate,
    costs: &RepairCostCurve,
    config: &ModelConfig,
) -> DcHealthResult<PaybackCurve> {
    let mut points = Vec::with_capacity(costs.points.len());
    for estimate in &costs.points {
        let summary = payback_with_estimate(profile, start_date, estimate, config)?;
        points.push(PaybackCurvePoint {
            strings_down: summary.strings_down,
            repair_cost_usd: summary.repair_cost_usd,
            payback: summary.payback,
            payback_months: summary.payback_months,
        });
    }

    let monotonic_non_decreasing = points.windows(2).all(|w| w[1].payback >= w[0].payback);

    Ok(PaybackCurve {
        start_date,
        horizon_days: config.horizon.curve_horizon_days,
        points,
        monotonic_non_decreasing,
    })
}
