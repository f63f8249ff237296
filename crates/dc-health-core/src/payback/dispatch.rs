use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::calendar;
use crate::config::ModelConfig;
use crate::error::DcHealthError;
use crate::payback::crossover::crossover_with_estimate;
use crate::payback::stream::DailyRevenueStream;
use crate::repair::estimate_repair_cost;
use crate::sites::RevenueProfile;
use crate::types::{Money, Months, Payback};
use crate::DcHealthResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Search for the earliest dispatch whose delay plus payback fits a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchSearchInput {
    /// Date the outage is acknowledged; delays count from here
    pub earliest_start: NaiveDate,
    pub strings_down: u32,
    /// Longest acceptable delay plus payback, in average-length months
    pub target_payback_months: Months,
    /// First delay scanned
    #[serde(default)]
    pub min_delay_days: u32,
    /// Exclusive upper bound on the scanned delay; the model horizon when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_delay_days: Option<u32>,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// The first dispatch that meets the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchPlan {
    pub found_date: NaiveDate,
    pub delay_days: u32,
    /// Payback counted from the dispatch date
    pub payback_days: u32,
    /// Delay plus payback
    pub total_days: u32,
    pub total_months: Months,
    pub repair_cost_usd: Money,
    /// Running total of recovered revenue from `found_date`
    pub cumulative_revenue: Vec<Money>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchSearchOutcome {
    Found(DispatchPlan),
    NotFound {
        delays_scanned: u32,
        repair_cost_usd: Money,
    },
}

impl DispatchSearchOutcome {
    pub fn plan(&self) -> Option<&DispatchPlan> {
        match self {
            DispatchSearchOutcome::Found(plan) => Some(plan),
            DispatchSearchOutcome::NotFound { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Scan dispatch delays in increasing order and return the first whose
/// delay plus payback is within the target.
///
/// The scan stops at the first qualifying delay, so the result is the earliest
/// acceptable date rather than the shortest possible payback.
#[instrument(skip_all, fields(start = %input.earliest_start, strings = input.strings_down))]
pub fn earliest_dispatch_meeting_target(
    profile: &RevenueProfile,
    input: &DispatchSearchInput,
    config: &ModelConfig,
) -> DcHealthResult<DispatchSearchOutcome> {
    if input.target_payback_months <= Decimal::ZERO {
        return Err(DcHealthError::invalid_input(
            "target_payback_months",
            format!(
                "Target payback must be positive, got {}",
                input.target_payback_months
            ),
        ));
    }
    let estimate = estimate_repair_cost(input.strings_down, &config.crew)?;
    let max_delay = input
        .max_delay_days
        .unwrap_or(config.horizon.max_dispatch_delay_days);

    let mut delays_scanned = 0;
    for delay in input.min_delay_days..max_delay {
        delays_scanned += 1;
        let candidate = calendar::add_days(input.earliest_start, delay)?;
        let stream = DailyRevenueStream::new(
            profile,
            candidate,
            input.strings_down,
            config.horizon.curve_horizon_days,
            &config.plant,
        )?;
        let Payback::Reached { days } = stream.payback(estimate.total_cost_usd) else {
            continue;
        };

        let total_days = delay + days;
        if calendar::days_to_months(total_days) <= input.target_payback_months {
            tracing::debug!(%candidate, delay, total_days, "dispatch target met");
            let series = crossover_with_estimate(profile, candidate, &estimate, config)?;
            return Ok(DispatchSearchOutcome::Found(DispatchPlan {
                found_date: candidate,
                delay_days: delay,
                payback_days: days,
                total_days,
                total_months: calendar::display_months(total_days),
                repair_cost_usd: estimate.total_cost_usd,
                cumulative_revenue: series.cumulative_revenue,
            }));
        }
    }

    tracing::debug!(delays_scanned, "no dispatch meets target");
    Ok(DispatchSearchOutcome::NotFound {
        delays_scanned,
        repair_cost_usd: estimate.total_cost_usd,
    })
}
