use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::CrewParameters;
use crate::error::DcHealthError;
use crate::types::Money;
use crate::DcHealthResult;

const MINUTES_PER_HOUR: Decimal = dec!(60);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// One hypothetical repair of a number of failed strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairJob {
    strings_down: u32,
}

impl RepairJob {
    pub fn new(strings_down: u32) -> DcHealthResult<Self> {
        if strings_down == 0 {
            return Err(DcHealthError::invalid_input(
                "strings_down",
                "At least one string must be down",
            ));
        }
        Ok(Self { strings_down })
    }

    pub fn strings_down(&self) -> u32 {
        self.strings_down
    }

    /// Combiner boxes that need diagnosing, never fewer than one.
    pub fn combiner_box_count(&self, strings_per_box: u32) -> u32 {
        self.strings_down.div_ceil(strings_per_box.max(1)).max(1)
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Crew time and cost to repair a number of failed strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairEstimate {
    pub strings_down: u32,
    pub combiner_box_count: u32,
    /// Diagnostic minutes across all combiner boxes
    pub diagnostic_minutes: u64,
    /// Locate plus repair minutes across all strings
    pub per_string_minutes: u64,
    /// Diagnostic plus per-string minutes, before splitting across the crew
    pub variable_minutes: u64,
    /// Days on site, at least one
    pub crew_days: u32,
    /// Elapsed minutes per technician including daily travel and safety
    pub total_minutes: Decimal,
    pub labor_cost: Money,
    pub travel_cost: Money,
    pub total_cost_usd: Money,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Estimate crew days and total cost for a repair.
///
/// Variable work (combiner box diagnosis, locating and repairing each string)
/// is shared by the crew and packed into whatever part of the workday is left
/// after travel and safety. Every crew day pays the fixed minutes and a travel
/// expense per technician.
pub fn estimate_repair_cost(
    strings_down: u32,
    crew: &CrewParameters,
) -> DcHealthResult<RepairEstimate> {
    let job = RepairJob::new(strings_down)?;
    crew.validate()?;

    let team = u64::from(crew.team_size);
    let fixed_per_day = u64::from(crew.fixed_minutes_per_day());
    let variable_per_day = u64::from(crew.variable_minutes_per_day()?);

    let too_large = || {
        DcHealthError::Configuration(format!(
            "repair of {strings_down} strings is out of range for the crew parameters"
        ))
    };

    let combiner_box_count = job.combiner_box_count(crew.strings_per_combiner_box);
    let diagnostic_minutes = u64::from(combiner_box_count) * u64::from(crew.diag_minutes_per_box);
    let per_string_minutes = u64::from(strings_down)
        .checked_mul(
            u64::from(crew.locate_minutes_per_string) + u64::from(crew.repair_minutes_per_string),
        )
        .ok_or_else(too_large)?;
    let variable_minutes = diagnostic_minutes
        .checked_add(per_string_minutes)
        .ok_or_else(too_large)?;

    let crew_days = variable_minutes
        .div_ceil(variable_per_day * team)
        .max(1);
    let crew_days = u32::try_from(crew_days).map_err(|_| {
        DcHealthError::invalid_input(
            "strings_down",
            format!("{strings_down} strings would need more than {} crew days", u32::MAX),
        )
    })?;

    let team_dec = Decimal::from(crew.team_size);
    let days_dec = Decimal::from(crew_days);
    let total_minutes = Decimal::from(variable_minutes) / team_dec
        + Decimal::from(fixed_per_day) * days_dec;

    let labor_cost = (total_minutes / MINUTES_PER_HOUR)
        .checked_mul(crew.labor_rate_per_hour)
        .and_then(|c| c.checked_mul(team_dec))
        .ok_or_else(too_large)?;
    let travel_cost = days_dec
        .checked_mul(crew.travel_cost_per_day)
        .and_then(|c| c.checked_mul(team_dec))
        .ok_or_else(too_large)?;
    let total_cost_usd = labor_cost.checked_add(travel_cost).ok_or_else(too_large)?;

    tracing::debug!(
        strings_down,
        crew_days,
        total_cost_usd = %total_cost_usd,
        "estimated repair cost"
    );

    Ok(RepairEstimate {
        strings_down,
        combiner_box_count,
        diagnostic_minutes,
        per_string_minutes,
        variable_minutes,
        crew_days,
        total_minutes,
        labor_cost,
        travel_cost,
        total_cost_usd,
    })
}
