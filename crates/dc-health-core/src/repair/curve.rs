use serde::{Deserialize, Serialize};

use crate::config::CrewParameters;
use crate::error::DcHealthError;
use crate::repair::estimate::{estimate_repair_cost, RepairEstimate};
use crate::DcHealthResult;

/// Repair estimates for every string count from 1 up to a maximum.
///
/// Doubles as a memo table: the payback sweep looks costs up here instead of
/// re-estimating each string count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairCostCurve {
    pub points: Vec<RepairEstimate>,
}

impl RepairCostCurve {
    pub fn build(max_strings: u32, crew: &CrewParameters) -> DcHealthResult<Self> {
        if max_strings == 0 {
            return Err(DcHealthError::invalid_input(
                "max_strings",
                "Curve must cover at least one string",
            ));
        }
        let points = (1..=max_strings)
            .map(|strings| estimate_repair_cost(strings, crew))
            .collect::<DcHealthResult<Vec<_>>>()?;
        Ok(Self { points })
    }

    /// Estimate for `strings_down`, if it falls inside the curve.
    pub fn get(&self, strings_down: u32) -> Option<&RepairEstimate> {
        let index = usize::try_from(strings_down).ok()?.checked_sub(1)?;
        self.points.get(index)
    }

    pub fn max_strings(&self) -> u32 {
        self.points.len() as u32
    }

    /// True when both crew days and cost never fall as strings increase.
    pub fn is_non_decreasing(&self) -> bool {
        self.points.windows(2).all(|w| {
            w[1].crew_days >= w[0].crew_days && w[1].total_cost_usd >= w[0].total_cost_usd
        })
    }
}
