use clap::Args;
use serde_json::{json, Value};
use std::time::Instant;

use dc_health_core::repair::{estimate_repair_cost, RepairCostCurve};
use dc_health_core::DcHealthConfig;

use super::envelope;

/// Arguments for a single repair estimate
#[derive(Args)]
pub struct RepairCostArgs {
    /// Number of failed strings
    #[arg(long)]
    pub strings: u32,
}

/// Arguments for the repair cost curve
#[derive(Args)]
pub struct RepairCurveArgs {
    /// Largest string count on the curve (defaults to the configured maximum)
    #[arg(long)]
    pub max_strings: Option<u32>,
}

pub fn run_repair_cost(
    args: RepairCostArgs,
    config: &DcHealthConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let estimate = estimate_repair_cost(args.strings, &config.model.crew)?;
    envelope(
        "Crew repair estimate: combiner box diagnosis plus per-string locate and repair, \
         packed into workdays after travel and safety",
        &config.model.crew,
        Vec::new(),
        started,
        estimate,
    )
}

pub fn run_repair_curve(
    args: RepairCurveArgs,
    config: &DcHealthConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let max_strings = args
        .max_strings
        .unwrap_or(config.model.horizon.curve_max_strings);
    let curve = RepairCostCurve::build(max_strings, &config.model.crew)?;

    let mut warnings = Vec::new();
    if !curve.is_non_decreasing() {
        warnings.push("Repair cost falls somewhere along the curve; check crew parameters".into());
    }

    envelope(
        "Crew repair estimate swept over string counts",
        &json!({ "crew": config.model.crew, "max_strings": max_strings }),
        warnings,
        started,
        curve,
    )
}
