use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::time::Instant;

use dc_health_core::payback::{
    crossover_series, earliest_dispatch_meeting_target, payback_curve, DispatchSearchOutcome,
};
use dc_health_core::DcHealthConfig;

use super::{envelope, QueryArgs};

const DEFAULT_TARGET_PAYBACK_MONTHS: Decimal = Decimal::TWO;

/// Arguments for the payback-vs-strings curve
#[derive(Args)]
pub struct PaybackCurveArgs {
    #[command(flatten)]
    pub query: QueryArgs,
}

/// Arguments for the cumulative revenue crossover series
#[derive(Args)]
pub struct CrossoverArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Number of failed strings (1-100, default 20); overrides `--input`
    #[arg(long)]
    pub strings: Option<u32>,
}

/// Arguments for the earliest dispatch search
#[derive(Args)]
pub struct DispatchArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Number of failed strings (1-100, default 20); overrides `--input`
    #[arg(long)]
    pub strings: Option<u32>,

    /// Target months from the selected date to full payback (0.5-12, default 2.0);
    /// overrides `--input`
    #[arg(long)]
    pub target: Option<Decimal>,
}

pub fn run_payback_curve(
    args: PaybackCurveArgs,
    config: &DcHealthConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let query = args.query.resolve(None, None)?;
    let profile = query.profile(&config.sites)?;
    let start = query.dispatch_date()?;
    let curve = payback_curve(profile, start, &config.model)?;

    let mut warnings = Vec::new();
    if !curve.monotonic_non_decreasing {
        warnings.push(
            "Payback is not monotonic in strings down: crew-day steps in repair cost \
             can make more failures pay back sooner"
                .to_string(),
        );
    }
    let unreached = curve
        .points
        .iter()
        .filter(|p| !p.payback.is_reached())
        .count();
    if unreached > 0 {
        warnings.push(format!(
            "{unreached} string counts do not pay back within {} days",
            curve.horizon_days
        ));
    }

    envelope(
        "Fixed-start payback swept over strings down: first day cumulative recovered \
         revenue reaches the crew repair cost",
        &json!({
            "site": query.site,
            "year": query.year,
            "dispatch_date": start,
            "model": config.model,
        }),
        warnings,
        started,
        curve,
    )
}

pub fn run_crossover(
    args: CrossoverArgs,
    config: &DcHealthConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let query = args.query.resolve(args.strings, None)?;
    let profile = query.profile(&config.sites)?;
    let input = query.fixed_start_input()?;
    let series = crossover_series(profile, &input, &config.model)?;

    let mut warnings = Vec::new();
    if !series.payback.is_reached() {
        warnings.push(format!(
            "Recovered revenue does not reach the repair cost within {} days",
            series.cumulative_revenue.len()
        ));
    }

    envelope(
        "Cumulative recovered revenue from the dispatch date against a flat repair cost",
        &json!({
            "site": query.site,
            "year": query.year,
            "dispatch_delay_days": query.dispatch_delay_days,
            "model": config.model,
        }),
        warnings,
        started,
        series,
    )
}

pub fn run_dispatch(
    args: DispatchArgs,
    config: &DcHealthConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let mut query = args.query.resolve(args.strings, args.target)?;
    if query.target_payback_months.is_none() {
        query.target_payback_months = Some(DEFAULT_TARGET_PAYBACK_MONTHS);
    }
    let profile = query.profile(&config.sites)?;
    let input = query.dispatch_search_input()?;
    let outcome = earliest_dispatch_meeting_target(profile, &input, &config.model)?;

    let mut warnings = Vec::new();
    if let DispatchSearchOutcome::NotFound { delays_scanned, .. } = &outcome {
        warnings.push(format!(
            "No dispatch within {delays_scanned} scanned days meets a {} month payback",
            input.target_payback_months
        ));
    }

    envelope(
        "Scan dispatch delays upward from the selected date and stop at the first \
         whose delay plus payback fits the target",
        &json!({
            "site": query.site,
            "year": query.year,
            "earliest_start": input.earliest_start,
            "target_payback_months": input.target_payback_months,
            "model": config.model,
        }),
        warnings,
        started,
        outcome,
    )
}
