use std::time::Instant;

use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Serialize;

use dc_health_core::payback::{self, DispatchSearchOutcome, PaybackQuery};
use dc_health_core::repair::{self, RepairCostCurve};
use dc_health_core::{with_metadata, DcHealthConfig};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse an optional configuration document, falling back to the defaults.
fn load_config(config_json: Option<String>) -> NapiResult<DcHealthConfig> {
    match config_json {
        Some(json) => DcHealthConfig::from_json_str(&json).map_err(to_napi_error),
        None => Ok(DcHealthConfig::default()),
    }
}

fn parse_query(query_json: &str) -> NapiResult<PaybackQuery> {
    let query: PaybackQuery = serde_json::from_str(query_json).map_err(to_napi_error)?;
    query.validate().map_err(to_napi_error)?;
    Ok(query)
}

fn envelope<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    started: Instant,
    result: T,
) -> NapiResult<String> {
    let output = with_metadata(
        methodology,
        assumptions,
        warnings,
        started.elapsed().as_micros() as u64,
        result,
    );
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Repair cost
// ---------------------------------------------------------------------------

#[napi]
pub fn estimate_repair_cost(strings_down: u32, config_json: Option<String>) -> NapiResult<String> {
    let started = Instant::now();
    let config = load_config(config_json)?;
    let estimate =
        repair::estimate_repair_cost(strings_down, &config.model.crew).map_err(to_napi_error)?;
    envelope(
        "Crew repair estimate",
        &config.model.crew,
        Vec::new(),
        started,
        estimate,
    )
}

#[napi]
pub fn repair_cost_curve(
    max_strings: Option<u32>,
    config_json: Option<String>,
) -> NapiResult<String> {
    let started = Instant::now();
    let config = load_config(config_json)?;
    let max_strings = max_strings.unwrap_or(config.model.horizon.curve_max_strings);
    let curve = RepairCostCurve::build(max_strings, &config.model.crew).map_err(to_napi_error)?;
    envelope(
        "Crew repair estimate swept over string counts",
        &config.model.crew,
        Vec::new(),
        started,
        curve,
    )
}

// ---------------------------------------------------------------------------
// Payback
// ---------------------------------------------------------------------------

#[napi]
pub fn payback_for_fixed_start(
    query_json: String,
    config_json: Option<String>,
) -> NapiResult<String> {
    let started = Instant::now();
    let config = load_config(config_json)?;
    let query = parse_query(&query_json)?;
    let profile = query.profile(&config.sites).map_err(to_napi_error)?;
    let input = query.fixed_start_input().map_err(to_napi_error)?;
    let summary =
        payback::payback_for_fixed_start(profile, &input, &config.model).map_err(to_napi_error)?;

    let mut warnings = Vec::new();
    if !summary.payback.is_reached() {
        warnings.push(format!("No payback within {} days", summary.horizon_days));
    }
    envelope("Fixed-start payback", &query, warnings, started, summary)
}

#[napi]
pub fn payback_curve(query_json: String, config_json: Option<String>) -> NapiResult<String> {
    let started = Instant::now();
    let config = load_config(config_json)?;
    let query = parse_query(&query_json)?;
    let profile = query.profile(&config.sites).map_err(to_napi_error)?;
    let start = query.dispatch_date().map_err(to_napi_error)?;
    let curve = payback::payback_curve(profile, start, &config.model).map_err(to_napi_error)?;

    let mut warnings = Vec::new();
    if !curve.monotonic_non_decreasing {
        warnings.push("Payback is not monotonic in strings down".to_string());
    }
    envelope(
        "Fixed-start payback swept over strings down",
        &query,
        warnings,
        started,
        curve,
    )
}

#[napi]
pub fn crossover_series(query_json: String, config_json: Option<String>) -> NapiResult<String> {
    let started = Instant::now();
    let config = load_config(config_json)?;
    let query = parse_query(&query_json)?;
    let profile = query.profile(&config.sites).map_err(to_napi_error)?;
    let input = query.fixed_start_input().map_err(to_napi_error)?;
    let series =
        payback::crossover_series(profile, &input, &config.model).map_err(to_napi_error)?;

    let mut warnings = Vec::new();
    if !series.payback.is_reached() {
        warnings.push("Recovered revenue does not reach the repair cost".to_string());
    }
    envelope(
        "Cumulative recovered revenue against repair cost",
        &query,
        warnings,
        started,
        series,
    )
}

#[napi]
pub fn earliest_dispatch(query_json: String, config_json: Option<String>) -> NapiResult<String> {
    let started = Instant::now();
    let config = load_config(config_json)?;
    let query = parse_query(&query_json)?;
    let profile = query.profile(&config.sites).map_err(to_napi_error)?;
    let input = query.dispatch_search_input().map_err(to_napi_error)?;
    let outcome = payback::earliest_dispatch_meeting_target(profile, &input, &config.model)
        .map_err(to_napi_error)?;

    let mut warnings = Vec::new();
    if matches!(outcome, DispatchSearchOutcome::NotFound { .. }) {
        warnings.push(format!(
            "No dispatch date meets a {} month payback",
            input.target_payback_months.round_dp(2)
        ));
    }
    envelope(
        "Earliest dispatch meeting a target payback",
        &query,
        warnings,
        started,
        outcome,
    )
}

