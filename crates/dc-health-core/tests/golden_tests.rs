//! End-to-end regression checks against recorded outputs for the built-in
//! McKenzie site.

use chrono::NaiveDate;
use dc_health_core::payback::{
    crossover_series, earliest_dispatch_meeting_target, payback_for_fixed_start, PaybackQuery,
};
use dc_health_core::{DcHealthConfig, DcHealthError, Payback};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn mckenzie_query() -> PaybackQuery {
    PaybackQuery {
        site: "McKenzie".into(),
        year: 2025,
        month: 5,
        day: 15,
        strings_down: 20,
        dispatch_delay_days: 0,
        target_payback_months: None,
    }
}

#[test]
fn test_mckenzie_2025_twenty_strings_mid_may() {
    let config = DcHealthConfig::default();
    let query = mckenzie_query();
    let profile = query.profile(&config.sites).unwrap();
    let input = query.fixed_start_input().unwrap();

    let summary = payback_for_fixed_start(profile, &input, &config.model).unwrap();
    assert_eq!(summary.start_date, NaiveDate::from_ymd_opt(2025, 5, 15).unwrap());
    assert_eq!(summary.repair_cost_usd, dec!(8556.84));
    assert_eq!(summary.crew_days, 4);
    assert_eq!(summary.payback, Payback::Reached { days: 66 });
    assert_eq!(summary.payback_months, Some(dec!(2.1682)));

    let series = crossover_series(profile, &input, &config.model).unwrap();
    assert_eq!(series.payback, summary.payback);
    assert_eq!(series.payback_date(), NaiveDate::from_ymd_opt(2025, 7, 19));
    assert_eq!(series.cumulative_revenue.len(), 730);
}

#[test]
fn test_mckenzie_2025_target_search() {
    let config = DcHealthConfig::default();
    let mut query = mckenzie_query();
    query.target_payback_months = Some(dec!(2.5));
    let profile = query.profile(&config.sites).unwrap();

    let outcome = earliest_dispatch_meeting_target(
        profile,
        &query.dispatch_search_input().unwrap(),
        &config.model,
    )
    .unwrap();
    let plan = outcome.plan().expect("2.5 months is reachable from mid May");
    assert_eq!(plan.found_date, NaiveDate::from_ymd_opt(2025, 5, 15).unwrap());
    assert_eq!(plan.total_days, 66);

    query.target_payback_months = Some(dec!(2.0));
    let outcome = earliest_dispatch_meeting_target(
        profile,
        &query.dispatch_search_input().unwrap(),
        &config.model,
    )
    .unwrap();
    assert!(outcome.plan().is_none());
}

#[test]
fn test_config_file_overrides_flow_through() {
    let json = r#"{
        "model": {
            "crew": { "labor_rate_per_hour": "100", "travel_cost_per_day": "0" }
        },
        "sites": {
            "Flat": {
                "2025": {
                    "monthly_revenue": ["3100","2800","3100","3000","3100","3000",
                                        "3100","3100","3000","3100","3000","3100"],
                    "monthly_production_mwh": ["1","1","1","1","1","1","1","1","1","1","1","1"]
                }
            }
        }
    }"#;
    let config = DcHealthConfig::from_json_str(json).unwrap();
    assert_eq!(config.sites.site_names(), vec!["Flat"]);

    let query = PaybackQuery {
        site: "Flat".into(),
        year: 2025,
        month: 1,
        day: 1,
        strings_down: 20,
        dispatch_delay_days: 0,
        target_payback_months: None,
    };
    let profile = query.profile(&config.sites).unwrap();
    assert_eq!(profile.per_day_rate()[1], dec!(100));

    let summary =
        payback_for_fixed_start(profile, &query.fixed_start_input().unwrap(), &config.model)
            .unwrap();
    assert_eq!(summary.repair_cost_usd, dec!(6100));
    // 100/day across the whole plant is a rounding error for 20 strings
    assert_eq!(summary.payback, Payback::Unreached);
}

#[test]
fn test_oversized_site_revenue_is_an_error_not_a_panic() {
    let big = "\"792281625142643375935439503\"";
    let months = vec![big; 12].join(",");
    let json = format!(
        r#"{{
            "model": {{
                "plant": {{ "string_rated_kw": "1", "plant_rated_kw": "1" }},
                "horizon": {{ "curve_horizon_days": 3000 }}
            }},
            "sites": {{ "Huge": {{ "2025": {{
                "monthly_revenue": [{months}],
                "monthly_production_mwh": [{months}]
            }} }} }}
        }}"#
    );
    let config = DcHealthConfig::from_json_str(&json).unwrap();

    let query = PaybackQuery {
        site: "Huge".into(),
        strings_down: 1,
        ..mckenzie_query()
    };
    let profile = query.profile(&config.sites).unwrap();
    let result =
        payback_for_fixed_start(profile, &query.fixed_start_input().unwrap(), &config.model);
    assert!(matches!(result, Err(DcHealthError::InvalidProfile(_))));

    let months = vec!["\"7922816251426433759354395033\""; 12].join(",");
    let json = format!(
        r#"{{ "sites": {{ "Huge": {{ "2025": {{
            "monthly_revenue": [{months}],
            "monthly_production_mwh": [{months}]
        }} }} }} }}"#
    );
    assert!(DcHealthConfig::from_json_str(&json).is_err());
}
