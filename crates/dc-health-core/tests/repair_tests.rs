use dc_health_core::repair::{estimate_repair_cost, RepairCostCurve, RepairJob};
use dc_health_core::{CrewParameters, DcHealthError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Repair cost estimate
// ===========================================================================

#[test]
fn test_crew_days_at_least_one_and_non_decreasing() {
    let crew = CrewParameters::default();
    let mut previous_days = 0;
    let mut previous_cost = Decimal::ZERO;
    for strings in 1..=250 {
        let est = estimate_repair_cost(strings, &crew).unwrap();
        assert!(est.crew_days >= 1);
        assert!(
            est.crew_days >= previous_days,
            "crew days fell at {strings} strings"
        );
        assert!(
            est.total_cost_usd >= previous_cost,
            "cost fell at {strings} strings"
        );
        previous_days = est.crew_days;
        previous_cost = est.total_cost_usd;
    }
}

#[test]
fn test_combiner_box_count_rounds_up_by_five() {
    let crew = CrewParameters::default();
    assert_eq!(estimate_repair_cost(5, &crew).unwrap().combiner_box_count, 1);
    assert_eq!(estimate_repair_cost(6, &crew).unwrap().combiner_box_count, 2);
    assert_eq!(RepairJob::new(1).unwrap().combiner_box_count(5), 1);
}

#[test]
fn test_reference_costs() {
    let crew = CrewParameters::default();
    // (strings, crew days, total cost)
    let cases = [
        (1, 1, dec!(1487.01)),
        (5, 1, dec!(2139.21)),
        (6, 2, dec!(3626.22)),
        (20, 4, dec!(8556.84)),
        (50, 9, dec!(20133.36)),
        (100, 18, dec!(40266.72)),
    ];
    for (strings, days, cost) in cases {
        let est = estimate_repair_cost(strings, &crew).unwrap();
        assert_eq!(est.crew_days, days, "crew days for {strings} strings");
        assert_eq!(est.total_cost_usd, cost, "cost for {strings} strings");
    }
}

#[test]
fn test_cost_splits_into_labor_and_travel() {
    let est = estimate_repair_cost(37, &CrewParameters::default()).unwrap();
    assert_eq!(est.labor_cost + est.travel_cost, est.total_cost_usd);
    assert_eq!(
        est.travel_cost,
        Decimal::from(est.crew_days) * dec!(75) * dec!(2)
    );
}

#[test]
fn test_parameters_can_be_varied() {
    let crew = CrewParameters {
        labor_rate_per_hour: dec!(100),
        travel_cost_per_day: Decimal::ZERO,
        ..CrewParameters::default()
    };
    // 20 strings: 1830 minutes per technician, two technicians at 100/h
    let est = estimate_repair_cost(20, &crew).unwrap();
    assert_eq!(est.total_cost_usd, dec!(6100));
}

#[test]
fn test_one_minute_of_variable_time_still_works() {
    let crew = CrewParameters {
        workday_minutes: 256,
        ..CrewParameters::default()
    };
    let est = estimate_repair_cost(1, &crew).unwrap();
    // 105 minutes of work at 2 crew-minutes per day
    assert_eq!(est.crew_days, 53);
}

#[test]
fn test_invalid_inputs() {
    let crew = CrewParameters::default();
    assert!(matches!(
        estimate_repair_cost(0, &crew),
        Err(DcHealthError::InvalidInput { .. })
    ));

    let crew = CrewParameters {
        workday_minutes: 255,
        ..CrewParameters::default()
    };
    assert!(matches!(
        estimate_repair_cost(1, &crew),
        Err(DcHealthError::Configuration(_))
    ));
}

// ===========================================================================
// Repair cost curve
// ===========================================================================

#[test]
fn test_default_curve_matches_individual_estimates() {
    let crew = CrewParameters::default();
    let curve = RepairCostCurve::build(100, &crew).unwrap();
    assert!(curve.is_non_decreasing());
    for strings in [1, 5, 6, 20, 99, 100] {
        assert_eq!(
            curve.get(strings).unwrap(),
            &estimate_repair_cost(strings, &crew).unwrap()
        );
    }
}

#[test]
fn test_curve_is_idempotent() {
    let crew = CrewParameters::default();
    let a = RepairCostCurve::build(100, &crew).unwrap();
    let b = RepairCostCurve::build(100, &crew).unwrap();
    assert_eq!(a, b);
}
