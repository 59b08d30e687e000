use investor_state_core::lroma::{LromaCalculator, VehicleParameters, DEFAULT_TARGET_LROMA};
use investor_state_core::presets::{fcev_reference, fleet};
use investor_state_core::time_value::{present_value, PeriodOrigin};
use investor_state_core::{InvestorStateError, ParameterRanges};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Reference vehicle
// ===========================================================================

#[test]
fn test_fcev_reference_run() {
    // annual profit = 100,000 * (25.00 - 13.20) = 1,180,000
    // NPV = -4,800,000 + 1,180,000 * 5.7466 ≈ 1,981,034
    // PV(distance) = 100,000 * 5.7466 ≈ 574,664
    let calc = LromaCalculator::new(fleet());
    let lroma = calc.calculate_vehicle("fcev").unwrap();
    let as_float = lroma.to_f64().unwrap();
    assert!(as_float.is_finite() && as_float > 0.0);
    assert!(
        (lroma - dec!(3.4473)).abs() < dec!(0.0001),
        "Expected LROMA ~3.4473/km, got {lroma}"
    );
}

#[test]
fn test_lroma_is_idempotent() {
    let calc = LromaCalculator::default();
    let params = fcev_reference();
    let first = calc.calculate_lroma(&params).unwrap();
    let second = calc.calculate_lroma(&params).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.serialize(), second.serialize());
}

// ===========================================================================
// Sign properties
// ===========================================================================

#[test]
fn test_freight_equal_to_tco_loses_the_capex() {
    // Zero margin: NPV is exactly -capex, so LROMA = -capex / PV(distance) < 0
    let mut params = fcev_reference();
    params.freight_rate = params.tco_per_km;
    let lroma = LromaCalculator::default().calculate_lroma(&params).unwrap();

    let pv_distance = present_value(
        dec!(0.08),
        &[dec!(100000); 8],
        PeriodOrigin::FirstPeriod,
    )
    .unwrap();
    assert_eq!(lroma, dec!(-4800000) / pv_distance);
    assert!(lroma < Decimal::ZERO);
}

#[test]
fn test_positive_margin_without_capex_returns_margin() {
    let calc = LromaCalculator::default();
    for (freight, tco, rate, life) in [
        (dec!(25.00), dec!(13.20), dec!(0.08), 8),
        (dec!(3.10), dec!(3.00), dec!(0.12), 1),
        (dec!(40), dec!(10), dec!(0), 20),
        (dec!(14), dec!(13.99), dec!(0.30), 5),
    ] {
        let params = VehicleParameters {
            capex: Some(Decimal::ZERO),
            annual_distance: Some(dec!(80000)),
            tco_per_km: Some(tco),
            freight_rate: Some(freight),
            discount_rate: Some(rate),
            vehicle_life: Some(life),
        };
        let lroma = calc.calculate_lroma(&params).unwrap();
        assert!(lroma > Decimal::ZERO);
        assert!(
            (lroma - (freight - tco)).abs() < dec!(0.0000000001),
            "margin {} vs lroma {lroma}",
            freight - tco
        );
    }
}

#[test]
fn test_recovered_capex_is_positive() {
    let mut params = fcev_reference();
    params.capex = Some(dec!(1000000));
    params.vehicle_life = Some(12);
    let lroma = LromaCalculator::default().calculate_lroma(&params).unwrap();
    assert!(lroma > Decimal::ZERO);
}

// ===========================================================================
// Present value conventions
// ===========================================================================

#[test]
fn test_zero_rate_levelizes_undiscounted() {
    let mut params = fcev_reference();
    params.discount_rate = Some(Decimal::ZERO);
    let lroma = LromaCalculator::default().calculate_lroma(&params).unwrap();
    // (-4,800,000 + 8 * 1,180,000) / 800,000 = 5.8
    assert_eq!(lroma, dec!(5.8));
}

// ===========================================================================
// Errors
// ===========================================================================

#[test]
fn test_missing_parameter_from_json() {
    let params: VehicleParameters = serde_json::from_str(
        r#"{"capex": 4800000, "annual_distance": 100000, "tco_per_km": 13.2,
            "discount_rate": 0.08, "vehicle_life": 8}"#,
    )
    .unwrap();
    let err = LromaCalculator::default().calculate_lroma(&params).unwrap_err();
    assert!(matches!(
        err,
        InvestorStateError::RequiredFieldMissing { ref field, .. } if field == "freight_rate"
    ));
}

// ===========================================================================
// Sensitivity and breakeven
// ===========================================================================

#[test]
fn test_sensitivity_row_count_excludes_invalid_overrides() {
    let mut ranges = ParameterRanges::new();
    ranges.insert(
        "freight_rate".into(),
        vec![dec!(20), dec!(22.5), dec!(25), dec!(27.5), dec!(30)],
    );
    ranges.insert("vehicle_life".into(), vec![dec!(6), dec!(8.5), dec!(10)]);
    ranges.insert("payload_tonnes".into(), vec![dec!(40)]);

    let out = LromaCalculator::default().sensitivity_analysis(&fcev_reference(), &ranges);
    assert_eq!(out.result.len(), 7);
    assert_eq!(out.warnings.len(), 2);

    let json = serde_json::to_value(&out.result[0]).unwrap();
    let obj = json.as_object().unwrap();
    assert!(obj.contains_key("parameter") && obj.contains_key("value") && obj.contains_key("lroma"));
}

#[test]
fn test_sensitivity_with_incomplete_base_returns_no_rows() {
    let mut base = fcev_reference();
    base.discount_rate = None;
    let mut ranges = ParameterRanges::new();
    ranges.insert("capex".into(), vec![dec!(1), dec!(2)]);
    ranges.insert("discount_rate".into(), vec![dec!(0.05)]);

    let out = LromaCalculator::default().sensitivity_analysis(&base, &ranges);
    // Only the override that supplies the missing field can compute
    assert_eq!(out.result.len(), 1);
    assert_eq!(out.result[0].parameter, "discount_rate");
}

#[test]
fn test_breakeven_for_loss_making_vehicle() {
    let mut params = fcev_reference();
    params.freight_rate = Some(dec!(12));
    let calc = LromaCalculator::default();
    let out = calc.calculate_breakeven(&params, DEFAULT_TARGET_LROMA).unwrap();
    let base = out.result.base_lroma;
    assert!(base < Decimal::ZERO);
    assert_eq!(
        out.result.breakeven_points.freight_rate,
        Some(dec!(12) - base * dec!(2))
    );
}
