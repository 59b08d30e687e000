use indexmap::IndexMap;
use investor_state_core::fmip::{FmipCalculator, FmipRatio, Scenario, DEFAULT_SCENARIO};
use investor_state_core::time_value::{present_value, PeriodOrigin};
use investor_state_core::{InvestorStateError, ParameterRanges};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn scenarios() -> IndexMap<String, Scenario> {
    serde_json::from_str(
        r#"{
            "base_case": {
                "public_investment_cashflows": [1000, 500, 250],
                "tax_revenue_cashflows": [100, 300, 500, 700, 900],
                "fiscal_avoidance_cashflows": [50, 150, 250, 350],
                "social_discount_rate": "0.035"
            },
            "pessimistic": {
                "public_investment_cashflows": [1200, 600, 300],
                "tax_revenue_cashflows": [50, 150, 250],
                "fiscal_avoidance_cashflows": [20, 60],
                "social_discount_rate": 0.05
            },
            "optimistic": {
                "public_investment_cashflows": ["900", "400"],
                "tax_revenue_cashflows": ["200", "500", "900", "1300"],
                "fiscal_avoidance_cashflows": ["100", "300", "500"],
                "social_discount_rate": "0.03"
            },
            "ssb_disruption": {
                "public_investment_cashflows": [1000, 500, 250],
                "tax_revenue_cashflows": [100, 200]
            }
        }"#,
    )
    .unwrap()
}

// ===========================================================================
// Single scenario
// ===========================================================================

#[test]
fn test_base_case_matches_hand_discounting() {
    let calc = FmipCalculator::new(scenarios());
    let r = calc.calculate_fmip(DEFAULT_SCENARIO).unwrap();

    let rate = dec!(0.035);
    let pv = |flows: &[Decimal]| present_value(rate, flows, PeriodOrigin::FirstPeriod).unwrap();
    let inv = pv(&[dec!(1000), dec!(500), dec!(250)]);
    let tax = pv(&[dec!(100), dec!(300), dec!(500), dec!(700), dec!(900)]);
    let avoid = pv(&[dec!(50), dec!(150), dec!(250), dec!(350)]);

    assert_eq!(r.pv_public_investment, inv);
    assert_eq!(r.pv_tax_revenues, tax);
    assert_eq!(r.pv_fiscal_avoidance, avoid);
    assert_eq!(r.total_fiscal_return, tax + avoid);
    assert_eq!(r.fmip, FmipRatio::Finite((tax + avoid) / inv));
    // First investment flow is discounted, never booked at par
    assert!(r.pv_public_investment < dec!(1750));
}

#[test]
fn test_zero_rate_is_undiscounted_ratio() {
    let mut map = scenarios();
    map["pessimistic"].social_discount_rate = Some(Decimal::ZERO);
    let r = FmipCalculator::new(map).calculate_fmip("pessimistic").unwrap();
    assert_eq!(r.pv_public_investment, dec!(2100));
    assert_eq!(r.total_fiscal_return, dec!(530));
}

#[test]
fn test_zero_investment_branches() {
    let mut map = IndexMap::new();
    map.insert(
        "grant_free".to_string(),
        Scenario {
            public_investment_cashflows: Some(vec![Decimal::ZERO, Decimal::ZERO]),
            tax_revenue_cashflows: Some(vec![dec!(10)]),
            fiscal_avoidance_cashflows: Some(vec![]),
            social_discount_rate: Some(dec!(0.04)),
        },
    );
    map.insert(
        "dormant".to_string(),
        Scenario {
            public_investment_cashflows: Some(vec![]),
            tax_revenue_cashflows: Some(vec![]),
            fiscal_avoidance_cashflows: Some(vec![]),
            social_discount_rate: Some(dec!(0.04)),
        },
    );
    let calc = FmipCalculator::new(map);

    let infinite = calc.calculate_fmip("grant_free").unwrap().fmip;
    assert_eq!(infinite, FmipRatio::Infinite);
    assert_eq!(infinite.to_f64(), f64::INFINITY);

    let zero = calc.calculate_fmip("dormant").unwrap().fmip;
    assert_eq!(zero, FmipRatio::Finite(Decimal::ZERO));
    assert!(!zero.to_f64().is_nan());
}

#[test]
fn test_unknown_scenario_error_lists_every_key() {
    let calc = FmipCalculator::new(scenarios());
    let err = calc.calculate_fmip("green_steel").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("green_steel"));
    for key in ["base_case", "pessimistic", "optimistic", "ssb_disruption"] {
        assert!(msg.contains(key), "{key} missing from: {msg}");
    }
}

#[test]
fn test_incomplete_scenario_is_reported() {
    let calc = FmipCalculator::new(scenarios());
    match calc.calculate_fmip("ssb_disruption").unwrap_err() {
        InvestorStateError::RequiredFieldMissing { context, field } => {
            assert_eq!(context, "scenario 'ssb_disruption'");
            assert_eq!(field, "social_discount_rate");
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ===========================================================================
// Batch operations
// ===========================================================================

#[test]
fn test_default_comparison_omits_incomplete_scenario() {
    let out = FmipCalculator::new(scenarios()).scenario_comparison(None);
    let names: Vec<&str> = out.result.iter().map(|r| r.scenario.as_str()).collect();
    assert_eq!(names, vec!["base_case", "pessimistic", "optimistic"]);
    assert_eq!(out.warnings.len(), 1);

    // Optimistic beats pessimistic
    let fmip = |i: usize| out.result[i].fmip.value().unwrap();
    assert!(fmip(2) > fmip(1));
}

#[test]
fn test_sensitivity_returns_only_valid_points() {
    let mut variations = ParameterRanges::new();
    variations.insert(
        "tax_revenue_cashflows".into(),
        vec![dec!(0.8), dec!(0.9), dec!(1.0), dec!(1.1), dec!(1.2)],
    );
    variations.insert("fiscal_avoidance_cashflows".into(), vec![dec!(0.5), dec!(1.5)]);
    variations.insert("social_discount_rate".into(), vec![dec!(0.02), dec!(-1.2), dec!(-1)]);
    variations.insert("carbon_price_cashflows".into(), vec![dec!(1)]);

    let calc = FmipCalculator::new(scenarios());
    let out = calc.sensitivity_analysis("base_case", &variations).unwrap();
    // -100% and the unknown parameter are skipped; -120% still discounts
    assert_eq!(out.result.len(), 9);
    assert_eq!(out.warnings.len(), 2);
    assert!(out
        .result
        .iter()
        .any(|r| r.parameter == "social_discount_rate" && r.value == dec!(-1.2)));

    let base = calc.calculate_fmip("base_case").unwrap().fmip;
    let unit = out
        .result
        .iter()
        .find(|r| r.parameter == "tax_revenue_cashflows" && r.value == dec!(1.0))
        .unwrap();
    let drift = unit.fmip.value().unwrap() - base.value().unwrap();
    assert!(drift.abs() < dec!(0.0000000001));

    let json = serde_json::to_value(&out.result[0]).unwrap();
    let obj = json.as_object().unwrap();
    for key in ["parameter", "value", "fmip", "scenario"] {
        assert!(obj.contains_key(key));
    }
}
