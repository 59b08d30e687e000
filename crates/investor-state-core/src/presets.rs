//! Reference inputs used by the command line tool and the test suite.

#[cfg(feature = "lroma")]
use indexmap::IndexMap;
#[cfg(feature = "lroma")]
use rust_decimal_macros::dec;

#[cfg(feature = "lroma")]
use crate::lroma::VehicleParameters;

/// Scenarios compared when the caller does not name any.
#[cfg(feature = "fmip")]
pub const DEFAULT_COMPARISON_SCENARIOS: [&str; 4] =
    ["base_case", "pessimistic", "optimistic", "ssb_disruption"];

/// Fuel-cell heavy truck: 4.8M outlay, 100,000 km a year over 8 years at 8%.
#[cfg(feature = "lroma")]
pub fn fcev_reference() -> VehicleParameters {
    VehicleParameters {
        capex: Some(dec!(4800000)),
        annual_distance: Some(dec!(100000)),
        tco_per_km: Some(dec!(13.20)),
        freight_rate: Some(dec!(25.00)),
        discount_rate: Some(dec!(0.08)),
        vehicle_life: Some(8),
    }
}

/// Named reference vehicles, keyed as the command line tool expects.
#[cfg(feature = "lroma")]
pub fn fleet() -> IndexMap<String, VehicleParameters> {
    IndexMap::from([("fcev".to_string(), fcev_reference())])
}
