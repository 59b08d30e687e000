use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::calculator::FmipCalculator;
use super::ratio::FmipRatio;
use crate::batch::partition_rows;
use crate::types::*;
use crate::InvestorStateResult;

/// One sweep point. Column names are consumed by charting tools as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FmipSensitivityRow {
    pub parameter: String,
    pub value: Decimal,
    pub fmip: FmipRatio,
    /// Scenario the variation was applied to
    pub scenario: String,
}

impl FmipCalculator {
    /// Sensitivity of FMIP to one parameter at a time.
    ///
    /// For `*_cashflows` parameters each value is a multiplier applied to
    /// every flow of that series; for scalar parameters the value replaces
    /// the field. Each point runs through [`FmipCalculator::calculate_fmip`]
    /// on a throwaway single-scenario calculator. An unknown
    /// `base_scenario` is an error; failing points are skipped.
    pub fn sensitivity_analysis(
        &self,
        base_scenario: &str,
        parameter_variations: &ParameterRanges,
    ) -> InvestorStateResult<ComputationOutput<Vec<FmipSensitivityRow>>> {
        let start = Instant::now();
        let base = self.lookup(base_scenario)?;

        let mut outcomes = Vec::new();
        for (parameter, values) in parameter_variations {
            for &value in values {
                let key = format!("temp_{parameter}_{value}");
                let outcome = base
                    .with_variation(parameter, value)
                    .and_then(|modified| {
                        FmipCalculator::new(IndexMap::from([(key.clone(), modified)]))
                            .calculate_fmip(&key)
                    })
                    .map(|result| FmipSensitivityRow {
                        parameter: parameter.clone(),
                        value,
                        fmip: result.fmip,
                        scenario: base_scenario.to_string(),
                    });
                outcomes.push((format!("{parameter}={value}"), outcome));
            }
        }
        let (rows, warnings) = partition_rows("FMIP sensitivity", outcomes);

        let elapsed = start.elapsed().as_micros() as u64;
        Ok(with_metadata(
            "One-at-a-time FMIP sensitivity (series scaled, scalars replaced)",
            &serde_json::json!({
                "base_scenario": base_scenario,
                "parameters": parameter_variations.keys().collect::<Vec<_>>(),
                "points_computed": rows.len(),
            }),
            warnings,
            elapsed,
            rows,
        ))
    }
}
