use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::calculator::{LromaCalculator, VehicleParameters};
use crate::batch::partition_rows;
use crate::types::*;

/// One sweep point. Column names are consumed by charting tools as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LromaSensitivityRow {
    pub parameter: String,
    pub value: Decimal,
    pub lroma: Money,
}

impl LromaCalculator {
    /// One-at-a-time sensitivity of LROMA.
    ///
    /// Each value in `parameter_ranges` replaces exactly one field of a copy
    /// of `base_params`. Points that cannot be computed are left out of the
    /// table and reported in `warnings`.
    pub fn sensitivity_analysis(
        &self,
        base_params: &VehicleParameters,
        parameter_ranges: &ParameterRanges,
    ) -> ComputationOutput<Vec<LromaSensitivityRow>> {
        let start = Instant::now();

        let mut outcomes = Vec::new();
        for (parameter, values) in parameter_ranges {
            for &value in values {
                let outcome = base_params
                    .with_override(parameter, value)
                    .and_then(|modified| self.calculate_lroma(&modified))
                    .map(|lroma| LromaSensitivityRow {
                        parameter: parameter.clone(),
                        value,
                        lroma,
                    });
                outcomes.push((format!("{parameter}={value}"), outcome));
            }
        }
        let (rows, warnings) = partition_rows("LROMA", outcomes);

        let elapsed = start.elapsed().as_micros() as u64;
        with_metadata(
            "One-at-a-time LROMA sensitivity",
            &serde_json::json!({
                "parameters": parameter_ranges.keys().collect::<Vec<_>>(),
                "points_requested": parameter_ranges.values().map(Vec::len).sum::<usize>(),
                "points_computed": rows.len(),
            }),
            warnings,
            elapsed,
            rows,
        )
    }
}
