use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::calculator::{FmipCalculator, FmipResult};
use super::ratio::FmipRatio;
use crate::batch::partition_rows;
use crate::presets::DEFAULT_COMPARISON_SCENARIOS;
use crate::types::*;

/// One row of the cross-scenario table. Column names are consumed by
/// charting tools as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparisonRow {
    pub scenario: String,
    pub fmip: FmipRatio,
    pub public_investment: Money,
    pub tax_revenues: Money,
    pub fiscal_avoidance: Money,
    pub total_fiscal_return: Money,
}

impl From<FmipResult> for ScenarioComparisonRow {
    fn from(r: FmipResult) -> Self {
        Self {
            scenario: r.scenario,
            fmip: r.fmip,
            public_investment: r.pv_public_investment,
            tax_revenues: r.pv_tax_revenues,
            fiscal_avoidance: r.pv_fiscal_avoidance,
            total_fiscal_return: r.total_fiscal_return,
        }
    }
}

impl FmipCalculator {
    /// FMIP across several scenarios; defaults to base, pessimistic,
    /// optimistic and SSB disruption.
    ///
    /// Scenarios that are missing or incomplete are omitted from the table
    /// and reported in `warnings`.
    pub fn scenario_comparison(
        &self,
        scenario_names: Option<&[String]>,
    ) -> ComputationOutput<Vec<ScenarioComparisonRow>> {
        let start = Instant::now();

        let names: Vec<String> = match scenario_names {
            Some(names) => names.to_vec(),
            None => DEFAULT_COMPARISON_SCENARIOS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        let outcomes = names.iter().map(|name| {
            let outcome = self.calculate_fmip(name).map(ScenarioComparisonRow::from);
            (format!("scenario '{name}'"), outcome)
        });
        let (rows, warnings) = partition_rows("FMIP", outcomes);

        let elapsed = start.elapsed().as_micros() as u64;
        with_metadata(
            "FMIP scenario comparison",
            &serde_json::json!({
                "scenarios_requested": names,
                "scenarios_computed": rows.len(),
            }),
            warnings,
            elapsed,
            rows,
        )
    }
}
