use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use super::calculator::{LromaCalculator, VehicleParameters};
use crate::error::InvestorStateError;
use crate::types::*;
use crate::InvestorStateResult;

/// Target LROMA used when the caller does not supply one.
pub const DEFAULT_TARGET_LROMA: Money = Decimal::ZERO;

/// Freight-rate increase per unit of LROMA shortfall.
///
/// Fixed slope of the linear approximation, not derived from the model.
const FREIGHT_RATE_SLOPE: Decimal = dec!(2);

/// Parameter values estimated to reach the target LROMA.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakevenPoints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freight_rate: Option<Money>,
}

impl BreakevenPoints {
    pub fn is_empty(&self) -> bool {
        self.freight_rate.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakevenOutput {
    pub base_lroma: Money,
    pub target_lroma: Money,
    pub breakeven_points: BreakevenPoints,
}

impl LromaCalculator {
    /// Coarse breakeven freight rate.
    ///
    /// When the vehicle falls short of `target_lroma` the freight rate is
    /// raised by twice the shortfall. This is a linear rule of thumb, not a
    /// solve of the LROMA equation, and the returned rate will generally not
    /// hit the target exactly. No points are returned once the target is met.
    pub fn calculate_breakeven(
        &self,
        params: &VehicleParameters,
        target_lroma: Money,
    ) -> InvestorStateResult<ComputationOutput<BreakevenOutput>> {
        let start = Instant::now();
        let base_lroma = self.calculate_lroma(params)?;

        let mut breakeven_points = BreakevenPoints::default();
        if base_lroma < target_lroma {
            let current_freight = params.resolve()?.freight_rate;
            let breakeven_freight = target_lroma
                .checked_sub(base_lroma)
                .and_then(|gap| gap.checked_mul(FREIGHT_RATE_SLOPE))
                .and_then(|increase| current_freight.checked_add(increase))
                .ok_or_else(|| InvestorStateError::InvalidInput {
                    field: "target_lroma".into(),
                    reason: "Breakeven freight rate out of decimal range".into(),
                })?;
            breakeven_points.freight_rate = Some(breakeven_freight);
        }
        debug!(%base_lroma, %target_lroma, ?breakeven_points, "estimated breakeven");

        let output = BreakevenOutput {
            base_lroma,
            target_lroma,
            breakeven_points,
        };

        let elapsed = start.elapsed().as_micros() as u64;
        Ok(with_metadata(
            "Linear breakeven approximation (freight rate + 2 x LROMA shortfall)",
            &serde_json::json!({
                "target_lroma": target_lroma.to_string(),
                "freight_rate_slope": FREIGHT_RATE_SLOPE.to_string(),
            }),
            Vec::new(),
            elapsed,
            output,
        ))
    }
}
