use indexmap::IndexMap;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::InvestorStateError;
use crate::time_value::{present_value_of, PeriodOrigin};
use crate::types::*;
use crate::InvestorStateResult;

const CONTEXT: &str = "vehicle parameters";

/// Vehicle economics as supplied by the caller.
///
/// Every field is optional at the boundary so that an absent value is
/// reported by name instead of failing deserialization wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleParameters {
    /// One-time capital outlay at t = 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capex: Option<Money>,
    /// Distance driven per period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_distance: Option<Distance>,
    /// Total cost of ownership per distance unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tco_per_km: Option<Money>,
    /// Revenue per distance unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freight_rate: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_rate: Option<Rate>,
    /// Operating life in periods
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_life: Option<u32>,
}

/// Fully specified vehicle economics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleEconomics {
    pub capex: Money,
    pub annual_distance: Distance,
    pub tco_per_km: Money,
    pub freight_rate: Money,
    pub discount_rate: Rate,
    pub vehicle_life: u32,
}

impl VehicleParameters {
    /// Names accepted by [`VehicleParameters::with_override`].
    pub const FIELDS: [&'static str; 6] = [
        "capex",
        "annual_distance",
        "tco_per_km",
        "freight_rate",
        "discount_rate",
        "vehicle_life",
    ];

    /// Check that every field is present.
    pub fn resolve(&self) -> InvestorStateResult<VehicleEconomics> {
        Ok(VehicleEconomics {
            capex: required(self.capex, "capex")?,
            annual_distance: required(self.annual_distance, "annual_distance")?,
            tco_per_km: required(self.tco_per_km, "tco_per_km")?,
            freight_rate: required(self.freight_rate, "freight_rate")?,
            discount_rate: required(self.discount_rate, "discount_rate")?,
            vehicle_life: required(self.vehicle_life, "vehicle_life")?,
        })
    }

    /// Copy of these parameters with exactly one field replaced.
    pub fn with_override(&self, field: &str, value: Decimal) -> InvestorStateResult<Self> {
        let mut modified = self.clone();
        match field {
            "capex" => modified.capex = Some(value),
            "annual_distance" => modified.annual_distance = Some(value),
            "tco_per_km" => modified.tco_per_km = Some(value),
            "freight_rate" => modified.freight_rate = Some(value),
            "discount_rate" => modified.discount_rate = Some(value),
            "vehicle_life" => modified.vehicle_life = Some(period_count(field, value)?),
            other => {
                return Err(InvestorStateError::InvalidInput {
                    field: other.to_string(),
                    reason: format!(
                        "Unknown vehicle parameter. Expected one of {:?}",
                        Self::FIELDS
                    ),
                })
            }
        }
        Ok(modified)
    }
}

impl VehicleEconomics {
    /// Profit per period; negative when the freight rate is below TCO.
    pub fn annual_profit(&self) -> InvestorStateResult<Money> {
        self.freight_rate
            .checked_sub(self.tco_per_km)
            .and_then(|margin| self.annual_distance.checked_mul(margin))
            .ok_or_else(|| InvestorStateError::InvalidInput {
                field: "freight_rate".into(),
                reason: "Annual profit out of decimal range".into(),
            })
    }

    /// `-capex` at t = 0 followed by `vehicle_life` periods of profit.
    pub fn cash_flows(&self) -> InvestorStateResult<impl Iterator<Item = Money>> {
        let profit = self.annual_profit()?;
        Ok(std::iter::once(-self.capex).chain(periods(profit, self.vehicle_life)))
    }

    /// Distance driven in each operating period, t = 1..=vehicle_life.
    pub fn distance_flows(&self) -> impl Iterator<Item = Distance> {
        periods(self.annual_distance, self.vehicle_life)
    }
}

/// `value` once per operating period, produced lazily.
fn periods(value: Decimal, count: u32) -> impl Iterator<Item = Decimal> {
    (0..count).map(move |_| value)
}

fn required<T>(value: Option<T>, field: &str) -> InvestorStateResult<T> {
    value.ok_or_else(|| InvestorStateError::missing(CONTEXT, field))
}

fn period_count(field: &str, value: Decimal) -> InvestorStateResult<u32> {
    if !value.fract().is_zero() {
        return Err(InvestorStateError::InvalidInput {
            field: field.to_string(),
            reason: format!("Period count must be a whole number, got {value}"),
        });
    }
    value.to_u32().ok_or_else(|| InvestorStateError::InvalidInput {
        field: field.to_string(),
        reason: format!("Period count must be a non-negative integer, got {value}"),
    })
}

/// LROMA calculator holding a read-only fleet of named vehicles.
#[derive(Debug, Clone, Default)]
pub struct LromaCalculator {
    fleet: IndexMap<String, VehicleParameters>,
}

impl LromaCalculator {
    pub fn new(fleet: IndexMap<String, VehicleParameters>) -> Self {
        Self { fleet }
    }

    pub fn fleet(&self) -> &IndexMap<String, VehicleParameters> {
        &self.fleet
    }

    /// Levelized return per distance unit.
    ///
    /// NPV counts the outlay at t = 0 and profits at t = 1..=N; discounted
    /// distance only covers t = 1..=N. A zero discounted distance (no
    /// operating periods, or no distance) yields zero rather than an error.
    pub fn calculate_lroma(&self, params: &VehicleParameters) -> InvestorStateResult<Money> {
        let vehicle = params.resolve()?;

        let npv = present_value_of(
            vehicle.discount_rate,
            vehicle.cash_flows()?,
            PeriodOrigin::Outlay,
        )?;
        let pv_distance = present_value_of(
            vehicle.discount_rate,
            vehicle.distance_flows(),
            PeriodOrigin::FirstPeriod,
        )?;

        let lroma = if pv_distance.is_zero() {
            Decimal::ZERO
        } else {
            npv.checked_div(pv_distance)
                .ok_or_else(|| InvestorStateError::InvalidInput {
                    field: "annual_distance".into(),
                    reason: "LROMA out of decimal range".into(),
                })?
        };

        debug!(%npv, %pv_distance, %lroma, "computed LROMA");
        Ok(lroma)
    }

    /// LROMA of a vehicle registered in this calculator's fleet.
    pub fn calculate_vehicle(&self, name: &str) -> InvestorStateResult<Money> {
        let params = self
            .fleet
            .get(name)
            .ok_or_else(|| InvestorStateError::VehicleNotFound {
                vehicle: name.to_string(),
                available: self.fleet.keys().cloned().collect(),
            })?;
        self.calculate_lroma(params)
    }
}
