use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use investor_state_core::lroma::{LromaCalculator, VehicleParameters, DEFAULT_TARGET_LROMA};
use investor_state_core::presets;
use investor_state_core::ParameterRanges;

use crate::input;

/// Vehicle economics given on the command line
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct VehicleArgs {
    /// Path to JSON file with vehicle parameters (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// One-time capital outlay
    #[arg(long)]
    pub capex: Option<Decimal>,

    /// Distance driven per year
    #[arg(long)]
    pub annual_distance: Option<Decimal>,

    /// Total cost of ownership per km
    #[arg(long)]
    pub tco_per_km: Option<Decimal>,

    /// Freight revenue per km
    #[arg(long)]
    pub freight_rate: Option<Decimal>,

    /// Discount rate (e.g. 0.08 for 8%)
    #[arg(long)]
    pub discount_rate: Option<Decimal>,

    /// Operating life in years
    #[arg(long)]
    pub vehicle_life: Option<u32>,

    /// Named reference vehicle used when neither input nor flags are given
    #[arg(long, default_value = "fcev")]
    pub vehicle: String,
}

/// Arguments for LROMA calculation
#[derive(Args)]
pub struct LromaArgs {
    #[command(flatten)]
    pub vehicle: VehicleArgs,
}

/// Arguments for the breakeven estimate
#[derive(Args)]
pub struct BreakevenArgs {
    #[command(flatten)]
    pub vehicle: VehicleArgs,

    /// Target LROMA per km
    #[arg(long, allow_hyphen_values = true)]
    pub target: Option<Decimal>,
}

/// Arguments for LROMA sensitivity analysis
#[derive(Args)]
pub struct LromaSensitivityArgs {
    /// Path to JSON file: {"base_params": {...}, "parameter_ranges": {"name": [values]}}
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Deserialize)]
struct LromaSensitivityRequest {
    base_params: VehicleParameters,
    parameter_ranges: ParameterRanges,
}

impl VehicleArgs {
    fn has_flags(&self) -> bool {
        self.capex.is_some()
            || self.annual_distance.is_some()
            || self.tco_per_km.is_some()
            || self.freight_rate.is_some()
            || self.discount_rate.is_some()
            || self.vehicle_life.is_some()
    }
}

fn resolve_vehicle(
    args: &VehicleArgs,
    calc: &LromaCalculator,
) -> Result<VehicleParameters, Box<dyn std::error::Error>> {
    if let Some(params) = input::read_request(args.input.as_deref())? {
        return Ok(params);
    }
    if args.has_flags() {
        return Ok(VehicleParameters {
            capex: args.capex,
            annual_distance: args.annual_distance,
            tco_per_km: args.tco_per_km,
            freight_rate: args.freight_rate,
            discount_rate: args.discount_rate,
            vehicle_life: args.vehicle_life,
        });
    }
    calc.fleet().get(&args.vehicle).cloned().ok_or_else(|| {
        format!(
            "Unknown reference vehicle '{}'. Available: {:?}",
            args.vehicle,
            calc.fleet().keys().collect::<Vec<_>>()
        )
        .into()
    })
}

pub fn run_lroma(args: LromaArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let calc = LromaCalculator::new(presets::fleet());
    let params = resolve_vehicle(&args.vehicle, &calc)?;
    let lroma = calc.calculate_lroma(&params)?;
    Ok(serde_json::json!({
        "lroma": lroma,
        "vehicle": params,
    }))
}

pub fn run_breakeven(args: BreakevenArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let calc = LromaCalculator::new(presets::fleet());
    let params = resolve_vehicle(&args.vehicle, &calc)?;
    let target = args.target.unwrap_or(DEFAULT_TARGET_LROMA);
    let result = calc.calculate_breakeven(&params, target)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_sensitivity(args: LromaSensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: LromaSensitivityRequest = input::read_request(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required for LROMA sensitivity")?;
    let result = LromaCalculator::default()
        .sensitivity_analysis(&request.base_params, &request.parameter_ranges);
    Ok(serde_json::to_value(result)?)
}
