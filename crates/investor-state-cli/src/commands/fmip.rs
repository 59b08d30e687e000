use clap::Args;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use investor_state_core::fmip::{FmipCalculator, Scenario, DEFAULT_SCENARIO};
use investor_state_core::ParameterRanges;

use crate::input;

/// Arguments for FMIP calculation
#[derive(Args)]
pub struct FmipArgs {
    /// Path to JSON file mapping scenario names to scenario parameters
    #[arg(long)]
    pub input: Option<String>,

    /// Scenario to evaluate
    #[arg(long, default_value = DEFAULT_SCENARIO)]
    pub scenario: String,
}

/// Arguments for cross-scenario FMIP comparison
#[derive(Args)]
pub struct FmipCompareArgs {
    /// Path to JSON file mapping scenario names to scenario parameters
    #[arg(long)]
    pub input: Option<String>,

    /// Comma-separated scenario names (default: base_case, pessimistic,
    /// optimistic, ssb_disruption)
    #[arg(long, value_delimiter = ',')]
    pub scenarios: Option<Vec<String>>,
}

/// Arguments for FMIP sensitivity analysis
#[derive(Args)]
pub struct FmipSensitivityArgs {
    /// Path to JSON file: {"scenarios": {...}, "base_scenario": "...",
    /// "parameter_variations": {"name": [values]}}
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Deserialize)]
struct FmipSensitivityRequest {
    scenarios: IndexMap<String, Scenario>,
    #[serde(default = "default_scenario")]
    base_scenario: String,
    parameter_variations: ParameterRanges,
}

fn default_scenario() -> String {
    DEFAULT_SCENARIO.to_string()
}

fn read_scenarios(
    path: Option<&str>,
    command: &str,
) -> Result<IndexMap<String, Scenario>, Box<dyn std::error::Error>> {
    input::read_request(path)?
        .ok_or_else(|| format!("--input <file.json> or stdin required for {command}").into())
}

pub fn run_fmip(args: FmipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenarios = read_scenarios(args.input.as_deref(), "FMIP")?;
    let result = FmipCalculator::new(scenarios).calculate_fmip(&args.scenario)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare(args: FmipCompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenarios = read_scenarios(args.input.as_deref(), "scenario comparison")?;
    let result = FmipCalculator::new(scenarios).scenario_comparison(args.scenarios.as_deref());
    Ok(serde_json::to_value(result)?)
}

pub fn run_sensitivity(args: FmipSensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: FmipSensitivityRequest = input::read_request(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required for FMIP sensitivity")?;
    let result = FmipCalculator::new(request.scenarios)
        .sensitivity_analysis(&request.base_scenario, &request.parameter_variations)?;
    Ok(serde_json::to_value(result)?)
}
