//! Fiscal Multiplier of Industrial Policy: discounted fiscal returns (tax
//! revenue plus avoided public spending) per unit of discounted public
//! investment, evaluated per named scenario.

pub mod calculator;
pub mod comparison;
pub mod ratio;
pub mod sensitivity;

pub use calculator::{FmipCalculator, FmipResult, Scenario, DEFAULT_SCENARIO};
pub use comparison::ScenarioComparisonRow;
pub use ratio::FmipRatio;
pub use sensitivity::FmipSensitivityRow;
