//! Levelized Return on Mobility Asset: discounted net profit of a vehicle
//! per discounted unit of distance driven over its operating life.

pub mod breakeven;
pub mod calculator;
pub mod sensitivity;

pub use breakeven::{BreakevenOutput, BreakevenPoints, DEFAULT_TARGET_LROMA};
pub use calculator::{LromaCalculator, VehicleEconomics, VehicleParameters};
pub use sensitivity::LromaSensitivityRow;
