pub mod batch;
pub mod error;
pub mod presets;
pub mod time_value;
pub mod types;

#[cfg(feature = "lroma")]
pub mod lroma;

#[cfg(feature = "fmip")]
pub mod fmip;

pub use error::InvestorStateError;
pub use types::*;

/// Standard result type for all investor-state operations
pub type InvestorStateResult<T> = Result<T, InvestorStateError>;
